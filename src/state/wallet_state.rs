//! Wallet connection state.

use rust_decimal::Decimal;

/// State of the wallet connection.
#[derive(Debug, Default)]
pub struct WalletState {
    /// Whether a wallet account is connected.
    pub connected: bool,
    /// Whether a connection attempt is in flight.
    pub connecting: bool,
    /// Connected account address.
    pub address: Option<String>,
    /// Last known GAS balance.
    pub gas_balance: Decimal,
    /// Whether the balance is currently loading.
    pub loading_balance: bool,
}

impl WalletState {
    /// Truncated address for display: first six and last four characters.
    pub fn short_address(&self) -> Option<String> {
        self.address.as_ref().map(|address| {
            if address.len() > 10 {
                format!("{}...{}", &address[..6], &address[address.len() - 4..])
            } else {
                address.clone()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_address_truncates_long_addresses() {
        let state = WalletState {
            address: Some("NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg".into()),
            ..Default::default()
        };
        assert_eq!(state.short_address().as_deref(), Some("NiHURB...FTFg"));
    }

    #[test]
    fn short_address_leaves_short_strings_alone() {
        let state = WalletState {
            address: Some("NiHURB".into()),
            ..Default::default()
        };
        assert_eq!(state.short_address().as_deref(), Some("NiHURB"));
    }
}

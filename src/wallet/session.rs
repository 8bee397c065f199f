//! Connection workflow on top of a (possibly absent) provider.

use crate::error::{Error, Result};
use crate::wallet::provider::{find_gas_balance, Account, WalletProvider};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Holds whichever provider was discovered at startup. Absence is a
/// first-class state: connecting without one fails with `NoProvider`
/// before any provider method is reached.
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self { provider }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The provider, or `NoProvider` when none was discovered.
    pub fn provider(&self) -> Result<&Arc<dyn WalletProvider>> {
        self.provider.as_ref().ok_or(Error::NoProvider)
    }

    /// Connect and return the user's account.
    pub async fn connect(&self) -> Result<Account> {
        self.provider()?.get_account().await
    }

    /// Fetch the GAS balance for the connected account, if any token
    /// entry carries the GAS symbol.
    pub async fn gas_balance(&self) -> Result<Option<Decimal>> {
        let balances = self.provider()?.get_balance().await?;
        Ok(find_gas_balance(&balances))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::provider::{BalanceMap, MockWalletProvider, TokenBalance};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn connecting_without_a_provider_never_reaches_get_account() {
        let session = WalletSession::new(None);
        let result = tokio_test::block_on(session.connect());
        assert!(matches!(result, Err(Error::NoProvider)));
    }

    #[test]
    fn connect_returns_the_provider_account() {
        let mut provider = MockWalletProvider::new();
        provider.expect_get_account().once().returning(|| {
            Ok(Account {
                address: "NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg".into(),
                label: None,
            })
        });

        let session = WalletSession::new(Some(Arc::new(provider)));
        let account = tokio_test::block_on(session.connect()).unwrap();
        assert_eq!(account.address, "NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg");
    }

    #[test]
    fn denial_propagates_unchanged() {
        let mut provider = MockWalletProvider::new();
        provider
            .expect_get_account()
            .once()
            .returning(|| Err(Error::ConnectionDenied));

        let session = WalletSession::new(Some(Arc::new(provider)));
        let result = tokio_test::block_on(session.connect());
        assert!(matches!(result, Err(Error::ConnectionDenied)));
    }

    #[test]
    fn gas_balance_scans_the_balance_map() {
        let mut provider = MockWalletProvider::new();
        provider.expect_get_balance().once().returning(|| {
            let mut balances = BalanceMap::new();
            balances.insert(
                "NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg".into(),
                vec![TokenBalance {
                    contract: "0xd2a4cff31913016155e38e474a2c06d08be276cf".into(),
                    symbol: "GAS".into(),
                    amount: "42.5".into(),
                }],
            );
            Ok(balances)
        });

        let session = WalletSession::new(Some(Arc::new(provider)));
        let balance = tokio_test::block_on(session.gas_balance()).unwrap();
        assert_eq!(balance, Some(dec!(42.5)));
    }
}

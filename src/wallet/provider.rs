//! The wallet provider capability trait.
//!
//! Every call site receives the provider explicitly; there is no
//! ambient global. Provider failures propagate unchanged to the
//! caller: no retries, no timeouts, no local recovery.

use crate::error::Result;
use crate::wallet::types::{InvokeParams, InvokeReadParams, InvokeReadResponse, InvokeResponse};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// A connected wallet account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Balance of one token held under an address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenBalance {
    pub contract: String,
    pub symbol: String,
    pub amount: String,
}

/// Balances keyed by address.
pub type BalanceMap = HashMap<String, Vec<TokenBalance>>;

/// Capabilities a wallet provider must supply.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Connect and return the user's account.
    async fn get_account(&self) -> Result<Account>;

    /// Token balances for the connected account(s).
    async fn get_balance(&self) -> Result<BalanceMap>;

    /// Read-only contract invocation. Does not modify chain state and
    /// consumes no GAS.
    async fn invoke_read(&self, params: InvokeReadParams) -> Result<InvokeReadResponse>;

    /// State-changing contract invocation. Requires signing and GAS.
    async fn invoke(&self, params: InvokeParams) -> Result<InvokeResponse>;

    /// Convert a base58 address to its script hash.
    async fn address_to_script_hash(&self, address: &str) -> Result<String>;

    /// Convert a script hash back to a base58 address.
    async fn script_hash_to_address(&self, script_hash: &str) -> Result<String>;
}

/// Find the GAS balance in a provider balance map, scanning every
/// address the provider reported.
pub fn find_gas_balance(balances: &BalanceMap) -> Option<Decimal> {
    balances
        .values()
        .flatten()
        .find(|b| b.symbol == "GAS")
        .and_then(|b| b.amount.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn balance(symbol: &str, amount: &str) -> TokenBalance {
        TokenBalance {
            contract: "0x0".into(),
            symbol: symbol.into(),
            amount: amount.into(),
        }
    }

    #[test]
    fn finds_gas_across_addresses() {
        let mut balances = BalanceMap::new();
        balances.insert("NAddr1".into(), vec![balance("NEO", "5")]);
        balances.insert(
            "NAddr2".into(),
            vec![balance("FLM", "12"), balance("GAS", "17.4081")],
        );
        assert_eq!(find_gas_balance(&balances), Some(dec!(17.4081)));
    }

    #[test]
    fn missing_gas_yields_none() {
        let mut balances = BalanceMap::new();
        balances.insert("NAddr1".into(), vec![balance("NEO", "5")]);
        assert_eq!(find_gas_balance(&balances), None);
    }
}

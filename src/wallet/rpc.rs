//! JSON-RPC backed wallet provider.
//!
//! Talks to a Neo N3 node over `invokefunction` / `sendrawtransaction`.
//! Signing stays inside the node: `invokefunction` with signers returns
//! a signed transaction when the node wallet is open, and the provider
//! only broadcasts it. The account address comes from configuration.

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::wallet::provider::{Account, BalanceMap, TokenBalance, WalletProvider};
use crate::wallet::types::{
    scopes, InvokeParams, InvokeReadParams, InvokeReadResponse, InvokeResponse, Signer,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Duration;

/// Version byte of a Neo N3 address.
const ADDRESS_VERSION: u8 = 0x35;

/// Native GAS token contract hash and decimals.
const GAS_CONTRACT: &str = "0xd2a4cff31913016155e38e474a2c06d08be276cf";
const GAS_DECIMALS: u32 = 8;

/// Native NEO token contract hash.
const NEO_CONTRACT: &str = "0xef4073a0f2b305a38ec4050e4d3d28bc40ea63f5";

/// Wallet provider speaking Neo N3 JSON-RPC.
pub struct RpcProvider {
    http: reqwest::Client,
    rpc_url: String,
    account_address: Option<String>,
    network_magic: Option<u32>,
}

impl RpcProvider {
    /// Create a provider from the network configuration.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            rpc_url: config.rpc_url.clone(),
            account_address: config.account_address.clone(),
            network_magic: config.network_magic,
        })
    }

    /// Issue a single JSON-RPC call and unwrap the `result` field.
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1,
        });

        tracing::debug!(method, "rpc request");
        let response: Value = self
            .http
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if let Some(err) = response.get("error") {
            let code = err.get("code").and_then(Value::as_i64).unwrap_or(0);
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown RPC error");
            return Err(Error::rpc(code, message));
        }

        response
            .get("result")
            .cloned()
            .ok_or_else(|| Error::provider("RPC response carried no result"))
    }

    /// Compare the node's network magic against the configured one.
    async fn verify_network(&self) -> Result<()> {
        let Some(expected) = self.network_magic else {
            return Ok(());
        };
        let version = self.call("getversion", json!([])).await?;
        let actual = version
            .pointer("/protocol/network")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::provider("node version reply held no network magic"))?
            as u32;
        if actual != expected {
            return Err(Error::ChainMismatch { expected, actual });
        }
        Ok(())
    }

    /// Build the node-side signer shape. The node wants scope *names*
    /// while the adapter types carry the numeric bitmask.
    fn rpc_signer(signer: &Signer) -> Value {
        let mut value = json!({
            "account": signer.account,
            "scopes": scope_names(signer.scopes),
        });
        if let Some(contracts) = &signer.allowed_contracts {
            value["allowedcontracts"] = json!(contracts);
        }
        if let Some(groups) = &signer.allowed_groups {
            value["allowedgroups"] = json!(groups);
        }
        value
    }

    async fn invoke_function(
        &self,
        script_hash: &str,
        operation: &str,
        args: Value,
        signers: Vec<Value>,
    ) -> Result<InvokeReadResponse> {
        let result = self
            .call(
                "invokefunction",
                json!([script_hash, operation, args, signers]),
            )
            .await?;
        Ok(serde_json::from_value(result)?)
    }
}

#[async_trait]
impl WalletProvider for RpcProvider {
    async fn get_account(&self) -> Result<Account> {
        self.verify_network().await?;
        let address = self
            .account_address
            .clone()
            .ok_or_else(|| Error::wallet("no account address configured"))?;
        Ok(Account {
            address,
            label: None,
        })
    }

    async fn get_balance(&self) -> Result<BalanceMap> {
        let address = self
            .account_address
            .clone()
            .ok_or_else(|| Error::wallet("no account address configured"))?;
        let result = self
            .call("getnep17balances", json!([address]))
            .await?;

        let entries = result
            .get("balance")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        let tokens = entries
            .iter()
            .filter_map(|entry| {
                let contract = entry.get("assethash")?.as_str()?.to_string();
                let raw = entry.get("amount")?.as_str()?;
                let (symbol, amount) = describe_asset(&contract, raw);
                Some(TokenBalance {
                    contract,
                    symbol,
                    amount,
                })
            })
            .collect();

        let mut balances = BalanceMap::new();
        balances.insert(address, tokens);
        Ok(balances)
    }

    async fn invoke_read(&self, params: InvokeReadParams) -> Result<InvokeReadResponse> {
        let signers = params.signers.iter().map(Self::rpc_signer).collect();
        self.invoke_function(
            &params.script_hash,
            &params.operation,
            serde_json::to_value(&params.args)?,
            signers,
        )
        .await
    }

    async fn invoke(&self, params: InvokeParams) -> Result<InvokeResponse> {
        let signers = params.signers.iter().map(Self::rpc_signer).collect();
        let response = self
            .invoke_function(
                &params.script_hash,
                &params.operation,
                serde_json::to_value(&params.args)?,
                signers,
            )
            .await?;

        if !response.halted() {
            let description = response
                .exception
                .unwrap_or_else(|| format!("execution ended in {}", response.state));
            return Err(Error::Provider { description });
        }

        let tx = response.tx.ok_or_else(|| {
            Error::wallet("node returned no signed transaction; is the node wallet open?")
        })?;

        let broadcast = self.call("sendrawtransaction", json!([tx])).await?;
        let txid = broadcast
            .get("hash")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::provider("broadcast reply carried no transaction hash"))?
            .to_string();

        tracing::info!(%txid, operation = %params.operation, "transaction broadcast");
        Ok(InvokeResponse {
            txid,
            node_url: Some(self.rpc_url.clone()),
            signed_tx: Some(tx),
        })
    }

    async fn address_to_script_hash(&self, address: &str) -> Result<String> {
        decode_address(address)
    }

    async fn script_hash_to_address(&self, script_hash: &str) -> Result<String> {
        encode_script_hash(script_hash)
    }
}

/// Map the numeric scope bitmask onto the names the node RPC expects.
fn scope_names(mask: u8) -> String {
    if mask & scopes::GLOBAL != 0 {
        return "Global".to_string();
    }
    let mut names = Vec::new();
    if mask & scopes::CALLED_BY_ENTRY != 0 {
        names.push("CalledByEntry");
    }
    if mask & scopes::CUSTOM_CONTRACTS != 0 {
        names.push("CustomContracts");
    }
    if mask & scopes::CUSTOM_GROUPS != 0 {
        names.push("CustomGroups");
    }
    if mask & scopes::WITNESS_RULES != 0 {
        names.push("WitnessRules");
    }
    if names.is_empty() {
        return "None".to_string();
    }
    names.join(",")
}

/// Symbol and human-readable amount for a NEP-17 asset hash.
fn describe_asset(contract: &str, raw_amount: &str) -> (String, String) {
    match contract {
        GAS_CONTRACT => ("GAS".to_string(), scale_amount(raw_amount, GAS_DECIMALS)),
        NEO_CONTRACT => ("NEO".to_string(), raw_amount.to_string()),
        _ => (contract.to_string(), raw_amount.to_string()),
    }
}

fn scale_amount(raw: &str, decimals: u32) -> String {
    raw.parse::<i128>()
        .ok()
        .and_then(|v| Decimal::try_from_i128_with_scale(v, decimals).ok())
        .map(|d| d.normalize().to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Base58check-decode an address into its `0x` script hash.
pub fn decode_address(address: &str) -> Result<String> {
    let payload = bs58::decode(address)
        .with_check(Some(ADDRESS_VERSION))
        .into_vec()
        .map_err(|e| Error::invalid_input(format!("invalid address '{address}': {e}")))?;
    // payload = version byte + 20-byte script hash (little-endian)
    if payload.len() != 21 {
        return Err(Error::invalid_input(format!(
            "invalid address '{address}': unexpected payload length {}",
            payload.len()
        )));
    }
    let mut hash = payload[1..].to_vec();
    hash.reverse();
    Ok(format!("0x{}", hex::encode(hash)))
}

/// Encode a `0x` script hash back into a base58check address.
pub fn encode_script_hash(script_hash: &str) -> Result<String> {
    let stripped = script_hash.strip_prefix("0x").unwrap_or(script_hash);
    let mut bytes = hex::decode(stripped)
        .map_err(|e| Error::invalid_input(format!("invalid script hash '{script_hash}': {e}")))?;
    if bytes.len() != 20 {
        return Err(Error::invalid_input(format!(
            "invalid script hash '{script_hash}': expected 20 bytes, got {}",
            bytes.len()
        )));
    }
    bytes.reverse();
    Ok(bs58::encode(bytes)
        .with_check_version(ADDRESS_VERSION)
        .into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn address_round_trips_through_the_codec() {
        let script_hash = format!("0x{}", hex::encode([0xab_u8; 20]));
        let address = encode_script_hash(&script_hash).unwrap();
        assert_eq!(decode_address(&address).unwrap(), script_hash);
    }

    #[test]
    fn provider_conversions_round_trip() {
        let config = NetworkConfig {
            account_address: None,
            ..NetworkConfig::default()
        };
        let provider = RpcProvider::new(&config).unwrap();

        let script_hash = format!("0x{}", hex::encode((1u8..=20).collect::<Vec<u8>>()));
        tokio_test::block_on(async {
            let address = provider.script_hash_to_address(&script_hash).await.unwrap();
            let back = provider.address_to_script_hash(&address).await.unwrap();
            assert_eq!(back, script_hash);
        });
    }

    #[test]
    fn mangled_addresses_are_rejected() {
        assert!(decode_address("not-an-address").is_err());
        // Valid base58 but wrong version byte (Bitcoin-style address).
        assert!(decode_address("1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2").is_err());
    }

    #[test]
    fn short_script_hashes_are_rejected() {
        assert!(encode_script_hash("0xabcd").is_err());
    }

    #[test]
    fn scope_bitmask_maps_to_rpc_names() {
        assert_eq!(scope_names(scopes::NONE), "None");
        assert_eq!(scope_names(scopes::CALLED_BY_ENTRY), "CalledByEntry");
        assert_eq!(scope_names(scopes::CUSTOM_CONTRACTS), "CustomContracts");
        assert_eq!(
            scope_names(scopes::CALLED_BY_ENTRY | scopes::CUSTOM_GROUPS),
            "CalledByEntry,CustomGroups"
        );
        assert_eq!(scope_names(scopes::GLOBAL), "Global");
    }

    #[test]
    fn gas_amounts_are_scaled_to_whole_units() {
        let (symbol, amount) = describe_asset(GAS_CONTRACT, "1740810000");
        assert_eq!(symbol, "GAS");
        assert_eq!(amount, "17.4081");
    }

    #[test]
    fn oversized_node_amounts_pass_through_unscaled() {
        // Larger than Decimal's 96-bit mantissa; a node could send this.
        let huge = "100000000000000000000000000000000";
        assert_eq!(scale_amount(huge, 8), huge);
        assert_eq!(scale_amount("not-a-number", 8), "not-a-number");
    }
}

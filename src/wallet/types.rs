//! Request and response envelopes for contract invocation.
//!
//! These are the fixed shapes a wallet provider expects: tagged
//! arguments, signers with witness scopes, and the invoke/invokeRead
//! parameter and response objects. They have no lifecycle of their
//! own; they are built per call, handed to the provider, and dropped.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire type tag for a contract call argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgType {
    String,
    Boolean,
    Hash160,
    Hash256,
    Integer,
    ByteArray,
    Array,
    Address,
    Any,
}

/// The value carried by an argument.
///
/// Integers travel as strings; the provider performs the actual
/// on-chain serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Text(String),
    List(Vec<Argument>),
}

/// A tagged contract call argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    pub value: ArgValue,
}

impl Argument {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            arg_type: ArgType::String,
            value: ArgValue::Text(value.into()),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            arg_type: ArgType::Boolean,
            value: ArgValue::Bool(value),
        }
    }

    /// Integer argument. The value is always stringified, whether it
    /// arrives as a number or as a numeric string.
    pub fn integer(value: impl ToString) -> Self {
        Self {
            arg_type: ArgType::Integer,
            value: ArgValue::Text(value.to_string()),
        }
    }

    pub fn address(value: impl Into<String>) -> Self {
        Self {
            arg_type: ArgType::Address,
            value: ArgValue::Text(value.into()),
        }
    }

    pub fn hash160(value: impl Into<String>) -> Self {
        Self {
            arg_type: ArgType::Hash160,
            value: ArgValue::Text(value.into()),
        }
    }

    pub fn hash256(value: impl Into<String>) -> Self {
        Self {
            arg_type: ArgType::Hash256,
            value: ArgValue::Text(value.into()),
        }
    }

    pub fn byte_array(value: impl Into<String>) -> Self {
        Self {
            arg_type: ArgType::ByteArray,
            value: ArgValue::Text(value.into()),
        }
    }

    pub fn array(values: Vec<Argument>) -> Self {
        Self {
            arg_type: ArgType::Array,
            value: ArgValue::List(values),
        }
    }

    pub fn any() -> Self {
        Self {
            arg_type: ArgType::Any,
            value: ArgValue::Null,
        }
    }
}

/// Witness scope constants.
///
/// Scopes form a bitmask describing which contracts a transaction's
/// authorization extends to.
pub mod scopes {
    /// No contracts allowed.
    pub const NONE: u8 = 0;
    /// Only the entry contract (recommended default).
    pub const CALLED_BY_ENTRY: u8 = 1;
    /// Specific contracts.
    pub const CUSTOM_CONTRACTS: u8 = 16;
    /// Specific contract groups.
    pub const CUSTOM_GROUPS: u8 = 32;
    /// Custom witness rules.
    pub const WITNESS_RULES: u8 = 64;
    /// All contracts (high risk).
    pub const GLOBAL: u8 = 128;
}

/// Authorization for a single call: which account signs and how far
/// that signature reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    /// Script hash of the signing account.
    pub account: String,
    /// Witness scope bitmask.
    pub scopes: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_contracts: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_groups: Option<Vec<String>>,
}

impl Signer {
    /// Signer with the CalledByEntry scope (the common case).
    pub fn called_by_entry(script_hash: impl Into<String>) -> Self {
        Self {
            account: script_hash.into(),
            scopes: scopes::CALLED_BY_ENTRY,
            allowed_contracts: None,
            allowed_groups: None,
        }
    }

    /// Signer whose witness extends to an explicit contract list.
    pub fn custom_contracts(
        script_hash: impl Into<String>,
        allowed_contracts: Vec<String>,
    ) -> Self {
        Self {
            account: script_hash.into(),
            scopes: scopes::CUSTOM_CONTRACTS,
            allowed_contracts: Some(allowed_contracts),
            allowed_groups: None,
        }
    }
}

/// Parameters for a read-only contract invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeReadParams {
    pub script_hash: String,
    pub operation: String,
    pub args: Vec<Argument>,
    pub signers: Vec<Signer>,
}

/// Parameters for a state-changing contract invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvokeParams {
    pub script_hash: String,
    pub operation: String,
    pub args: Vec<Argument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_system_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub override_system_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast_override: Option<bool>,
    pub signers: Vec<Signer>,
}

impl InvokeParams {
    /// Invocation parameters with no fee overrides.
    pub fn new(
        script_hash: impl Into<String>,
        operation: impl Into<String>,
        args: Vec<Argument>,
        signers: Vec<Signer>,
    ) -> Self {
        Self {
            script_hash: script_hash.into(),
            operation: operation.into(),
            args,
            fee: None,
            extra_system_fee: None,
            override_system_fee: None,
            broadcast_override: None,
            signers,
        }
    }
}

/// One item on the VM result stack.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StackItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub value: Value,
}

impl StackItem {
    /// Interpret this item as an integer, if possible.
    pub fn as_integer(&self) -> Option<i128> {
        match &self.value {
            Value::String(s) => s.parse().ok(),
            Value::Number(n) => n.as_i64().map(i128::from),
            Value::Bool(b) => Some(i128::from(*b)),
            _ => None,
        }
    }
}

/// Response to a read-only invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvokeReadResponse {
    #[serde(default)]
    pub script: String,
    /// VM execution state, `HALT` on success.
    pub state: String,
    #[serde(rename = "gasconsumed", alias = "gas_consumed")]
    pub gas_consumed: String,
    #[serde(default)]
    pub exception: Option<String>,
    #[serde(default)]
    pub stack: Vec<StackItem>,
    /// Signed transaction, present when the provider also signed.
    #[serde(default)]
    pub tx: Option<String>,
}

impl InvokeReadResponse {
    /// Whether the VM halted normally.
    pub fn halted(&self) -> bool {
        self.state.starts_with("HALT")
    }

    /// The first stack item as an integer, the shape every market read
    /// operation returns.
    pub fn first_integer(&self) -> Result<i128> {
        if !self.halted() {
            let description = self
                .exception
                .clone()
                .unwrap_or_else(|| format!("execution ended in {}", self.state));
            return Err(Error::Provider { description });
        }
        self.stack
            .first()
            .and_then(StackItem::as_integer)
            .ok_or_else(|| Error::provider("result stack held no integer"))
    }
}

/// Response to a state-changing invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvokeResponse {
    pub txid: String,
    #[serde(rename = "nodeURL", default)]
    pub node_url: Option<String>,
    #[serde(rename = "signedTx", default)]
    pub signed_tx: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn integer_argument_stringifies_numbers() {
        let arg = Argument::integer(42);
        assert_eq!(arg.arg_type, ArgType::Integer);
        assert_eq!(arg.value, ArgValue::Text("42".into()));
    }

    #[test]
    fn integer_argument_stringifies_numeric_strings() {
        for input in ["0", "100000000", "-7"] {
            let arg = Argument::integer(input);
            assert_eq!(arg.value, ArgValue::Text(input.into()));
        }
        assert_eq!(
            Argument::integer(343638u64).value,
            ArgValue::Text("343638".into())
        );
    }

    #[test]
    fn called_by_entry_signer_has_scope_one() {
        let signer = Signer::called_by_entry("0xabc");
        assert_eq!(signer.scopes, 1);
        assert_eq!(signer.allowed_contracts, None);
    }

    #[test]
    fn custom_contracts_signer_preserves_contract_list() {
        let contracts = vec!["0x11".to_string(), "0x22".to_string()];
        let signer = Signer::custom_contracts("0xabc", contracts.clone());
        assert_eq!(signer.scopes, 16);
        assert_eq!(signer.allowed_contracts, Some(contracts));
    }

    #[test]
    fn arguments_serialize_to_the_provider_wire_shape() {
        let arg = Argument::array(vec![
            Argument::integer(1),
            Argument::hash160("0xdeadbeef"),
            Argument::any(),
        ]);
        let wire = serde_json::to_value(&arg).unwrap();
        assert_eq!(
            wire,
            json!({
                "type": "Array",
                "value": [
                    {"type": "Integer", "value": "1"},
                    {"type": "Hash160", "value": "0xdeadbeef"},
                    {"type": "Any", "value": null},
                ]
            })
        );
    }

    #[test]
    fn signer_serializes_camel_case_and_skips_empty_fields() {
        let wire = serde_json::to_value(Signer::custom_contracts("0xabc", vec!["0x11".into()]))
            .unwrap();
        assert_eq!(
            wire,
            json!({"account": "0xabc", "scopes": 16, "allowedContracts": ["0x11"]})
        );
    }

    #[test]
    fn read_response_first_integer() {
        let response: InvokeReadResponse = serde_json::from_value(json!({
            "script": "VgEMFA==",
            "state": "HALT",
            "gasconsumed": "997782",
            "stack": [{"type": "Integer", "value": "343638"}]
        }))
        .unwrap();
        assert_eq!(response.first_integer().unwrap(), 343638);
    }

    #[test]
    fn faulted_read_response_surfaces_the_exception() {
        let response: InvokeReadResponse = serde_json::from_value(json!({
            "state": "FAULT",
            "gasconsumed": "0",
            "exception": "Invalid end time!",
            "stack": []
        }))
        .unwrap();
        let err = response.first_integer().unwrap_err();
        assert!(matches!(err, Error::Provider { description } if description == "Invalid end time!"));
    }
}

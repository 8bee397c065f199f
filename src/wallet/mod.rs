//! Wallet adapter.
//!
//! Translates domain-level requests into the argument/signer/params
//! shapes a wallet provider understands, and carries the provider
//! capability trait plus its JSON-RPC implementation.

mod provider;
mod rpc;
mod session;
mod types;

pub use provider::{find_gas_balance, Account, BalanceMap, TokenBalance, WalletProvider};
pub use rpc::{decode_address, encode_script_hash, RpcProvider};
pub use session::WalletSession;
pub use types::{
    scopes, ArgType, ArgValue, Argument, InvokeParams, InvokeReadParams, InvokeReadResponse,
    InvokeResponse, Signer, StackItem,
};

#[cfg(test)]
pub use provider::MockWalletProvider;

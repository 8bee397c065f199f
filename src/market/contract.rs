//! Typed operations against the on-chain prediction-market contract.
//!
//! Each operation converts the caller and contract addresses to script
//! hashes, assembles the fixed argument list for the named contract
//! operation, and hands the envelope to the wallet provider. Nothing
//! here retries or recovers; provider failures bubble to the caller.

use crate::error::Result;
use crate::wallet::{Argument, InvokeParams, InvokeReadParams, Signer, WalletProvider};
use std::fmt;
use std::sync::Arc;

/// The side of a market a vote lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteOutcome {
    Yes,
    No,
}

impl VoteOutcome {
    /// Encoding the contract's `vote` operation expects.
    pub fn contract_value(self) -> u8 {
        match self {
            Self::Yes => 1,
            Self::No => 0,
        }
    }
}

impl fmt::Display for VoteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

/// Handle to one deployed prediction-market contract.
pub struct QuestContract {
    provider: Arc<dyn WalletProvider>,
    contract_address: String,
}

impl QuestContract {
    pub fn new(provider: Arc<dyn WalletProvider>, contract_address: impl Into<String>) -> Self {
        Self {
            provider,
            contract_address: contract_address.into(),
        }
    }

    /// Total value locked in a market.
    pub async fn tvl(&self, user_address: &str, market_id: u32) -> Result<i128> {
        self.read(user_address, "viewTVL", vec![Argument::integer(market_id)])
            .await
    }

    /// Accumulated stake on the Yes side.
    pub async fn total_yes_points(&self, user_address: &str, market_id: u32) -> Result<i128> {
        self.read(
            user_address,
            "totalYesPoint",
            vec![Argument::integer(market_id)],
        )
        .await
    }

    /// Accumulated stake on the No side.
    pub async fn total_no_points(&self, user_address: &str, market_id: u32) -> Result<i128> {
        self.read(
            user_address,
            "totalNoPoint",
            vec![Argument::integer(market_id)],
        )
        .await
    }

    /// What the caller would earn if the given outcome resolves.
    pub async fn potential_reward(
        &self,
        user_address: &str,
        market_id: u32,
        outcome: VoteOutcome,
        amount: u64,
    ) -> Result<i128> {
        self.read(
            user_address,
            "potentialReward",
            vec![
                Argument::integer(market_id),
                Argument::integer(outcome.contract_value()),
                Argument::integer(amount),
            ],
        )
        .await
    }

    /// Stake `amount` on an outcome. Returns the transaction id.
    pub async fn vote(
        &self,
        user_address: &str,
        market_id: u32,
        outcome: VoteOutcome,
        amount: u64,
    ) -> Result<String> {
        let user_hash = self.provider.address_to_script_hash(user_address).await?;
        let contract_hash = self
            .provider
            .address_to_script_hash(&self.contract_address)
            .await?;

        let params = InvokeParams::new(
            contract_hash,
            "vote",
            vec![
                Argument::hash160(user_hash.clone()),
                Argument::integer(amount),
                Argument::array(vec![
                    Argument::integer(market_id),
                    Argument::integer(outcome.contract_value()),
                ]),
            ],
            vec![Signer::called_by_entry(user_hash)],
        );

        let response = self.provider.invoke(params).await?;
        Ok(response.txid)
    }

    /// Open a new market. `end_time_ms` is a millisecond timestamp.
    pub async fn create_market(
        &self,
        user_address: &str,
        title: &str,
        description: &str,
        end_time_ms: i64,
    ) -> Result<String> {
        let user_hash = self.provider.address_to_script_hash(user_address).await?;
        let contract_hash = self
            .provider
            .address_to_script_hash(&self.contract_address)
            .await?;

        let params = InvokeParams::new(
            contract_hash,
            "createMarket",
            vec![
                Argument::string(title),
                Argument::string(description),
                Argument::integer(end_time_ms),
            ],
            vec![Signer::called_by_entry(user_hash)],
        );

        let response = self.provider.invoke(params).await?;
        Ok(response.txid)
    }

    async fn read(
        &self,
        user_address: &str,
        operation: &str,
        args: Vec<Argument>,
    ) -> Result<i128> {
        let user_hash = self.provider.address_to_script_hash(user_address).await?;
        let contract_hash = self
            .provider
            .address_to_script_hash(&self.contract_address)
            .await?;

        let params = InvokeReadParams {
            script_hash: contract_hash,
            operation: operation.to_string(),
            args,
            signers: vec![Signer::called_by_entry(user_hash)],
        };

        let response = self.provider.invoke_read(params).await?;
        response.first_integer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::{ArgValue, InvokeReadResponse, InvokeResponse, MockWalletProvider};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const USER: &str = "NiHURBS9QgbFpYNjfFLBSRcQCvC2L2FTFg";
    const CONTRACT: &str = "NZs2zXSPuuv9ZF6TDGSWT1RBmE8rfGj7UW";

    fn mock_conversions(provider: &mut MockWalletProvider) {
        provider
            .expect_address_to_script_hash()
            .returning(|address| Ok(format!("0x{address}")));
    }

    fn integer_response(value: &str) -> InvokeReadResponse {
        serde_json::from_value(json!({
            "state": "HALT",
            "gasconsumed": "997782",
            "stack": [{"type": "Integer", "value": value}]
        }))
        .unwrap()
    }

    #[test]
    fn yes_points_reads_the_expected_operation() {
        let mut provider = MockWalletProvider::new();
        mock_conversions(&mut provider);
        provider
            .expect_invoke_read()
            .once()
            .withf(|params| {
                params.operation == "totalYesPoint"
                    && params.script_hash == format!("0x{CONTRACT}")
                    && params.args == vec![Argument::integer(1)]
                    && params.signers == vec![Signer::called_by_entry(format!("0x{USER}"))]
            })
            .returning(|_| Ok(integer_response("343638")));

        let contract = QuestContract::new(Arc::new(provider), CONTRACT);
        let points = tokio_test::block_on(contract.total_yes_points(USER, 1)).unwrap();
        assert_eq!(points, 343638);
    }

    #[test]
    fn no_points_reads_the_expected_operation() {
        let mut provider = MockWalletProvider::new();
        mock_conversions(&mut provider);
        provider
            .expect_invoke_read()
            .once()
            .withf(|params| params.operation == "totalNoPoint")
            .returning(|_| Ok(integer_response("368354")));

        let contract = QuestContract::new(Arc::new(provider), CONTRACT);
        let points = tokio_test::block_on(contract.total_no_points(USER, 1)).unwrap();
        assert_eq!(points, 368354);
    }

    #[test]
    fn potential_reward_encodes_the_outcome() {
        let mut provider = MockWalletProvider::new();
        mock_conversions(&mut provider);
        provider
            .expect_invoke_read()
            .once()
            .withf(|params| {
                params.operation == "potentialReward"
                    && params.args
                        == vec![
                            Argument::integer(1),
                            Argument::integer(0),
                            Argument::integer(25),
                        ]
            })
            .returning(|_| Ok(integer_response("51")));

        let contract = QuestContract::new(Arc::new(provider), CONTRACT);
        let reward =
            tokio_test::block_on(contract.potential_reward(USER, 1, VoteOutcome::No, 25)).unwrap();
        assert_eq!(reward, 51);
    }

    #[test]
    fn vote_builds_the_nested_argument_list() {
        let mut provider = MockWalletProvider::new();
        mock_conversions(&mut provider);
        provider
            .expect_invoke()
            .once()
            .withf(|params| {
                let user_hash = format!("0x{USER}");
                params.operation == "vote"
                    && params.fee.is_none()
                    && params.args[0] == Argument::hash160(user_hash.clone())
                    && params.args[1] == Argument::integer(5)
                    && params.args[2].value
                        == ArgValue::List(vec![Argument::integer(1), Argument::integer(1)])
                    && params.signers == vec![Signer::called_by_entry(user_hash)]
            })
            .returning(|_| {
                Ok(InvokeResponse {
                    txid: "0xfeed".into(),
                    node_url: None,
                    signed_tx: None,
                })
            });

        let contract = QuestContract::new(Arc::new(provider), CONTRACT);
        let txid =
            tokio_test::block_on(contract.vote(USER, 1, VoteOutcome::Yes, 5)).unwrap();
        assert_eq!(txid, "0xfeed");
    }

    #[test]
    fn create_market_passes_title_description_and_deadline() {
        let mut provider = MockWalletProvider::new();
        mock_conversions(&mut provider);
        provider
            .expect_invoke()
            .once()
            .withf(|params| {
                params.operation == "createMarket"
                    && params.args
                        == vec![
                            Argument::string("BTC > 100k?"),
                            Argument::string("Resolves Yes if bitcoin trades above 100k."),
                            Argument::integer(1_767_139_200_000i64),
                        ]
            })
            .returning(|_| {
                Ok(InvokeResponse {
                    txid: "0xbeef".into(),
                    node_url: None,
                    signed_tx: None,
                })
            });

        let contract = QuestContract::new(Arc::new(provider), CONTRACT);
        let txid = tokio_test::block_on(contract.create_market(
            USER,
            "BTC > 100k?",
            "Resolves Yes if bitcoin trades above 100k.",
            1_767_139_200_000,
        ))
        .unwrap();
        assert_eq!(txid, "0xbeef");
    }

    #[test]
    fn provider_failures_propagate_unchanged() {
        let mut provider = MockWalletProvider::new();
        mock_conversions(&mut provider);
        provider
            .expect_invoke_read()
            .once()
            .returning(|_| Err(crate::Error::ConnectionDenied));

        let contract = QuestContract::new(Arc::new(provider), CONTRACT);
        let result = tokio_test::block_on(contract.tvl(USER, 1));
        assert!(matches!(result, Err(crate::Error::ConnectionDenied)));
    }
}

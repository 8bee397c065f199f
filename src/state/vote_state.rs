//! Vote submission state and its guards.

use super::WalletState;
use crate::market::VoteOutcome;
use rust_decimal::Decimal;

/// Why a vote submission is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteBlock {
    NotConnected,
    NoOutcome,
    ZeroAmount,
    ExceedsBalance,
}

impl std::fmt::Display for VoteBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "Connect a wallet before voting"),
            Self::NoOutcome => write!(f, "Select Yes or No first"),
            Self::ZeroAmount => write!(f, "Stake amount must be above zero"),
            Self::ExceedsBalance => write!(f, "Stake amount exceeds your GAS balance"),
        }
    }
}

/// State of the vote form.
#[derive(Debug)]
pub struct VoteState {
    /// Selected outcome, if any.
    pub outcome: Option<VoteOutcome>,
    /// Stake amount in whole GAS.
    pub amount: u64,
    /// Whether a vote is in flight. Doubles as the disabled-button flag.
    pub voting: bool,
    /// Last fetched potential reward.
    pub potential_reward: Option<i128>,
    /// Transaction id of the last submitted vote.
    pub last_txid: Option<String>,
}

impl Default for VoteState {
    fn default() -> Self {
        Self {
            outcome: None,
            amount: 1,
            voting: false,
            potential_reward: None,
            last_txid: None,
        }
    }
}

impl VoteState {
    /// The first guard that blocks submission, or `None` when the vote
    /// may proceed. No provider call is made while any guard holds.
    pub fn block_reason(&self, wallet: &WalletState) -> Option<VoteBlock> {
        if !wallet.connected {
            Some(VoteBlock::NotConnected)
        } else if self.outcome.is_none() {
            Some(VoteBlock::NoOutcome)
        } else if self.amount == 0 {
            Some(VoteBlock::ZeroAmount)
        } else if Decimal::from(self.amount) > wallet.gas_balance {
            Some(VoteBlock::ExceedsBalance)
        } else {
            None
        }
    }

    /// Whether the entered amount exceeds the last-known balance.
    pub fn exceeds_balance(&self, wallet: &WalletState) -> bool {
        Decimal::from(self.amount) > wallet.gas_balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn connected_wallet(balance: Decimal) -> WalletState {
        WalletState {
            connected: true,
            gas_balance: balance,
            ..Default::default()
        }
    }

    #[test]
    fn blocked_when_not_connected() {
        let vote = VoteState::default();
        let wallet = WalletState::default();
        assert_eq!(vote.block_reason(&wallet), Some(VoteBlock::NotConnected));
    }

    #[test]
    fn blocked_without_an_outcome() {
        let vote = VoteState::default();
        let wallet = connected_wallet(dec!(10));
        assert_eq!(vote.block_reason(&wallet), Some(VoteBlock::NoOutcome));
    }

    #[test]
    fn blocked_at_zero_amount() {
        let vote = VoteState {
            outcome: Some(VoteOutcome::Yes),
            amount: 0,
            ..Default::default()
        };
        let wallet = connected_wallet(dec!(10));
        assert_eq!(vote.block_reason(&wallet), Some(VoteBlock::ZeroAmount));
    }

    #[test]
    fn blocked_when_amount_exceeds_balance() {
        let vote = VoteState {
            outcome: Some(VoteOutcome::No),
            amount: 11,
            ..Default::default()
        };
        let wallet = connected_wallet(dec!(10.5));
        assert_eq!(vote.block_reason(&wallet), Some(VoteBlock::ExceedsBalance));
        assert!(vote.exceeds_balance(&wallet));
    }

    #[test]
    fn allowed_when_all_guards_pass() {
        let vote = VoteState {
            outcome: Some(VoteOutcome::Yes),
            amount: 10,
            ..Default::default()
        };
        let wallet = connected_wallet(dec!(10));
        assert_eq!(vote.block_reason(&wallet), None);
        assert!(!vote.exceeds_balance(&wallet));
    }
}

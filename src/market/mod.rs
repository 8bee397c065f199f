//! Market operations layer.
//!
//! Thin wrappers that shape domain requests ("yes-side total for
//! market 1", "vote Yes with 5 GAS") into wallet adapter envelopes.

mod contract;

pub use contract::{QuestContract, VoteOutcome};

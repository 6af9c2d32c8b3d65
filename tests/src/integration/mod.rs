//! # Integration Flows
//!
//! Exercises the trie, shard manager and scheduler together through their
//! public APIs only.

pub mod proof_flows;
pub mod rebalance_flows;
pub mod scheduler_flows;

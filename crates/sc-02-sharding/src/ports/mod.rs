//! # Ports Module
//!
//! Seams between the cross-shard protocol and shard storage.

pub mod outbound;

pub use outbound::TrieAccessor;

//! # Domain Errors
//!
//! Error types for the Sharding subsystem. Every variant is a local,
//! recoverable condition reported to the immediate caller.

use sc_01_merkle_trie::TrieError;
use thiserror::Error;

/// Position of a shard in the manager's ordered collection.
///
/// Indices are contiguous and reassigned on every split/merge, so an index
/// taken before a rebalance is not stable across it.
pub type ShardIndex = usize;

/// Hash type (32-byte SHA-256).
pub type Hash = sc_01_merkle_trie::Hash;

/// Sharding error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShardError {
    /// Shard index outside the current collection.
    #[error("Unknown shard: {index} (shard count {count})")]
    UnknownShard {
        /// Requested index
        index: ShardIndex,
        /// Shard count at the time of the request
        count: usize,
    },

    /// Source key has no inclusion proof in the source shard.
    #[error("source proof error: {0}")]
    SourceProof(#[source] TrieError),

    /// Destination key has no inclusion proof in the destination shard.
    #[error("destination proof error: {0}")]
    DestinationProof(#[source] TrieError),

    /// Embedded source proof does not verify against the recorded pre-root.
    #[error("invalid source pre-proof")]
    InvalidSourcePreProof,

    /// Embedded destination proof does not verify against the recorded pre-root.
    #[error("invalid dest pre-proof")]
    InvalidDestPreProof,

    /// Source shard pre- and post-roots are identical.
    #[error("source root didn't change")]
    SourceRootUnchanged,

    /// Destination shard pre- and post-roots are identical.
    #[error("dest root didn't change")]
    DestRootUnchanged,

    /// A rebalance proof whose pre/post snapshots do not fit its operation.
    #[error("Inconsistent rebalance proof: {0}")]
    InconsistentRebalance(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

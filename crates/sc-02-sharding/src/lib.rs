//! # SC-02 Sharding
//!
//! Partitioned key/value state with per-shard Merkle commitments.
//!
//! **Subsystem ID:** 2  
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Spread writes across a dynamically resized set of shards:
//! - FNV-1a routing of keys to shards (`hash(key) % shard_count`)
//! - Variance-driven split/merge rebalancing with before/after root snapshots
//! - Cross-shard transfer proofs built from two single-shard inclusion proofs
//! - Global root aggregation over all shard roots
//!
//! ## Consistency Model
//!
//! | Operation | Guard | Guarantee |
//! |-----------|-------|-----------|
//! | `apply_tx` | write | routing and trie write happen atomically |
//! | `rebalance_with_proof` | write, held throughout | pre/post roots are a true before/after pair |
//! | `generate_cross_proof` | write, held throughout | no write lands between pre- and post-roots |
//! | `shard_index`, `shard_roots`, `collect_stats` | read | consistent snapshot |
//!
//! ## Known Gap: Routing vs Placement
//!
//! Split partitions keys by the high bit of their first byte, while routing
//! uses `hash(key) % shard_count`. After a split a key can live in a shard
//! that routing no longer points at. `ShardManager::locate` scans physically
//! and always finds it; `ShardManager::get` follows routing and may not.
//!
//! ## Module Structure
//!
//! ```text
//! sc-02-sharding/
//! ├── domain/          # Shard, RebalanceProof, CrossProof, config, errors
//! ├── algorithms/      # Routing, rebalance planning, cross-shard proofs, global root
//! ├── ports/           # TrieAccessor seam used by the cross-shard protocol
//! └── service/         # ShardManager
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use algorithms::{
    build_global_root, fnv1a_32, generate_cross_proof, index_of_max, mean_variance,
    partition_for_split, plan_rebalance, route_key, two_min_indices, RebalancePlan,
};
pub use domain::{
    invariant_contiguous_indices, invariant_deterministic_routing, invariant_no_data_loss,
    CrossProof, Hash, RebalanceOp, RebalanceProof, Shard, ShardError, ShardIndex,
    ShardingConfig, DEFAULT_MAX_SHARD_COUNT, MIN_SHARD_COUNT,
};
pub use ports::TrieAccessor;
pub use service::ShardManager;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

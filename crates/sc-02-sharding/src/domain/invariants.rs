//! # Domain Invariants
//!
//! Rules that must hold across routing and rebalancing.

use super::errors::ShardIndex;
use sc_01_merkle_trie::KeyValue;

/// Minimum shard count. A manager never drops below one shard.
pub const MIN_SHARD_COUNT: usize = 1;

/// Default cap on shard count; splits beyond it are skipped.
pub const DEFAULT_MAX_SHARD_COUNT: usize = 1024;

/// Invariant: routing is a pure function of key and current shard count.
pub fn invariant_deterministic_routing<F>(route_fn: F, key: &[u8], shard_count: usize) -> bool
where
    F: Fn(&[u8], usize) -> ShardIndex,
{
    let first = route_fn(key, shard_count);
    let second = route_fn(key, shard_count);
    first == second && (shard_count == 0 || first < shard_count)
}

/// Invariant: a rebalance neither loses nor duplicates key/value pairs.
///
/// Compares the multisets of pairs regardless of which shard held them.
pub fn invariant_no_data_loss(before: &[KeyValue], after: &[KeyValue]) -> bool {
    let mut before = before.to_vec();
    let mut after = after.to_vec();
    before.sort();
    after.sort();
    before == after
}

/// Invariant: reported indices address the collection they were taken from.
pub fn invariant_contiguous_indices(indices: &[ShardIndex], shard_count: usize) -> bool {
    indices.iter().all(|i| *i < shard_count)
}

//! # Key Routing
//!
//! `hash(key) % shard_count` with 32-bit FNV-1a as the hash.
//!
//! The result depends on the current shard count and is recomputed on every
//! call, so it changes whenever shards split or merge.

use crate::domain::ShardIndex;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a.
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, b| {
        (hash ^ u32::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// Shard index for `key` among `shard_count` shards. Zero shards routes to 0.
pub fn route_key(key: &[u8], shard_count: usize) -> ShardIndex {
    if shard_count == 0 {
        return 0;
    }
    fnv1a_32(key) as usize % shard_count
}

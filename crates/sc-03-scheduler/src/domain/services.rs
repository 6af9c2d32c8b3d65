//! Domain services for the Scheduler subsystem.
//!
//! Pure functions for the rotating active-shard window.

use sc_02_sharding::ShardIndex;

/// Shards active for a tick: `active_count` consecutive indices starting at
/// `cursor`, wrapping modulo `total`. Duplicates from wrapping are collapsed
/// and the result is ascending.
pub fn active_window(cursor: usize, active_count: usize, total: usize) -> Vec<ShardIndex> {
    if total == 0 {
        return Vec::new();
    }
    let mut active: Vec<ShardIndex> = (0..active_count.min(total))
        .map(|i| (cursor + i) % total)
        .collect();
    active.sort_unstable();
    active
}

/// Cursor for the next tick, reduced modulo the shard count seen this tick.
pub fn advance_cursor(cursor: usize, active_count: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (cursor + active_count) % total
}

//! # Rebalance Planning
//!
//! Decides split, merge or nothing from the population variance of the
//! per-shard mutation counters.
//!
//! | Condition | Action |
//! |-----------|--------|
//! | `variance > split_threshold` and below the shard cap | split the busiest shard |
//! | `variance < merge_threshold` and at least 2 shards | merge the two quietest shards |
//! | otherwise | nothing |
//!
//! Extremum ties go to the leftmost index under a linear scan.

use crate::domain::{RebalanceOp, ShardIndex};
use sc_01_merkle_trie::KeyValue;

/// Outcome of [`plan_rebalance`], before any shard is touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RebalancePlan {
    /// Chosen operation.
    pub operation: RebalanceOp,
    /// Indices to operate on (one for split, two ascending for merge).
    pub indices: Vec<ShardIndex>,
}

impl RebalancePlan {
    fn none() -> Self {
        Self {
            operation: RebalanceOp::None,
            indices: Vec::new(),
        }
    }
}

/// Population mean and variance. Empty input yields `(0.0, 0.0)`.
pub fn mean_variance(counters: &[u64]) -> (f64, f64) {
    if counters.is_empty() {
        return (0.0, 0.0);
    }
    let n = counters.len() as f64;
    let mean = counters.iter().map(|c| *c as f64).sum::<f64>() / n;
    let variance = counters
        .iter()
        .map(|c| {
            let d = *c as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    (mean, variance)
}

/// Leftmost index of the largest counter.
pub fn index_of_max(counters: &[u64]) -> Option<ShardIndex> {
    let mut best: Option<ShardIndex> = None;
    for (i, c) in counters.iter().enumerate() {
        if best.map_or(true, |b| *c > counters[b]) {
            best = Some(i);
        }
    }
    best
}

/// Indices of the two smallest counters, smallest first, leftmost on ties.
pub fn two_min_indices(counters: &[u64]) -> Option<(ShardIndex, ShardIndex)> {
    if counters.len() < 2 {
        return None;
    }
    let (mut min1, mut min2) = if counters[1] < counters[0] { (1, 0) } else { (0, 1) };
    for (i, c) in counters.iter().enumerate().skip(2) {
        if *c < counters[min1] {
            min2 = min1;
            min1 = i;
        } else if *c < counters[min2] {
            min2 = i;
        }
    }
    Some((min1, min2))
}

/// Choose the rebalance operation for the given counters.
///
/// `shard_cap` bounds growth: a split that would exceed it is dropped and
/// the plan is `None`.
pub fn plan_rebalance(
    counters: &[u64],
    split_threshold: f64,
    merge_threshold: f64,
    shard_cap: usize,
) -> RebalancePlan {
    let (_, variance) = mean_variance(counters);

    if variance > split_threshold {
        return match index_of_max(counters) {
            Some(i) if counters.len() < shard_cap => RebalancePlan {
                operation: RebalanceOp::Split,
                indices: vec![i],
            },
            _ => RebalancePlan::none(),
        };
    }

    if variance < merge_threshold {
        if let Some((a, b)) = two_min_indices(counters) {
            return RebalancePlan {
                operation: RebalanceOp::Merge,
                indices: vec![a.min(b), a.max(b)],
            };
        }
    }

    RebalancePlan::none()
}

/// Split a shard's pairs by the high bit of each key's first byte.
///
/// Keys whose first byte is below `0x80` go left; everything else, including
/// the empty key, goes right. This predicate is unrelated to `route_key`.
pub fn partition_for_split(entries: Vec<KeyValue>) -> (Vec<KeyValue>, Vec<KeyValue>) {
    entries
        .into_iter()
        .partition(|kv| kv.key.first().is_some_and(|b| b & 0x80 == 0))
}

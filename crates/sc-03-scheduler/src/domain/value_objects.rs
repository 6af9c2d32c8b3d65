//! Value objects reported by the tick loop.

use sc_02_sharding::{RebalanceOp, RebalanceProof, ShardIndex};
use serde::{Deserialize, Serialize};

/// Outcome of one tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick sequence number, starting at 1.
    pub tick: u64,
    /// Shards active during this tick, ascending.
    pub active: Vec<ShardIndex>,
    /// Transactions taken off the queue (the snapshot count at tick start).
    pub drained: usize,
    /// Transactions applied to an active shard.
    pub applied: usize,
    /// Transactions put back for a later tick.
    pub requeued: usize,
    /// Rebalance attempted after transaction processing.
    pub rebalance: RebalanceProof,
}

/// Totals accumulated over a run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Ticks executed.
    pub ticks: u64,
    /// Transactions applied.
    pub applied: u64,
    /// Re-queue events (one transaction may be counted several times).
    pub requeued: u64,
    /// Splits performed.
    pub splits: u64,
    /// Merges performed.
    pub merges: u64,
}

impl SchedulerStats {
    /// Fold one tick into the totals.
    pub fn record(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.applied += report.applied as u64;
        self.requeued += report.requeued as u64;
        match report.rebalance.operation {
            RebalanceOp::Split => self.splits += 1,
            RebalanceOp::Merge => self.merges += 1,
            RebalanceOp::None => {}
        }
    }
}

//! # Tick Loop
//!
//! Each tick:
//!
//! 1. Compute the active window from the cursor and the current shard count
//! 2. Drain the number of transactions queued at tick start
//! 3. Apply those routed to an active shard, re-queue the rest unchanged
//! 4. Run one rebalance so it sees this tick's mutation counts
//! 5. Advance the cursor by `active_count`
//!
//! Ticks run to completion; the duration deadline is only checked between
//! ticks.

use super::queue::TransactionQueue;
use crate::domain::{
    active_window, advance_cursor, SchedulerConfig, SchedulerError, SchedulerStats, TickReport,
    Transaction,
};
use sc_02_sharding::{Hash, ShardManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Time-sliced driver of a [`ShardManager`].
pub struct Scheduler {
    manager: Arc<ShardManager>,
    queue: Arc<TransactionQueue>,
    config: SchedulerConfig,
    cursor: usize,
    tick: u64,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Creates a scheduler over `manager` with an empty queue.
    pub fn new(manager: Arc<ShardManager>, config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate()?;
        let queue = Arc::new(TransactionQueue::new(config.queue_capacity));
        Ok(Self {
            manager,
            queue,
            config,
            cursor: 0,
            tick: 0,
            stats: SchedulerStats::default(),
        })
    }

    /// Producer handle for submitting transactions.
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            queue: Arc::clone(&self.queue),
        }
    }

    /// The driven shard manager.
    pub fn manager(&self) -> &Arc<ShardManager> {
        &self.manager
    }

    /// The pending-transaction queue.
    pub fn queue(&self) -> &Arc<TransactionQueue> {
        &self.queue
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Totals so far.
    pub fn stats(&self) -> &SchedulerStats {
        &self.stats
    }

    /// Execute one tick.
    pub fn tick(&mut self) -> TickReport {
        self.tick += 1;
        let total = self.manager.shard_count();
        let active = active_window(self.cursor, self.config.active_count, total);

        info!(
            "[sc-03] Tick {} | active shards {:?} of {}",
            self.tick, active, total
        );

        let drained = self.queue.len();
        let mut applied = 0;
        let mut requeued = 0;

        for _ in 0..drained {
            let Some(tx) = self.queue.pop() else { break };
            let (index, accepted) = self
                .manager
                .apply_tx_if(&tx.key, &tx.value, |i| active.binary_search(&i).is_ok());
            if accepted {
                self.queue.complete();
                applied += 1;
                debug!("[sc-03] Applied to shard {}: {}", index, tx);
            } else {
                debug!("[sc-03] Requeued for inactive shard {}", index);
                self.queue.requeue(tx);
                requeued += 1;
            }
        }

        let rebalance = self
            .manager
            .rebalance_with_proof(self.config.split_threshold, self.config.merge_threshold);
        if rebalance.changed() {
            info!(
                "[sc-03] Rebalance: {} on shards {:?} | pre {} | post {}",
                rebalance.operation,
                rebalance.shard_indices,
                join_short_hex(&rebalance.pre_roots),
                join_short_hex(&rebalance.post_roots)
            );
        }

        self.cursor = advance_cursor(self.cursor, self.config.active_count, total);

        let report = TickReport {
            tick: self.tick,
            active,
            drained,
            applied,
            requeued,
            rebalance,
        };
        self.stats.record(&report);
        report
    }

    /// Tick back-to-back until the queue is empty or `max_ticks` have run.
    pub fn tick_until_empty(&mut self, max_ticks: u64) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while !self.queue.is_empty() && (reports.len() as u64) < max_ticks {
            reports.push(self.tick());
        }
        reports
    }

    /// Tick every `tick_interval` until `duration` has elapsed.
    ///
    /// The first tick fires one interval after the call.
    pub async fn run(mut self, duration: Duration) -> SchedulerStats {
        let period = self.config.tick_interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let deadline = sleep(duration);
        tokio::pin!(deadline);

        info!(
            "[sc-03] Scheduler running for {:?} (tick {:?}, {} active)",
            duration, period, self.config.active_count
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut deadline => break,
                _ = ticker.tick() => {
                    self.tick();
                }
            }
        }

        info!(
            "[sc-03] Scheduler stopped after {} ticks: {} applied, {} still queued",
            self.stats.ticks,
            self.stats.applied,
            self.queue.len()
        );
        self.stats
    }

    /// Run on a background task.
    pub fn spawn(self, duration: Duration) -> JoinHandle<SchedulerStats> {
        tokio::spawn(self.run(duration))
    }
}

/// Cloneable producer side of a [`Scheduler`].
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    queue: Arc<TransactionQueue>,
}

impl SchedulerHandle {
    /// Enqueue a write, waiting while the queue is full.
    pub async fn submit(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), SchedulerError> {
        self.queue.submit(Transaction::new(key, value)).await
    }

    /// Enqueue a write or fail with `QueueFull`.
    pub fn try_submit(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), SchedulerError> {
        self.queue.try_submit(Transaction::new(key, value))
    }

    /// Transactions currently queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Stop accepting submissions.
    pub fn close(&self) {
        self.queue.close();
    }
}

fn join_short_hex(roots: &[Hash]) -> String {
    let parts: Vec<String> = roots.iter().map(|r| hex::encode(&r[..4])).collect();
    format!("[{}]", parts.join(" "))
}

//! # Scheduler Configuration
//!
//! | Parameter | Default | Meaning |
//! |-----------|---------|---------|
//! | `tick_interval` | 2 s | time between ticks |
//! | `active_count` | 2 | shards active per tick |
//! | `queue_capacity` | 1000 | pending transactions before `submit` waits |
//! | `split_threshold` | 2.0 | counter variance above which a shard splits |
//! | `merge_threshold` | 0.5 | counter variance below which two shards merge |

use super::errors::SchedulerError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default tick interval.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Default pending-queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Largest queue the capacity semaphore can represent.
pub const MAX_QUEUE_CAPACITY: usize = tokio::sync::Semaphore::MAX_PERMITS;

/// Tick loop configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Time between ticks.
    pub tick_interval: Duration,
    /// Width of the rotating active-shard window.
    pub active_count: usize,
    /// Bounded queue capacity.
    pub queue_capacity: usize,
    /// Variance above which the busiest shard is split.
    pub split_threshold: f64,
    /// Variance below which the two quietest shards are merged.
    pub merge_threshold: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            active_count: 2,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            split_threshold: 2.0,
            merge_threshold: 0.5,
        }
    }
}

impl SchedulerConfig {
    /// Create config for testing: fast ticks and no rebalancing.
    pub fn for_testing() -> Self {
        Self {
            tick_interval: Duration::from_millis(10),
            active_count: 2,
            queue_capacity: 256,
            split_threshold: f64::INFINITY,
            merge_threshold: f64::NEG_INFINITY,
        }
    }

    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.tick_interval.is_zero() {
            return Err(SchedulerError::ConfigError(
                "tick_interval must be non-zero".into(),
            ));
        }
        if self.active_count == 0 {
            return Err(SchedulerError::ConfigError(
                "active_count must be at least 1".into(),
            ));
        }
        if self.queue_capacity == 0 {
            return Err(SchedulerError::ConfigError(
                "queue_capacity must be at least 1".into(),
            ));
        }
        if self.queue_capacity > MAX_QUEUE_CAPACITY {
            return Err(SchedulerError::ConfigError(format!(
                "queue_capacity must be at most {MAX_QUEUE_CAPACITY}, got {}",
                self.queue_capacity
            )));
        }
        if self.split_threshold.is_nan() || self.merge_threshold.is_nan() {
            return Err(SchedulerError::ConfigError(
                "rebalance thresholds must be numbers".into(),
            ));
        }
        Ok(())
    }
}

/// Synthetic workload parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Keys to choose from uniformly.
    pub keys: Vec<String>,
    /// Random bytes per value.
    pub value_size: usize,
    /// Approximate submissions per second.
    pub rate_per_sec: u32,
    /// How long to keep submitting.
    pub duration: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            keys: [
                "alice", "bob", "charlie", "dave", "eve", "frank", "grace", "heidi", "ivan", "judy",
            ]
            .iter()
            .map(|k| k.to_string())
            .collect(),
            value_size: 16,
            rate_per_sec: 50,
            duration: Duration::from_secs(30),
        }
    }
}

impl WorkloadConfig {
    /// Interval between two submissions.
    pub fn period(&self) -> Duration {
        Duration::from_secs(1) / self.rate_per_sec.max(1)
    }

    /// Reject workloads that cannot produce a transaction.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.keys.is_empty() {
            return Err(SchedulerError::ConfigError(
                "workload needs at least one key".into(),
            ));
        }
        if self.rate_per_sec == 0 {
            return Err(SchedulerError::ConfigError(
                "rate_per_sec must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

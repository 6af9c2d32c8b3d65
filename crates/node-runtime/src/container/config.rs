//! # Node Configuration
//!
//! Unified configuration for one demo run, loaded from `SC_*` environment
//! variables on top of the subsystem defaults.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `SC_SHARD_COUNT` | `sharding.shard_count` | 4 |
//! | `SC_TICK_MS` | `scheduler.tick_interval` | 2000 |
//! | `SC_ACTIVE_COUNT` | `scheduler.active_count` | 2 |
//! | `SC_SPLIT_THRESHOLD` | `scheduler.split_threshold` | 2.0 |
//! | `SC_MERGE_THRESHOLD` | `scheduler.merge_threshold` | 0.5 |
//! | `SC_QUEUE_CAPACITY` | `scheduler.queue_capacity` | 1000 |
//! | `SC_WORKLOAD_RATE` | `workload.rate_per_sec` | 50 |
//! | `SC_RUN_SECS` | `workload.duration` | 30 |
//! | `SC_LOG_LEVEL` | `log_level` | `info` |
//!
//! Unparseable values are ignored with a warning.

use sc_02_sharding::{ShardError, ShardingConfig};
use sc_03_scheduler::{SchedulerConfig, SchedulerError, WorkloadConfig};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Shard manager configuration.
    pub sharding: ShardingConfig,
    /// Tick loop configuration.
    pub scheduler: SchedulerConfig,
    /// Synthetic workload configuration.
    pub workload: WorkloadConfig,
    /// Extra scheduler time after the workload stops, to drain the queue.
    pub drain_grace: Duration,
    /// `tracing` filter directive.
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            sharding: ShardingConfig::default(),
            scheduler: SchedulerConfig::default(),
            workload: WorkloadConfig::default(),
            drain_grace: Duration::from_secs(5),
            log_level: "info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Sharding parameters rejected.
    #[error("sharding: {0}")]
    Sharding(#[from] ShardError),
    /// Scheduler or workload parameters rejected.
    #[error("scheduler: {0}")]
    Scheduler(#[from] SchedulerError),
}

impl NodeConfig {
    /// Load from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(n) = parse_var(&lookup, "SC_SHARD_COUNT") {
            config.sharding.shard_count = n;
        }
        if let Some(ms) = parse_var::<u64, _>(&lookup, "SC_TICK_MS") {
            config.scheduler.tick_interval = Duration::from_millis(ms);
        }
        if let Some(n) = parse_var(&lookup, "SC_ACTIVE_COUNT") {
            config.scheduler.active_count = n;
        }
        if let Some(t) = parse_var(&lookup, "SC_SPLIT_THRESHOLD") {
            config.scheduler.split_threshold = t;
        }
        if let Some(t) = parse_var(&lookup, "SC_MERGE_THRESHOLD") {
            config.scheduler.merge_threshold = t;
        }
        if let Some(n) = parse_var(&lookup, "SC_QUEUE_CAPACITY") {
            config.scheduler.queue_capacity = n;
        }
        if let Some(rate) = parse_var(&lookup, "SC_WORKLOAD_RATE") {
            config.workload.rate_per_sec = rate;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SC_RUN_SECS") {
            config.workload.duration = Duration::from_secs(secs);
        }
        if let Some(level) = lookup("SC_LOG_LEVEL") {
            config.log_level = level;
        }

        config
    }

    /// Log filter built from `log_level`, falling back to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|e| {
            warn!("SC_LOG_LEVEL {:?} rejected ({}), using info", self.log_level, e);
            EnvFilter::new("info")
        })
    }

    /// How long the scheduler runs: the workload plus the drain grace period.
    pub fn scheduler_duration(&self) -> Duration {
        self.workload.duration + self.drain_grace
    }

    /// Check every subsystem configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sharding.validate()?;
        self.scheduler.validate()?;
        self.workload.validate()?;
        Ok(())
    }

    /// Log the effective configuration.
    pub fn log_summary(&self) {
        info!(
            "Config: {} shards, tick {:?}, {} active, split > {}, merge < {}",
            self.sharding.shard_count,
            self.scheduler.tick_interval,
            self.scheduler.active_count,
            self.scheduler.split_threshold,
            self.scheduler.merge_threshold
        );
        info!(
            "Workload: {} keys, {} tx/s, {}-byte values for {:?}",
            self.workload.keys.len(),
            self.workload.rate_per_sec,
            self.workload.value_size,
            self.workload.duration
        );
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("{} has invalid value {:?}, using default", name, raw);
            None
        }
    }
}

//! # Sharding Configuration

use super::errors::ShardError;
use super::invariants::{DEFAULT_MAX_SHARD_COUNT, MIN_SHARD_COUNT};
use serde::{Deserialize, Serialize};

/// Shard manager configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShardingConfig {
    /// Initial number of shards.
    pub shard_count: usize,
    /// Splits are skipped once this many shards exist.
    pub max_shard_count: usize,
}

impl Default for ShardingConfig {
    fn default() -> Self {
        Self {
            shard_count: 4,
            max_shard_count: DEFAULT_MAX_SHARD_COUNT,
        }
    }
}

impl ShardingConfig {
    /// Create config for testing.
    pub fn for_testing() -> Self {
        Self {
            shard_count: 4,
            max_shard_count: 16,
        }
    }

    /// Reject configurations the manager cannot start from.
    pub fn validate(&self) -> Result<(), ShardError> {
        if self.shard_count < MIN_SHARD_COUNT {
            return Err(ShardError::ConfigError(format!(
                "shard_count must be at least {MIN_SHARD_COUNT}, got {}",
                self.shard_count
            )));
        }
        if self.max_shard_count < self.shard_count {
            return Err(ShardError::ConfigError(format!(
                "max_shard_count {} is below shard_count {}",
                self.max_shard_count, self.shard_count
            )));
        }
        Ok(())
    }
}

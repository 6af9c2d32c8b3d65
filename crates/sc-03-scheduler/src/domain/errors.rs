//! Scheduler error types.

use thiserror::Error;

/// Scheduler error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// Queue is at capacity and the caller asked not to wait.
    #[error("transaction queue full (capacity {capacity})")]
    QueueFull {
        /// Configured queue capacity.
        capacity: usize,
    },

    /// Queue has been closed; no further submissions are accepted.
    #[error("transaction queue closed")]
    QueueClosed,

    /// Invalid scheduler or workload configuration.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

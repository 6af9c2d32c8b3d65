//! # Inbound Port - TransactionSink
//!
//! The only thing a producer needs from the scheduler: a place to submit
//! key/value writes.

use crate::domain::SchedulerError;
use crate::service::SchedulerHandle;
use async_trait::async_trait;

/// Accepts writes for later application by the tick loop.
#[async_trait]
pub trait TransactionSink: Send + Sync {
    /// Submit one write, waiting for queue space if needed.
    ///
    /// # Errors
    /// - `QueueClosed`: the sink no longer accepts writes
    async fn submit(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), SchedulerError>;
}

#[async_trait]
impl TransactionSink for SchedulerHandle {
    async fn submit(&self, key: Vec<u8>, value: Vec<u8>) -> Result<(), SchedulerError> {
        SchedulerHandle::submit(self, key, value).await
    }
}

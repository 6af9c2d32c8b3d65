//! # Bounded Transaction Queue
//!
//! FIFO of pending transactions with capacity tracked by a
//! `tokio::sync::Semaphore`.
//!
//! ## Slot Accounting
//!
//! | Event | Permits |
//! |-------|---------|
//! | `submit` / `try_submit` | one taken and held by the transaction |
//! | `requeue` | unchanged, the transaction keeps its slot |
//! | `complete` | one returned |
//!
//! A transaction therefore occupies exactly one slot from submission until
//! it is applied, and re-queueing can never wait on producers.

use crate::domain::{SchedulerError, Transaction, MAX_QUEUE_CAPACITY};
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::{Semaphore, TryAcquireError};

const INITIAL_RESERVE: usize = 1024;

/// Bounded FIFO shared by producers and the tick loop.
#[derive(Debug)]
pub struct TransactionQueue {
    pending: Mutex<VecDeque<Transaction>>,
    slots: Semaphore,
    capacity: usize,
}

impl TransactionQueue {
    /// Creates an empty queue holding at most `capacity` transactions.
    ///
    /// `capacity` is clamped to [`MAX_QUEUE_CAPACITY`]; storage grows on
    /// demand rather than being reserved up front.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_QUEUE_CAPACITY);
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity.min(INITIAL_RESERVE))),
            slots: Semaphore::new(capacity),
            capacity,
        }
    }

    /// Enqueue, waiting for a free slot if the queue is full.
    pub async fn submit(&self, tx: Transaction) -> Result<(), SchedulerError> {
        let permit = self
            .slots
            .acquire()
            .await
            .map_err(|_| SchedulerError::QueueClosed)?;
        permit.forget();
        self.pending.lock().push_back(tx);
        Ok(())
    }

    /// Enqueue without waiting.
    pub fn try_submit(&self, tx: Transaction) -> Result<(), SchedulerError> {
        let permit = self.slots.try_acquire().map_err(|e| match e {
            TryAcquireError::NoPermits => SchedulerError::QueueFull {
                capacity: self.capacity,
            },
            TryAcquireError::Closed => SchedulerError::QueueClosed,
        })?;
        permit.forget();
        self.pending.lock().push_back(tx);
        Ok(())
    }

    /// Take the oldest transaction. Its slot stays reserved until
    /// [`complete`](Self::complete) or it is re-queued.
    pub fn pop(&self) -> Option<Transaction> {
        self.pending.lock().pop_front()
    }

    /// Put a popped transaction back at the tail, reusing its slot.
    pub fn requeue(&self, tx: Transaction) {
        self.pending.lock().push_back(tx);
    }

    /// Release the slot of a popped transaction that was applied.
    pub fn complete(&self) {
        self.slots.add_permits(1);
    }

    /// Stop accepting submissions. Waiting producers get `QueueClosed`.
    pub fn close(&self) {
        self.slots.close();
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.slots.is_closed()
    }

    /// Transactions currently queued.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Maximum number of transactions held at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

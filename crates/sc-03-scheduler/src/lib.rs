//! # SC-03 Scheduler
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Drives the shard manager on a fixed tick. Each tick activates a rotating
//! window of shards, applies queued writes that route to an active shard,
//! re-queues the rest, and runs one rebalance.
//!
//! ```text
//! producers ──submit──→ [TransactionQueue] ──tick──→ ShardManager
//!                              ↑                         │
//!                              └──── inactive shard ─────┘
//! ```
//!
//! ## Guarantees
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | No transaction dropped | `service/queue.rs` - re-queued txs keep their slot |
//! | Applied exactly once | `service/scheduler.rs` - routing and write under one guard |
//! | Drain is a snapshot | `Scheduler::tick` reads the queue length once |
//! | Rebalance sees this tick | rebalance runs after transaction processing |
//!
//! ## Module Structure
//!
//! ```text
//! sc-03-scheduler/
//! ├── domain/          # Transaction, configs, TickReport, window arithmetic
//! ├── ports/           # TransactionSink
//! └── service/         # TransactionQueue, Scheduler, workload generator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use domain::{
    active_window, advance_cursor, SchedulerConfig, SchedulerError, SchedulerStats, TickReport,
    Transaction, WorkloadConfig, DEFAULT_QUEUE_CAPACITY, DEFAULT_TICK_INTERVAL,
    MAX_QUEUE_CAPACITY,
};
pub use ports::TransactionSink;
pub use service::{
    run_workload, run_workload_with_rng, Scheduler, SchedulerHandle, TransactionQueue,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

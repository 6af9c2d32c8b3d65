//! Service layer for the Scheduler subsystem.

mod queue;
mod scheduler;
mod workload;

pub use queue::TransactionQueue;
pub use scheduler::{Scheduler, SchedulerHandle};
pub use workload::{run_workload, run_workload_with_rng};

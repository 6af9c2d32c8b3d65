//! Ports layer for the Scheduler subsystem.

pub mod inbound;

pub use inbound::TransactionSink;

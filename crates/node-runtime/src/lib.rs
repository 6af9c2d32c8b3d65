//! # Node Runtime Library
//!
//! Exposes the demo runtime for testing. The entry point is the `main.rs`
//! binary.
//!
//! - `container/` - `NodeConfig` loaded from `SC_*` environment variables
//! - `runtime` - `NodeRuntime`, the phased demo over one shard manager

#![warn(missing_docs)]

pub mod container;
pub mod runtime;

pub use container::{ConfigError, NodeConfig};
pub use runtime::{NodeRuntime, RunSummary};

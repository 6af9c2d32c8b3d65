//! Runtime configuration container.

pub mod config;

pub use config::{ConfigError, NodeConfig};

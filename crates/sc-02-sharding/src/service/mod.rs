//! # Service Layer
//!
//! Lock-owning facade over the sharding algorithms.

mod shard_manager;

pub use shard_manager::ShardManager;

//! # Algorithms Module
//!
//! Core algorithms for the sharding subsystem.

pub mod cross_shard;
pub mod global_state;
pub mod rebalance;
pub mod routing;

pub use cross_shard::generate_cross_proof;
pub use global_state::build_global_root;
pub use rebalance::{
    index_of_max, mean_variance, partition_for_split, plan_rebalance, two_min_indices,
    RebalancePlan,
};
pub use routing::{fnv1a_32, route_key};

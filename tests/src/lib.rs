//! # Sharded State Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks per subsystem
//! │   ├── sc_01_merkle_trie.rs
//! │   └── sc_02_sharding.rs
//! │
//! └── integration/      # Cross-subsystem flows
//!     ├── proof_flows.rs
//!     ├── rebalance_flows.rs
//!     └── scheduler_flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p sc-tests
//!
//! # By category
//! cargo test -p sc-tests integration::
//!
//! # Benchmarks
//! cargo bench -p sc-tests
//! ```

pub mod integration;

//! # sc-01-merkle-trie
//!
//! Byte-keyed Merkle trie for the ShardedChain state engine.
//!
//! ## Role in System
//!
//! - **Commitment**: every shard owns one trie; its root hash commits to the
//!   shard's entire key/value content
//! - **Inclusion Proofs**: `TrieNode::get_proof` + `verify_proof` let a verifier
//!   recompute a root from one leaf and its sibling hashes
//! - **Transport**: `CompressedProof` flattens a proof into sorted vectors and
//!   encodes it with bincode
//!
//! ## Content Hash
//!
//! ```text
//! H(node) = SHA-256( [0x00 ‖ value]?  ‖  for label in sorted(children): 0x01 ‖ label ‖ H(child) )
//! ```
//!
//! Children are always folded in ascending edge-label order, so the root is
//! independent of insertion history.

pub mod domain;

pub use domain::*;

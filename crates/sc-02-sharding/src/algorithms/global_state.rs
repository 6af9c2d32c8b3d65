//! # Global State Root
//!
//! One SHA-256 pass over all shard roots in index order, each prefixed with
//! its length as 2 big-endian bytes.

use crate::domain::Hash;
use sha2::{Digest, Sha256};

/// Aggregate shard roots into a single commitment.
///
/// The length prefix keeps the encoding unambiguous; lengths above
/// `u16::MAX` keep only their low 16 bits.
pub fn build_global_root<R: AsRef<[u8]>>(shard_roots: &[R]) -> Hash {
    let mut hasher = Sha256::new();
    for root in shard_roots {
        let root = root.as_ref();
        hasher.update((root.len() as u16).to_be_bytes());
        hasher.update(root);
    }
    hasher.finalize().into()
}

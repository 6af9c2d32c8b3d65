//! # Cross-Shard Proof Protocol
//!
//! Wraps a two-key transfer in a pair of pre-state inclusion proofs and the
//! roots of both shards before and after the write.
//!
//! ## Sequence
//!
//! 1. Read both pre-roots
//! 2. Prove `key_from` in the source shard and `key_to` in the destination
//! 3. Write `amount` at both keys
//! 4. Read both post-roots
//!
//! ## Value Contract
//!
//! The value written at both keys is `amount` exactly as supplied. Callers
//! that want balance semantics (source minus amount, destination plus amount)
//! must pass already-adjusted values. The verifier checks pre-state validity
//! and that both roots moved, nothing about the arithmetic.

use crate::domain::{CrossProof, Hash, ShardError, ShardIndex};
use crate::ports::TrieAccessor;
use sc_01_merkle_trie::Proof;
use tracing::debug;

/// Generate a [`CrossProof`] for a transfer from `key_from` in `src_shard`
/// to `key_to` in `dst_shard`.
///
/// `src_shard == dst_shard` is allowed; both writes land in the same trie.
///
/// # Errors
///
/// - `ShardError::UnknownShard` if either index is out of range
/// - `ShardError::SourceProof` / `ShardError::DestinationProof` if either key is absent;
///   nothing is written in that case
pub fn generate_cross_proof<A>(
    accessor: &mut A,
    src_shard: ShardIndex,
    dst_shard: ShardIndex,
    key_from: &[u8],
    key_to: &[u8],
    amount: &[u8],
) -> Result<CrossProof, ShardError>
where
    A: TrieAccessor + ?Sized,
{
    let pre_src_root = accessor.trie(src_shard)?.root_hash();
    let pre_dst_root = accessor.trie(dst_shard)?.root_hash();

    let src_proof = accessor
        .trie(src_shard)?
        .get_proof(key_from)
        .map_err(ShardError::SourceProof)?;
    let dst_proof = accessor
        .trie(dst_shard)?
        .get_proof(key_to)
        .map_err(ShardError::DestinationProof)?;

    accessor.trie_mut(src_shard)?.insert(key_from, amount.to_vec());
    accessor.trie_mut(dst_shard)?.insert(key_to, amount.to_vec());

    let post_src_root = accessor.trie(src_shard)?.root_hash();
    let post_dst_root = accessor.trie(dst_shard)?.root_hash();

    debug!(
        "[sc-02] Cross-shard transfer {} -> {}: src {}..→{}.., dst {}..→{}..",
        src_shard,
        dst_shard,
        short_hex(&pre_src_root),
        short_hex(&post_src_root),
        short_hex(&pre_dst_root),
        short_hex(&post_dst_root),
    );

    Ok(CrossProof {
        src_shard,
        dst_shard,
        src_key: key_from.to_vec(),
        dst_key: key_to.to_vec(),
        pre_src_root,
        pre_dst_root,
        src_proof,
        dst_proof,
        post_src_root,
        post_dst_root,
    })
}

fn short_hex(hash: &Hash) -> String {
    hex::encode(&hash[..4])
}

impl CrossProof {
    /// Verify both pre-state proofs and that both roots moved.
    ///
    /// `verify_single` is the single-shard verifier, normally
    /// [`sc_01_merkle_trie::verify_proof`].
    ///
    /// # Errors
    ///
    /// In check order: `InvalidSourcePreProof`, `InvalidDestPreProof`,
    /// `SourceRootUnchanged`, `DestRootUnchanged`.
    pub fn verify_cross_proof<F>(&self, verify_single: F) -> Result<(), ShardError>
    where
        F: Fn(&Hash, &[u8], &Proof) -> bool,
    {
        if !verify_single(&self.pre_src_root, &self.src_key, &self.src_proof) {
            return Err(ShardError::InvalidSourcePreProof);
        }
        if !verify_single(&self.pre_dst_root, &self.dst_key, &self.dst_proof) {
            return Err(ShardError::InvalidDestPreProof);
        }
        if self.pre_src_root == self.post_src_root {
            return Err(ShardError::SourceRootUnchanged);
        }
        if self.pre_dst_root == self.post_dst_root {
            return Err(ShardError::DestRootUnchanged);
        }
        Ok(())
    }
}

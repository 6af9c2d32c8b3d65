//! # Domain Entities
//!
//! Core entities for the Sharding subsystem.

use super::errors::{Hash, ShardIndex};
use sc_01_merkle_trie::{KeyValue, Proof, TrieNode};
use serde::{Deserialize, Serialize};

/// One partition of the key space: a Merkle trie plus a mutation counter.
#[derive(Debug, Default)]
pub struct Shard {
    trie: TrieNode,
    mutations: u64,
}

impl Shard {
    /// Create an empty shard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` at `key` and bump the mutation counter.
    pub fn apply(&mut self, key: &[u8], value: Vec<u8>) {
        self.trie.insert(key, value);
        self.mutations += 1;
    }

    /// This shard's current Merkle root.
    pub fn root(&self) -> Hash {
        self.trie.root_hash()
    }

    /// Accepted writes since the shard was created.
    pub fn mutations(&self) -> u64 {
        self.mutations
    }

    /// Read-only access to the trie.
    pub fn trie(&self) -> &TrieNode {
        &self.trie
    }

    /// Direct trie access. Writes made here do not count as mutations.
    pub fn trie_mut(&mut self) -> &mut TrieNode {
        &mut self.trie
    }

    /// Copy of every stored key/value pair.
    pub fn entries(&self) -> Vec<KeyValue> {
        self.trie.traverse()
    }

    /// Build a shard by replaying `entries`; each counts as one mutation.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = KeyValue>,
    {
        let mut shard = Self::new();
        for kv in entries {
            shard.apply(&kv.key, kv.value);
        }
        shard
    }
}

/// Composite proof around a transfer between two shards.
///
/// The embedded proofs are bound to the pre-state. The post-roots only show
/// that both shards changed; they do not prove the new values relate to the
/// old ones by the transferred amount. That check belongs to a caller that
/// holds both values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossProof {
    /// Source shard index at generation time.
    pub src_shard: ShardIndex,
    /// Destination shard index at generation time.
    pub dst_shard: ShardIndex,
    /// Key debited.
    pub src_key: Vec<u8>,
    /// Key credited.
    pub dst_key: Vec<u8>,
    /// Source root before the transfer.
    pub pre_src_root: Hash,
    /// Destination root before the transfer.
    pub pre_dst_root: Hash,
    /// Inclusion proof of `src_key` against `pre_src_root`.
    pub src_proof: Proof,
    /// Inclusion proof of `dst_key` against `pre_dst_root`.
    pub dst_proof: Proof,
    /// Source root after the transfer.
    pub post_src_root: Hash,
    /// Destination root after the transfer.
    pub post_dst_root: Hash,
}

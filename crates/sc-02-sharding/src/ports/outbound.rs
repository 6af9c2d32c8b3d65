//! # Outbound Ports
//!
//! Trie access the cross-shard protocol depends on.

use crate::domain::{Shard, ShardError, ShardIndex};
use sc_01_merkle_trie::TrieNode;

/// Per-shard trie access by index.
///
/// Implementors hand out direct trie references, so writes made through
/// `trie_mut` bypass mutation counters.
pub trait TrieAccessor {
    /// Shared access to the trie of `shard`.
    fn trie(&self, shard: ShardIndex) -> Result<&TrieNode, ShardError>;

    /// Exclusive access to the trie of `shard`.
    fn trie_mut(&mut self, shard: ShardIndex) -> Result<&mut TrieNode, ShardError>;
}

impl TrieAccessor for [Shard] {
    fn trie(&self, shard: ShardIndex) -> Result<&TrieNode, ShardError> {
        let count = self.len();
        self.get(shard)
            .map(Shard::trie)
            .ok_or(ShardError::UnknownShard { index: shard, count })
    }

    fn trie_mut(&mut self, shard: ShardIndex) -> Result<&mut TrieNode, ShardError> {
        let count = self.len();
        self.get_mut(shard)
            .map(Shard::trie_mut)
            .ok_or(ShardError::UnknownShard { index: shard, count })
    }
}

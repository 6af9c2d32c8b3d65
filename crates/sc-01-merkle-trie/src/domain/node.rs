use super::{Hash, Proof, ProofStep, TrieError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// Tag byte prefixed to a node's own value in the hash input.
pub const VALUE_TAG: u8 = 0x00;

/// Tag byte prefixed to each child contribution in the hash input.
pub const CHILD_TAG: u8 = 0x01;

/// SHA-256 of the empty input: the hash of a node with no value and no children.
/// Value: 0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
pub const EMPTY_NODE_HASH: Hash = [
    0xe3, 0xb0, 0xc4, 0x42, 0x98, 0xfc, 0x1c, 0x14, 0x9a, 0xfb, 0xf4, 0xc8, 0x99, 0x6f, 0xb9, 0x24,
    0x27, 0xae, 0x41, 0xe4, 0x64, 0x9b, 0x93, 0x4c, 0xa4, 0x95, 0x99, 0x1b, 0x78, 0x52, 0xb8, 0x55,
];

// =============================================================================
// CONTENT HASH
// =============================================================================

/// Hash a node from its optional value and its `(label, child_hash)` edges.
///
/// Callers must yield edges in ascending label order.
pub fn content_hash<'a, I>(value: Option<&[u8]>, edges: I) -> Hash
where
    I: IntoIterator<Item = (u8, &'a Hash)>,
{
    let mut hasher = Sha256::new();
    if let Some(value) = value {
        hasher.update([VALUE_TAG]);
        hasher.update(value);
    }
    for (label, child) in edges {
        hasher.update([CHILD_TAG, label]);
        hasher.update(child);
    }
    hasher.finalize().into()
}

/// A stored key/value pair, copied out of the trie.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

// =============================================================================
// TRIE NODE
// =============================================================================

/// One node of the byte-keyed Merkle trie. The root node is the trie.
///
/// Each node exclusively owns its children, keyed by a single edge byte.
/// `hash` is kept consistent with `value` and `children` by recomputing it
/// bottom-up along the insertion path after every write.
#[derive(Debug)]
pub struct TrieNode {
    children: BTreeMap<u8, TrieNode>,
    value: Option<Vec<u8>>,
    hash: Hash,
}

impl Default for TrieNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = Vec::new();
        stack.extend(std::mem::take(&mut self.children).into_values());
        while let Some(mut node) = stack.pop() {
            stack.extend(std::mem::take(&mut node.children).into_values());
        }
    }
}

impl TrieNode {
    pub fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
            hash: EMPTY_NODE_HASH,
        }
    }

    /// Write `value` at `key`, creating missing nodes along the path.
    ///
    /// The path is detached top-down and reattached bottom-up, rehashing each
    /// node, so stack use does not grow with key length.
    pub fn insert(&mut self, key: &[u8], value: Vec<u8>) {
        let mut path: Vec<(u8, TrieNode)> = Vec::with_capacity(key.len());
        let mut current = std::mem::take(self);
        for &label in key {
            let child = current.children.remove(&label).unwrap_or_default();
            path.push((label, current));
            current = child;
        }

        current.value = Some(value);
        current.rehash();
        while let Some((label, mut parent)) = path.pop() {
            parent.children.insert(label, current);
            parent.rehash();
            current = parent;
        }
        *self = current;
    }

    /// Cached hash of this node; for the top node this is the trie root.
    pub fn root_hash(&self) -> Hash {
        self.hash
    }

    /// Value stored directly at this node.
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }

    /// True when the node holds neither a value nor children.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Number of stored values in this subtree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += usize::from(node.value.is_some());
            stack.extend(node.children.values());
        }
        count
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.descend(key)?.value()
    }

    fn descend(&self, key: &[u8]) -> Option<&TrieNode> {
        key.iter()
            .try_fold(self, |node, label| node.children.get(label))
    }

    fn rehash(&mut self) {
        self.hash = content_hash(
            self.value.as_deref(),
            self.children.iter().map(|(label, child)| (*label, &child.hash)),
        );
    }

    fn edge_hashes(&self, skip: Option<u8>) -> HashMap<u8, Hash> {
        self.children
            .iter()
            .filter(|(label, _)| Some(**label) != skip)
            .map(|(label, child)| (*label, child.hash))
            .collect()
    }

    /// Build an inclusion proof for `key`.
    ///
    /// Step `i` records the hashes of every child of the depth-`i` node except
    /// the one on the key's path, plus that node's own value when it has one.
    /// The terminal node's children are recorded separately so keys that are
    /// prefixes of other keys still verify.
    ///
    /// # Errors
    ///
    /// `TrieError::KeyNotFound` if the path is missing or ends at a node with
    /// no value.
    pub fn get_proof(&self, key: &[u8]) -> Result<Proof, TrieError> {
        let not_found = || TrieError::KeyNotFound { key: key.to_vec() };

        let mut steps = Vec::with_capacity(key.len());
        let mut node = self;
        for &label in key {
            steps.push(ProofStep {
                siblings: node.edge_hashes(Some(label)),
                node_value: node.value.clone(),
            });
            node = node.children.get(&label).ok_or_else(not_found)?;
        }

        let value = node.value.clone().ok_or_else(not_found)?;
        Ok(Proof {
            value,
            steps,
            leaf_children: node.edge_hashes(None),
        })
    }

    /// Every stored key/value pair, copied out of the trie. No ordering guarantee.
    pub fn traverse(&self) -> Vec<KeyValue> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(Vec<u8>, &TrieNode)> = vec![(Vec::new(), self)];

        while let Some((prefix, node)) = stack.pop() {
            if let Some(value) = &node.value {
                out.push(KeyValue {
                    key: prefix.clone(),
                    value: value.clone(),
                });
            }
            for (label, child) in &node.children {
                let mut key = prefix.clone();
                key.push(*label);
                stack.push((key, child));
            }
        }
        out
    }
}

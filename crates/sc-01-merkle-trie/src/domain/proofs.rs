//! # Inclusion Proofs
//!
//! A proof carries, for every byte of the key, the hashes of the sibling
//! edges at that depth, plus the leaf value. Verification rebuilds the root
//! bottom-up through the same `content_hash` used on insert.
//!
//! ## Prefix keys
//!
//! A node on the path may hold its own value (key `"ab"` under key `"abc"`),
//! and the terminal node may have children of its own. Neither is derivable
//! from sibling hashes alone, so each step also records the value stored at
//! that depth and the proof records the terminal node's child hashes. When no
//! such values or children exist these fields are empty and the fold reduces
//! to the plain value-then-siblings reconstruction.

use super::{content_hash, Hash};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Sibling data for one depth of the path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    /// Edge label -> child hash for every child except the one on the key's path.
    pub siblings: HashMap<u8, Hash>,
    /// Value stored at the node at this depth, if any.
    pub node_value: Option<Vec<u8>>,
}

/// Inclusion proof for one key. `steps.len()` always equals the key length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// Leaf value at the proven key.
    pub value: Vec<u8>,
    /// One entry per key byte, root first.
    pub steps: Vec<ProofStep>,
    /// Children of the terminal node (non-empty only for prefix keys).
    pub leaf_children: HashMap<u8, Hash>,
}

impl Proof {
    /// Number of key bytes this proof covers.
    pub fn depth(&self) -> usize {
        self.steps.len()
    }
}

/// Fold one level: own value, then the union of sibling edges and the path
/// edge in ascending label order.
fn fold_level(value: Option<&[u8]>, siblings: &HashMap<u8, Hash>, path: Option<(u8, Hash)>) -> Hash {
    let mut edges: BTreeMap<u8, Hash> = siblings.iter().map(|(l, h)| (*l, *h)).collect();
    if let Some((label, running)) = path {
        edges.insert(label, running);
    }
    content_hash(value, edges.iter().map(|(l, h)| (*l, h)))
}

/// Recompute the root implied by `proof` for `key`.
///
/// Returns `None` when the proof's depth does not match the key length.
pub fn reconstruct_root(key: &[u8], proof: &Proof) -> Option<Hash> {
    if proof.steps.len() != key.len() {
        return None;
    }

    let leaf = fold_level(Some(&proof.value), &proof.leaf_children, None);
    let root = key
        .iter()
        .zip(&proof.steps)
        .rev()
        .fold(leaf, |running, (&label, step)| {
            fold_level(step.node_value.as_deref(), &step.siblings, Some((label, running)))
        });
    Some(root)
}

/// Check that `proof` proves `key` under `root_hash`.
///
/// A mismatch is a `false`, never an error.
pub fn verify_proof(root_hash: &Hash, key: &[u8], proof: &Proof) -> bool {
    reconstruct_root(key, proof).is_some_and(|root| root == *root_hash)
}

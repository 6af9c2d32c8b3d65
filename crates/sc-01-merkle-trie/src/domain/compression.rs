//! # Compressed Proofs
//!
//! Flattens each per-depth sibling map into a sorted key list and an aligned
//! hash list so a proof can be shipped as plain vectors. The conversion is
//! lossless in both directions.

use super::{Hash, Proof, ProofStep, TrieError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Transport form of a [`Proof`] built from parallel vectors.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedProof {
    /// Leaf value.
    pub value: Vec<u8>,
    /// Per-depth sibling labels, ascending.
    pub sib_keys: Vec<Vec<u8>>,
    /// Per-depth sibling hashes, aligned with `sib_keys`.
    pub sib_hashes: Vec<Vec<Hash>>,
    /// Per-depth value stored on the path node.
    pub node_values: Vec<Option<Vec<u8>>>,
    /// Terminal node child labels, ascending.
    pub leaf_keys: Vec<u8>,
    /// Terminal node child hashes, aligned with `leaf_keys`.
    pub leaf_hashes: Vec<Hash>,
}

fn flatten(map: &HashMap<u8, Hash>) -> (Vec<u8>, Vec<Hash>) {
    let mut keys: Vec<u8> = map.keys().copied().collect();
    keys.sort_unstable();
    let hashes = keys.iter().map(|k| map[k]).collect();
    (keys, hashes)
}

fn unflatten(depth: Option<usize>, keys: &[u8], hashes: &[Hash]) -> Result<HashMap<u8, Hash>, TrieError> {
    let at = || depth.map_or_else(|| "leaf".to_string(), |d| format!("depth {d}"));
    if keys.len() != hashes.len() {
        return Err(TrieError::MalformedProof(format!(
            "{}: {} keys but {} hashes",
            at(),
            keys.len(),
            hashes.len()
        )));
    }
    let map: HashMap<u8, Hash> = keys.iter().copied().zip(hashes.iter().copied()).collect();
    if map.len() != keys.len() {
        return Err(TrieError::MalformedProof(format!("{}: duplicate sibling label", at())));
    }
    Ok(map)
}

impl CompressedProof {
    pub fn compress(proof: &Proof) -> Self {
        let depth = proof.steps.len();
        let mut sib_keys = Vec::with_capacity(depth);
        let mut sib_hashes = Vec::with_capacity(depth);
        let mut node_values = Vec::with_capacity(depth);

        for step in &proof.steps {
            let (keys, hashes) = flatten(&step.siblings);
            sib_keys.push(keys);
            sib_hashes.push(hashes);
            node_values.push(step.node_value.clone());
        }
        let (leaf_keys, leaf_hashes) = flatten(&proof.leaf_children);

        Self {
            value: proof.value.clone(),
            sib_keys,
            sib_hashes,
            node_values,
            leaf_keys,
            leaf_hashes,
        }
    }

    /// Rebuild the full proof.
    ///
    /// # Errors
    ///
    /// `TrieError::MalformedProof` if the parallel vectors disagree in length
    /// or a depth repeats a sibling label.
    pub fn decompress(&self) -> Result<Proof, TrieError> {
        let depth = self.sib_keys.len();
        if self.sib_hashes.len() != depth || self.node_values.len() != depth {
            return Err(TrieError::MalformedProof(format!(
                "step count mismatch: {} key lists, {} hash lists, {} node values",
                depth,
                self.sib_hashes.len(),
                self.node_values.len()
            )));
        }

        let steps = self
            .sib_keys
            .iter()
            .zip(&self.sib_hashes)
            .zip(&self.node_values)
            .enumerate()
            .map(|(i, ((keys, hashes), node_value))| {
                Ok(ProofStep {
                    siblings: unflatten(Some(i), keys, hashes)?,
                    node_value: node_value.clone(),
                })
            })
            .collect::<Result<Vec<_>, TrieError>>()?;

        Ok(Proof {
            value: self.value.clone(),
            steps,
            leaf_children: unflatten(None, &self.leaf_keys, &self.leaf_hashes)?,
        })
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TrieError> {
        bincode::serialize(self).map_err(|e| TrieError::Encoding(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TrieError> {
        bincode::deserialize(bytes).map_err(|e| TrieError::Encoding(e.to_string()))
    }
}

impl From<&Proof> for CompressedProof {
    fn from(proof: &Proof) -> Self {
        Self::compress(proof)
    }
}

impl TryFrom<&CompressedProof> for Proof {
    type Error = TrieError;

    fn try_from(compressed: &CompressedProof) -> Result<Self, Self::Error> {
        compressed.decompress()
    }
}

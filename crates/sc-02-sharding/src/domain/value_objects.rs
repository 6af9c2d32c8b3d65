//! # Domain Value Objects
//!
//! Immutable value types produced by rebalancing.

use super::errors::{Hash, ShardError, ShardIndex};
use super::invariants::invariant_contiguous_indices;
use crate::algorithms::build_global_root;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural change chosen by one rebalance attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RebalanceOp {
    /// No change.
    #[default]
    None,
    /// One shard replaced by two at the same position.
    Split,
    /// Two shards replaced by one at the lower position.
    Merge,
}

impl RebalanceOp {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Split => "split",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for RebalanceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root snapshots taken immediately before and after one rebalance decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebalanceProof {
    /// Shard roots before, in index order.
    pub pre_roots: Vec<Hash>,
    /// Shard roots after, in index order.
    pub post_roots: Vec<Hash>,
    /// Operation performed.
    pub operation: RebalanceOp,
    /// Pre-rebalance indices touched (one for split, two ascending for merge).
    pub shard_indices: Vec<ShardIndex>,
}

impl RebalanceProof {
    /// Global root over the pre-rebalance shard roots.
    pub fn pre_global_root(&self) -> Hash {
        build_global_root(&self.pre_roots)
    }

    /// Global root over the post-rebalance shard roots.
    pub fn post_global_root(&self) -> Hash {
        build_global_root(&self.post_roots)
    }

    /// Whether the proof records a structural change.
    pub fn changed(&self) -> bool {
        self.operation != RebalanceOp::None
    }

    /// Check that the snapshots fit the recorded operation: every shard the
    /// operation did not touch keeps its root, shifted to its new index.
    pub fn verify_transition(&self) -> Result<(), ShardError> {
        let fail = |msg: String| Err(ShardError::InconsistentRebalance(msg));
        let pre = &self.pre_roots;
        let post = &self.post_roots;

        if !invariant_contiguous_indices(&self.shard_indices, pre.len()) {
            return fail(format!(
                "indices {:?} outside {} pre-rebalance shards",
                self.shard_indices,
                pre.len()
            ));
        }

        match (self.operation, self.shard_indices.as_slice()) {
            (RebalanceOp::None, []) => {
                if pre != post {
                    return fail("roots changed without an operation".into());
                }
            }
            (RebalanceOp::Split, &[i]) => {
                if post.len() != pre.len() + 1 {
                    return fail(format!(
                        "split of {i}: {} roots before, {} after",
                        pre.len(),
                        post.len()
                    ));
                }
                if pre[..i] != post[..i] || pre[i + 1..] != post[i + 2..] {
                    return fail(format!("split of {i} disturbed untouched shards"));
                }
            }
            (RebalanceOp::Merge, &[i, j]) => {
                if i >= j || post.len() + 1 != pre.len() {
                    return fail(format!(
                        "merge of ({i}, {j}): {} roots before, {} after",
                        pre.len(),
                        post.len()
                    ));
                }
                if pre[..i] != post[..i] || pre[i + 1..j] != post[i + 1..j] || pre[j + 1..] != post[j..]
                {
                    return fail(format!("merge of ({i}, {j}) disturbed untouched shards"));
                }
            }
            (op, indices) => {
                return fail(format!("{op} recorded with indices {indices:?}"));
            }
        }
        Ok(())
    }
}

//! # Shard Manager
//!
//! Owns the ordered shard collection behind one `parking_lot::RwLock`.
//!
//! Every public operation takes the guard exactly once and holds it for the
//! whole logical operation, so a rebalance or cross-shard transfer can never
//! observe (or be observed by) a half-applied write.

use crate::algorithms::{
    build_global_root, generate_cross_proof, mean_variance, partition_for_split, plan_rebalance,
    route_key,
};
use crate::domain::{
    CrossProof, Hash, RebalanceOp, RebalanceProof, Shard, ShardError, ShardIndex, ShardingConfig,
    DEFAULT_MAX_SHARD_COUNT, MIN_SHARD_COUNT,
};
use parking_lot::RwLock;
use sc_01_merkle_trie::{KeyValue, Proof};
use tracing::{debug, info, warn};

/// Routes keys to shards, applies writes and rebalances shard boundaries.
pub struct ShardManager {
    shards: RwLock<Vec<Shard>>,
    max_shard_count: usize,
}

impl ShardManager {
    /// Create a manager with `shard_count` empty shards.
    pub fn new(shard_count: usize) -> Result<Self, ShardError> {
        Self::with_config(&ShardingConfig {
            shard_count,
            max_shard_count: DEFAULT_MAX_SHARD_COUNT.max(shard_count),
        })
    }

    /// Create a manager from a validated configuration.
    pub fn with_config(config: &ShardingConfig) -> Result<Self, ShardError> {
        config.validate()?;
        let shards = (0..config.shard_count).map(|_| Shard::new()).collect();
        info!(
            "[sc-02] Shard manager started with {} shards (cap {})",
            config.shard_count, config.max_shard_count
        );
        Ok(Self {
            shards: RwLock::new(shards),
            max_shard_count: config.max_shard_count,
        })
    }

    /// Adopt an existing shard collection.
    pub fn from_shards(shards: Vec<Shard>) -> Result<Self, ShardError> {
        if shards.len() < MIN_SHARD_COUNT {
            return Err(ShardError::ConfigError(
                "shard manager needs at least one shard".into(),
            ));
        }
        Ok(Self {
            max_shard_count: DEFAULT_MAX_SHARD_COUNT.max(shards.len()),
            shards: RwLock::new(shards),
        })
    }

    /// Cap above which splits are skipped.
    pub fn max_shard_count(&self) -> usize {
        self.max_shard_count
    }

    /// Current number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.read().len()
    }

    /// Shard that `key` routes to under the current shard count.
    pub fn shard_index(&self, key: &[u8]) -> ShardIndex {
        route_key(key, self.shards.read().len())
    }

    /// Current root of every shard, in index order.
    pub fn shard_roots(&self) -> Vec<Hash> {
        self.shards.read().iter().map(Shard::root).collect()
    }

    /// Root of one shard.
    pub fn shard_root(&self, index: ShardIndex) -> Result<Hash, ShardError> {
        let shards = self.shards.read();
        shards
            .get(index)
            .map(Shard::root)
            .ok_or(ShardError::UnknownShard {
                index,
                count: shards.len(),
            })
    }

    /// Aggregate of all current shard roots.
    pub fn global_root(&self) -> Hash {
        build_global_root(&self.shard_roots())
    }

    /// Route `key` and write `value` into that shard. Returns the shard index used.
    pub fn apply_tx(&self, key: &[u8], value: Vec<u8>) -> ShardIndex {
        let mut shards = self.shards.write();
        let index = route_key(key, shards.len());
        shards[index].apply(key, value);
        debug!(
            "[sc-02] Applied write to shard {}: key 0x{}",
            index,
            hex::encode(key)
        );
        index
    }

    /// Route `key` and write `value` only if `accept` approves the target
    /// shard. Routing and write share one guard.
    ///
    /// Returns the routed index and whether the write happened.
    pub fn apply_tx_if<F>(&self, key: &[u8], value: &[u8], accept: F) -> (ShardIndex, bool)
    where
        F: FnOnce(ShardIndex) -> bool,
    {
        let mut shards = self.shards.write();
        let index = route_key(key, shards.len());
        if !accept(index) {
            return (index, false);
        }
        shards[index].apply(key, value.to_vec());
        (index, true)
    }

    /// Mutation counter of every shard, in index order.
    pub fn collect_stats(&self) -> Vec<u64> {
        self.shards.read().iter().map(Shard::mutations).collect()
    }

    /// Value at `key` in the shard routing currently points to.
    ///
    /// May miss keys a split left in a different shard; see [`Self::locate`].
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let shards = self.shards.read();
        let index = route_key(key, shards.len());
        shards[index].trie().get(key).map(<[u8]>::to_vec)
    }

    /// Index of the shard that physically stores `key`, found by scanning.
    pub fn locate(&self, key: &[u8]) -> Option<ShardIndex> {
        self.shards
            .read()
            .iter()
            .position(|shard| shard.trie().get(key).is_some())
    }

    /// Inclusion proof for `key` inside one shard.
    pub fn proof(&self, index: ShardIndex, key: &[u8]) -> Result<Proof, ShardError> {
        let shards = self.shards.read();
        let shard = shards.get(index).ok_or(ShardError::UnknownShard {
            index,
            count: shards.len(),
        })?;
        shard
            .trie()
            .get_proof(key)
            .map_err(ShardError::SourceProof)
    }

    /// Key/value pairs of one shard.
    pub fn shard_entries(&self, index: ShardIndex) -> Result<Vec<KeyValue>, ShardError> {
        let shards = self.shards.read();
        shards
            .get(index)
            .map(Shard::entries)
            .ok_or(ShardError::UnknownShard {
                index,
                count: shards.len(),
            })
    }

    /// Key/value pairs of every shard, concatenated in shard order.
    pub fn entries(&self) -> Vec<KeyValue> {
        self.shards
            .read()
            .iter()
            .flat_map(Shard::entries)
            .collect()
    }

    /// Run `f` against the shard collection under the write guard.
    pub fn with_shards<R>(&self, f: impl FnOnce(&mut [Shard]) -> R) -> R {
        let mut shards = self.shards.write();
        f(shards.as_mut_slice())
    }

    /// Cross-shard transfer proof, generated under one write guard.
    pub fn generate_cross_proof(
        &self,
        src_shard: ShardIndex,
        dst_shard: ShardIndex,
        key_from: &[u8],
        key_to: &[u8],
        amount: &[u8],
    ) -> Result<CrossProof, ShardError> {
        self.with_shards(|shards| {
            generate_cross_proof(shards, src_shard, dst_shard, key_from, key_to, amount)
        })
    }

    /// Evaluate thresholds, maybe split or merge, and return root snapshots
    /// taken immediately before and after under the same write guard.
    pub fn rebalance_with_proof(&self, split_threshold: f64, merge_threshold: f64) -> RebalanceProof {
        let mut shards = self.shards.write();

        let pre_roots: Vec<Hash> = shards.iter().map(Shard::root).collect();
        let counters: Vec<u64> = shards.iter().map(Shard::mutations).collect();
        let plan = plan_rebalance(
            &counters,
            split_threshold,
            merge_threshold,
            self.max_shard_count,
        );

        match (plan.operation, plan.indices.as_slice()) {
            (RebalanceOp::Split, &[index]) => split_shard(&mut shards, index),
            (RebalanceOp::Merge, &[low, high]) => merge_shards(&mut shards, low, high),
            _ => {
                if counters.len() >= self.max_shard_count
                    && mean_variance(&counters).1 > split_threshold
                {
                    warn!(
                        "[sc-02] Split skipped: shard cap {} reached",
                        self.max_shard_count
                    );
                }
            }
        }

        let post_roots: Vec<Hash> = shards.iter().map(Shard::root).collect();
        drop(shards);

        if plan.operation != RebalanceOp::None {
            info!(
                "[sc-02] Rebalance: {} on shards {:?} ({} -> {} shards)",
                plan.operation,
                plan.indices,
                pre_roots.len(),
                post_roots.len()
            );
        }

        RebalanceProof {
            pre_roots,
            post_roots,
            operation: plan.operation,
            shard_indices: plan.indices,
        }
    }
}

/// Replace shard `index` with two shards partitioned by key high bit.
fn split_shard(shards: &mut Vec<Shard>, index: ShardIndex) {
    let (low, high) = partition_for_split(shards[index].entries());
    debug!(
        "[sc-02] Splitting shard {}: {} low / {} high keys",
        index,
        low.len(),
        high.len()
    );
    shards.splice(
        index..=index,
        [Shard::from_entries(low), Shard::from_entries(high)],
    );
}

/// Replace shards `low` and `high` with their union at `low`.
fn merge_shards(shards: &mut Vec<Shard>, low: ShardIndex, high: ShardIndex) {
    let removed = shards.remove(high);
    let kept = &shards[low];
    debug!(
        "[sc-02] Merging shards {} and {}: {} + {} keys",
        low,
        high,
        kept.trie().len(),
        removed.trie().len()
    );
    let merged = Shard::from_entries(kept.entries().into_iter().chain(removed.entries()));
    shards[low] = merged;
}

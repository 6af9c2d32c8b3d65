//! # Node Runtime
//!
//! Runs the demo phases in order against one shard manager:
//!
//! 1. Trie smoke test: insert, prove, verify
//! 2. Manager smoke test: two routed writes and their counters
//! 3. Cross-shard proof between the two written keys
//! 4. Global root over the current shard roots
//! 5. Scheduler and workload for the configured duration
//! 6. Final counters and global root

use crate::container::NodeConfig;
use anyhow::{Context, Result};
use sc_01_merkle_trie::{verify_proof, TrieNode};
use sc_02_sharding::{Hash, ShardManager};
use sc_03_scheduler::{run_workload, Scheduler, SchedulerStats};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Final state of a demo run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Scheduler totals.
    pub scheduler: SchedulerStats,
    /// Transactions the workload submitted.
    pub submitted: u64,
    /// Transactions left in the queue when the scheduler stopped.
    pub pending: usize,
    /// Per-shard mutation counters at the end.
    pub shard_stats: Vec<u64>,
    /// Hex global root at the end.
    pub global_root: String,
}

/// The demo runtime.
pub struct NodeRuntime {
    config: NodeConfig,
    manager: Arc<ShardManager>,
}

impl NodeRuntime {
    /// Validate `config` and build the shard manager.
    pub fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;
        let manager = Arc::new(
            ShardManager::with_config(&config.sharding).context("shard manager init failed")?,
        );
        Ok(Self { config, manager })
    }

    /// The shared shard manager.
    pub fn manager(&self) -> &Arc<ShardManager> {
        &self.manager
    }

    /// Run every phase and return the final state.
    pub async fn run(&self) -> Result<RunSummary> {
        info!("===========================================");
        info!("  Sharded State Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");
        self.config.log_summary();

        self.trie_smoke_test()?;
        self.manager_smoke_test();
        self.cross_proof_demo()?;
        info!(
            "Global root hash: {}",
            hex::encode(self.manager.global_root())
        );
        self.simulate().await
    }

    /// Phase 1: single-trie insert, proof and verification.
    pub fn trie_smoke_test(&self) -> Result<Hash> {
        let mut trie = TrieNode::new();
        let key = b"account42";
        trie.insert(key, b"1000".to_vec());
        let root = trie.root_hash();
        info!("Trie root hash: {}", hex::encode(root));

        let proof = trie.get_proof(key).context("trie smoke test proof")?;
        let valid = verify_proof(&root, key, &proof);
        info!("Trie proof valid? {}", valid);
        anyhow::ensure!(valid, "trie smoke test proof did not verify");
        Ok(root)
    }

    /// Phase 2: two routed writes.
    pub fn manager_smoke_test(&self) -> Vec<u64> {
        self.manager.apply_tx(b"alice", b"500".to_vec());
        self.manager.apply_tx(b"bob", b"250".to_vec());
        let stats = self.manager.collect_stats();
        info!("Shard stats: {:?}", stats);
        stats
    }

    /// Phase 3: cross-shard transfer of 50 from `alice` to `bob`.
    pub fn cross_proof_demo(&self) -> Result<()> {
        let src = self.manager.shard_index(b"alice");
        let dst = self.manager.shard_index(b"bob");
        let proof = self
            .manager
            .generate_cross_proof(src, dst, b"alice", b"bob", b"50")
            .context("cross-shard proof generation")?;

        match proof.verify_cross_proof(verify_proof) {
            Ok(()) => info!("Cross-shard proof valid? true ({} -> {})", src, dst),
            Err(e) => info!("Cross-shard proof invalid: {}", e),
        }
        Ok(())
    }

    /// Phases 5 and 6: scheduler plus workload, then final state.
    pub async fn simulate(&self) -> Result<RunSummary> {
        let scheduler = Scheduler::new(Arc::clone(&self.manager), self.config.scheduler.clone())
            .context("scheduler init failed")?;
        let handle = scheduler.handle();

        let ticks = scheduler.spawn(self.config.scheduler_duration());
        let workload = run_workload(handle.clone(), self.config.workload.clone())
            .context("workload init failed")?;

        let submitted = workload.await.context("workload task failed")?;
        let stats = ticks.await.context("scheduler task failed")?;
        handle.close();

        let summary = RunSummary {
            scheduler: stats,
            submitted,
            pending: handle.pending(),
            shard_stats: self.manager.collect_stats(),
            global_root: hex::encode(self.manager.global_root()),
        };
        info!("Final shard stats: {:?}", summary.shard_stats);
        info!("Final global root: {}", summary.global_root);
        Ok(summary)
    }
}

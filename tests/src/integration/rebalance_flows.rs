//! # Rebalance Flows
//!
//! Variance-driven split and merge observed through the manager, with
//! data-preservation and snapshot-consistency checks.

#[cfg(test)]
mod tests {
    use sc_01_merkle_trie::{verify_proof, KeyValue};
    use sc_02_sharding::{
        invariant_no_data_loss, RebalanceOp, Shard, ShardManager, ShardingConfig,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Manager whose shard `i` holds `counts[i]` writes, half with a low
    /// first byte and half with a high one.
    fn manager_with_counts(counts: &[u64]) -> ShardManager {
        let shards = counts
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let mut shard = Shard::new();
                for j in 0..n {
                    let first = if j % 2 == 0 { i as u8 } else { 0x80 | i as u8 };
                    let mut key = vec![first];
                    key.extend_from_slice(&j.to_be_bytes());
                    shard.apply(&key, vec![i as u8]);
                }
                shard
            })
            .collect();
        ShardManager::from_shards(shards).unwrap()
    }

    // =============================================================================
    // VARIANCE THRESHOLDS
    // =============================================================================

    #[test]
    fn test_skewed_counters_split_busiest() {
        let manager = manager_with_counts(&[10, 10, 10, 40]);
        let proof = manager.rebalance_with_proof(2.0, 0.5);
        assert_eq!(proof.operation, RebalanceOp::Split);
        assert_eq!(proof.shard_indices, vec![3]);
        assert_eq!(manager.shard_count(), 5);
    }

    #[test]
    fn test_bimodal_counters_do_not_merge() {
        let manager = manager_with_counts(&[1, 1, 50, 50]);
        let proof = manager.rebalance_with_proof(f64::INFINITY, 0.1);
        assert_eq!(proof.operation, RebalanceOp::None);
        assert_eq!(manager.shard_count(), 4);
    }

    #[test]
    fn test_uniform_counters_merge_leftmost_pair() {
        let manager = manager_with_counts(&[10, 10, 10, 10]);
        let proof = manager.rebalance_with_proof(2.0, 0.5);
        assert_eq!(proof.operation, RebalanceOp::Merge);
        assert_eq!(proof.shard_indices, vec![0, 1]);
        assert_eq!(manager.shard_count(), 3);
    }

    // =============================================================================
    // SNAPSHOTS AND DATA PRESERVATION
    // =============================================================================

    #[test]
    fn test_snapshots_match_live_roots() {
        let manager = manager_with_counts(&[4, 30, 4, 4]);
        let before = manager.shard_roots();
        let proof = manager.rebalance_with_proof(2.0, 0.5);

        assert_eq!(proof.pre_roots, before);
        assert_eq!(proof.post_roots, manager.shard_roots());
        assert_eq!(proof.post_global_root(), manager.global_root());
        assert!(proof.verify_transition().is_ok());
    }

    #[test]
    fn test_repeated_rebalancing_preserves_every_pair() {
        let manager = manager_with_counts(&[3, 25, 7, 1, 12]);
        let original: Vec<KeyValue> = manager.entries();

        for _ in 0..10 {
            let proof = manager.rebalance_with_proof(5.0, 1.0);
            assert!(proof.verify_transition().is_ok());
            assert!(invariant_no_data_loss(&original, &manager.entries()));
        }
    }

    #[test]
    fn test_every_key_provable_after_split() {
        let manager = manager_with_counts(&[2, 2, 40]);
        manager.rebalance_with_proof(2.0, 0.5);

        for kv in manager.entries() {
            let home = manager.locate(&kv.key).unwrap();
            let proof = manager.proof(home, &kv.key).unwrap();
            assert!(verify_proof(
                &manager.shard_root(home).unwrap(),
                &kv.key,
                &proof
            ));
        }
    }

    #[test]
    fn test_split_stops_at_cap() {
        let config = ShardingConfig {
            shard_count: 3,
            max_shard_count: 4,
        };
        let manager = ShardManager::with_config(&config).unwrap();
        for n in 0u32..200 {
            manager.apply_tx(&n.to_be_bytes(), vec![1]);
        }

        let mut splits = 0;
        for _ in 0..5 {
            if manager.rebalance_with_proof(0.0, -1.0).operation == RebalanceOp::Split {
                splits += 1;
            }
        }
        assert_eq!(splits, 1);
        assert_eq!(manager.shard_count(), 4);
    }

    #[test]
    fn test_routing_diverges_from_placement_after_split() {
        let mut hot = Shard::new();
        for n in 0u8..=255 {
            hot.apply(&[n, n], vec![n]);
        }
        let manager = ShardManager::from_shards(vec![hot, Shard::new(), Shard::new()]).unwrap();
        assert_eq!(
            manager.rebalance_with_proof(1.0, -1.0).operation,
            RebalanceOp::Split
        );

        let mut unreachable = 0;
        for n in 0u8..=255 {
            let key = [n, n];
            let home = manager.locate(&key).unwrap();
            if manager.get(&key).is_none() {
                assert_ne!(home, manager.shard_index(&key));
                unreachable += 1;
            }
        }
        assert!(unreachable > 0);
    }
}

//! # Proof Flows
//!
//! Single-shard proofs produced through the shard manager, shipped in
//! compressed form, and cross-shard transfer proofs.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sc_01_merkle_trie::{verify_proof, CompressedProof, TrieNode};
    use sc_02_sharding::{build_global_root, Hash, ShardError, ShardManager};
    use sha2::{Digest, Sha256};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn funded_manager() -> ShardManager {
        let manager = ShardManager::new(4).unwrap();
        for (name, balance) in [
            ("alice", "500"),
            ("bob", "250"),
            ("charlie", "75"),
            ("dave", "10"),
        ] {
            manager.apply_tx(name.as_bytes(), balance.as_bytes().to_vec());
        }
        manager
    }

    // =============================================================================
    // SINGLE-SHARD PROOFS
    // =============================================================================

    #[test]
    fn test_shard_proof_survives_compression_transport() {
        let manager = funded_manager();
        let index = manager.shard_index(b"charlie");
        let root = manager.shard_root(index).unwrap();
        let proof = manager.proof(index, b"charlie").unwrap();

        let wire = CompressedProof::compress(&proof).to_bytes().unwrap();
        let received = CompressedProof::from_bytes(&wire)
            .unwrap()
            .decompress()
            .unwrap();

        assert_eq!(received, proof);
        assert!(verify_proof(&root, b"charlie", &received));
    }

    #[test]
    fn test_proof_from_wrong_shard_rejected() {
        let manager = ShardManager::new(8).unwrap();
        manager.apply_tx(b"alice", b"1".to_vec());
        let home = manager.shard_index(b"alice");
        let other = (home + 1) % manager.shard_count();

        let proof = manager.proof(home, b"alice").unwrap();
        assert!(!verify_proof(&manager.shard_root(other).unwrap(), b"alice", &proof));
        assert!(manager.proof(other, b"alice").is_err());
    }

    // =============================================================================
    // CROSS-SHARD PROOFS
    // =============================================================================

    #[test]
    fn test_cross_proof_round_trip() {
        let manager = funded_manager();
        let src = manager.shard_index(b"alice");
        let dst = manager.shard_index(b"bob");
        let global_before = manager.global_root();

        let proof = manager
            .generate_cross_proof(src, dst, b"alice", b"bob", b"50")
            .unwrap();

        assert!(proof.verify_cross_proof(verify_proof).is_ok());
        assert_ne!(manager.global_root(), global_before);
        assert_eq!(manager.shard_root(src).unwrap(), proof.post_src_root);
        assert_eq!(manager.shard_root(dst).unwrap(), proof.post_dst_root);
    }

    #[test]
    fn test_cross_proof_pre_proof_binds_to_stale_root() {
        let manager = funded_manager();
        let src = manager.shard_index(b"alice");
        let dst = manager.shard_index(b"bob");
        let stale_src_root = manager.shard_root(src).unwrap();

        let proof = manager
            .generate_cross_proof(src, dst, b"alice", b"bob", b"50")
            .unwrap();

        assert!(verify_proof(&stale_src_root, b"alice", &proof.src_proof));
        assert!(!verify_proof(&proof.post_src_root, b"alice", &proof.src_proof));
    }

    #[test]
    fn test_cross_proof_missing_key_leaves_state_untouched() {
        let manager = funded_manager();
        let roots = manager.shard_roots();
        let src = manager.shard_index(b"mallory");
        let dst = manager.shard_index(b"bob");

        let err = manager
            .generate_cross_proof(src, dst, b"mallory", b"bob", b"50")
            .unwrap_err();

        assert!(matches!(err, ShardError::SourceProof(_)));
        assert_eq!(err.to_string(), "source proof error: key not found: 0x6d616c6c6f7279");
        assert_eq!(manager.shard_roots(), roots);
    }

    #[test]
    fn test_cross_proof_does_not_drive_rebalance_counters() {
        let manager = funded_manager();
        let before = manager.collect_stats();
        let src = manager.shard_index(b"alice");
        let dst = manager.shard_index(b"bob");
        manager
            .generate_cross_proof(src, dst, b"alice", b"bob", b"50")
            .unwrap();
        assert_eq!(manager.collect_stats(), before);
    }

    // =============================================================================
    // GLOBAL ROOT
    // =============================================================================

    fn sha256(data: &[u8]) -> Hash {
        Sha256::digest(data).into()
    }

    #[test]
    fn test_global_root_is_length_prefixed_concatenation() {
        let manager = funded_manager();
        let roots = manager.shard_roots();
        let mut buf = Vec::new();
        for root in &roots {
            buf.extend_from_slice(&(root.len() as u16).to_be_bytes());
            buf.extend_from_slice(root);
        }
        assert_eq!(manager.global_root(), sha256(&buf));
        assert_eq!(build_global_root(&roots), sha256(&buf));
    }

    proptest! {
        #[test]
        fn prop_insert_order_irrelevant_across_shards(
            mut entries in prop::collection::vec(
                (prop::collection::vec(any::<u8>(), 1..6), prop::collection::vec(any::<u8>(), 1..4)),
                1..30,
            ),
        ) {
            // Last write per key wins, so dedupe first.
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            entries.dedup_by(|a, b| a.0 == b.0);

            let forward = ShardManager::new(3).unwrap();
            let backward = ShardManager::new(3).unwrap();
            for (k, v) in &entries {
                forward.apply_tx(k, v.clone());
            }
            for (k, v) in entries.iter().rev() {
                backward.apply_tx(k, v.clone());
            }
            prop_assert_eq!(forward.global_root(), backward.global_root());

            let mut trie = TrieNode::new();
            for (k, v) in &entries {
                trie.insert(k, v.clone());
            }
            prop_assert_eq!(trie.len(), entries.len());
        }
    }
}

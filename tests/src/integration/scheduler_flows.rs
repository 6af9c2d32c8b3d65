//! # Scheduler Flows
//!
//! Producers, the tick loop and the shard manager running together.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use sc_02_sharding::{RebalanceOp, ShardManager};
    use sc_03_scheduler::{
        run_workload_with_rng, Scheduler, SchedulerConfig, SchedulerError, WorkloadConfig,
    };
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    fn scheduler(shards: usize, config: SchedulerConfig) -> Scheduler {
        let manager = Arc::new(ShardManager::new(shards).unwrap());
        Scheduler::new(manager, config).unwrap()
    }

    // =============================================================================
    // FAIRNESS
    // =============================================================================

    #[test]
    fn test_hundred_transactions_applied_exactly_once() {
        let mut scheduler = scheduler(
            6,
            SchedulerConfig {
                active_count: 2,
                ..SchedulerConfig::for_testing()
            },
        );
        let handle = scheduler.handle();
        for n in 0..100u32 {
            handle
                .try_submit(format!("key-{n}").into_bytes(), n.to_be_bytes().to_vec())
                .unwrap();
        }

        let reports = scheduler.tick_until_empty(50);

        assert_eq!(handle.pending(), 0);
        assert_eq!(reports.iter().map(|r| r.applied).sum::<usize>(), 100);
        assert!(reports.iter().map(|r| r.requeued).sum::<usize>() > 0);
        let manager = scheduler.manager();
        assert_eq!(manager.collect_stats().iter().sum::<u64>(), 100);
        for n in 0..100u32 {
            assert_eq!(
                manager.get(format!("key-{n}").as_bytes()),
                Some(n.to_be_bytes().to_vec())
            );
        }
    }

    #[test]
    fn test_fairness_with_rebalancing() {
        let mut scheduler = scheduler(
            4,
            SchedulerConfig {
                active_count: 1,
                split_threshold: 100.0,
                merge_threshold: 0.5,
                ..SchedulerConfig::for_testing()
            },
        );
        let handle = scheduler.handle();
        for n in 0..100u32 {
            handle
                .try_submit(format!("k{n}").into_bytes(), vec![1])
                .unwrap();
        }

        let reports = scheduler.tick_until_empty(200);

        assert_eq!(handle.pending(), 0);
        assert_eq!(reports.iter().map(|r| r.applied).sum::<usize>(), 100);
        for report in &reports {
            assert!(report.rebalance.verify_transition().is_ok());
        }
        // Every key is stored somewhere even if routing moved after a split.
        for n in 0..100u32 {
            assert!(scheduler.manager().locate(format!("k{n}").as_bytes()).is_some());
        }
        assert!(reports
            .iter()
            .any(|r| r.rebalance.operation != RebalanceOp::None));
    }

    // =============================================================================
    // BACKPRESSURE
    // =============================================================================

    #[test]
    fn test_full_queue_rejects_non_blocking_submit() {
        let scheduler = scheduler(
            2,
            SchedulerConfig {
                queue_capacity: 5,
                ..SchedulerConfig::for_testing()
            },
        );
        let handle = scheduler.handle();
        for n in 0..5u8 {
            handle.try_submit(vec![n], vec![n]).unwrap();
        }
        assert_eq!(
            handle.try_submit(vec![9], vec![9]),
            Err(SchedulerError::QueueFull { capacity: 5 })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_producer_resumes_after_tick() {
        let manager = Arc::new(ShardManager::new(1).unwrap());
        let config = SchedulerConfig {
            queue_capacity: 2,
            active_count: 1,
            tick_interval: Duration::from_millis(100),
            ..SchedulerConfig::for_testing()
        };
        let scheduler = Scheduler::new(Arc::clone(&manager), config).unwrap();
        let handle = scheduler.handle();

        let producer = {
            let handle = handle.clone();
            tokio::spawn(async move {
                for n in 0..10u8 {
                    handle.submit(vec![n], vec![n]).await?;
                }
                Ok::<_, SchedulerError>(())
            })
        };

        let stats = scheduler.spawn(Duration::from_secs(2)).await.unwrap();
        producer.await.unwrap().unwrap();

        assert_eq!(stats.applied, 10);
        assert_eq!(manager.entries().len(), 10);
    }

    // =============================================================================
    // END TO END
    // =============================================================================

    #[tokio::test(start_paused = true)]
    async fn test_workload_through_scheduler() {
        let manager = Arc::new(ShardManager::new(4).unwrap());
        let config = SchedulerConfig {
            tick_interval: Duration::from_millis(200),
            active_count: 2,
            split_threshold: 1_000.0,
            merge_threshold: -1.0,
            ..SchedulerConfig::for_testing()
        };
        let scheduler = Scheduler::new(Arc::clone(&manager), config).unwrap();
        let handle = scheduler.handle();

        let workload = WorkloadConfig {
            rate_per_sec: 100,
            duration: Duration::from_secs(2),
            ..WorkloadConfig::default()
        };
        let keys = workload.keys.clone();

        let ticks = scheduler.spawn(Duration::from_secs(3));
        let submitted = run_workload_with_rng(handle.clone(), workload, StdRng::seed_from_u64(42))
            .unwrap()
            .await
            .unwrap();
        let stats = ticks.await.unwrap();

        assert_eq!(stats.applied, submitted);
        assert_eq!(handle.pending(), 0);

        let stored: HashMap<Vec<u8>, Vec<u8>> = manager
            .entries()
            .into_iter()
            .map(|kv| (kv.key, kv.value))
            .collect();
        assert!(stored.keys().all(|k| keys.iter().any(|name| name.as_bytes() == k.as_slice())));
        assert!(stored.values().all(|v| v.len() == 16));
    }
}

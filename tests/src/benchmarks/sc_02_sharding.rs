//! # SC-02 Sharding Benchmarks
//!
//! Routed writes under the manager guard, rebalance snapshots and global
//! root aggregation.

use super::generate_keys;
use criterion::{black_box, BatchSize, BenchmarkId, Criterion, Throughput};
use sc_02_sharding::{build_global_root, route_key, Shard, ShardManager};

pub fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-02/routing");
    let keys = generate_keys(1_000, 20, 10);

    group.throughput(Throughput::Elements(keys.len() as u64));
    group.bench_function("route_1000_keys", |b| {
        b.iter(|| {
            for key in &keys {
                black_box(route_key(key, 16));
            }
        })
    });

    group.finish();
}

pub fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-02/apply_tx");

    for shards in [1, 4, 16] {
        let keys = generate_keys(1_000, 20, 11);
        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(BenchmarkId::new("shards", shards), &keys, |b, keys| {
            b.iter_batched(
                || ShardManager::new(shards).expect("non-zero shard count"),
                |manager| {
                    for key in keys {
                        manager.apply_tx(key, vec![1]);
                    }
                    black_box(manager.global_root())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

pub fn bench_rebalance(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-02/rebalance");

    for keys_in_hot_shard in [100, 1_000] {
        let keys = generate_keys(keys_in_hot_shard, 20, 12);
        group.bench_with_input(
            BenchmarkId::new("split", keys_in_hot_shard),
            &keys,
            |b, keys| {
                b.iter_batched(
                    || {
                        let mut hot = Shard::new();
                        for key in keys {
                            hot.apply(key, vec![0]);
                        }
                        ShardManager::from_shards(vec![hot, Shard::new(), Shard::new()])
                            .expect("non-empty shard set")
                    },
                    |manager| black_box(manager.rebalance_with_proof(1.0, -1.0)),
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

pub fn bench_global_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("sc-02/global_root");

    for count in [4, 64, 1024] {
        let roots: Vec<[u8; 32]> = (0..count).map(|i| [(i % 251) as u8; 32]).collect();
        group.bench_with_input(BenchmarkId::from_parameter(count), &roots, |b, roots| {
            b.iter(|| black_box(build_global_root(roots)))
        });
    }

    group.finish();
}

pub fn register_benchmarks(c: &mut Criterion) {
    bench_routing(c);
    bench_apply(c);
    bench_rebalance(c);
    bench_global_root(c);
}

//! Benchmarks for RankTree.
//!
//! Run with: `cargo bench --bench rank_tree`

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rankkit::ds::RankTree;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

fn shuffled_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n as u64).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys
}

fn build(keys: &[u64]) -> RankTree<u64, ()> {
    let mut tree = RankTree::new();
    for &k in keys {
        tree.insert(k, ());
    }
    tree
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_tree_insert");
    for n in SIZES {
        let keys = shuffled_keys(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| black_box(build(keys)))
        });
    }
    group.finish();
}

// ============================================================================
// Rank / select
// ============================================================================

fn bench_rank_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_tree_query");
    for n in SIZES {
        let tree = build(&shuffled_keys(n, 42));
        let probes: Vec<u64> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..1024).map(|_| rng.gen_range(0..n as u64)).collect()
        };
        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::new("rank", n), &probes, |b, probes| {
            b.iter(|| {
                for key in probes {
                    black_box(tree.rank(black_box(key)));
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("select", n), &probes, |b, probes| {
            b.iter(|| {
                for &key in probes {
                    black_box(tree.select(black_box(key as usize + 1)));
                }
            })
        });
    }
    group.finish();
}

// ============================================================================
// Churn (remove + reinsert, the score-update path)
// ============================================================================

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_tree_churn");
    let n = 10_000;
    group.throughput(Throughput::Elements(1024));
    group.bench_function("remove_reinsert", |b| {
        b.iter_batched(
            || build(&shuffled_keys(n, 42)),
            |mut tree| {
                let mut rng = StdRng::seed_from_u64(11);
                for _ in 0..1024 {
                    let key = rng.gen_range(0..n as u64);
                    tree.remove(&key);
                    tree.insert(key, ());
                }
                tree
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_rank_select, bench_churn);
criterion_main!(benches);

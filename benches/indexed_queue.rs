//! Micro-operation benchmarks for the indexed queue.
//!
//! Run with: `cargo bench --bench indexed_queue`
//!
//! Measures per-operation latency for the queue primitives under a few
//! key distributions: ascending (append path), random (scan and shift),
//! and pop/insert near the front (hole reuse, the Dijkstra pattern).

use std::hint::black_box;
use std::time::Instant;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pqkit::ds::{EntryId, IndexedQueue, KeyedQueue};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const SIZES: [usize; 3] = [1_024, 4_096, 16_384];
const OPS: u64 = 10_000;

fn random_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random::<u64>() % 1_000_000).collect()
}

fn filled(size: usize) -> (IndexedQueue<u64, u64>, Vec<EntryId>) {
    let mut queue = IndexedQueue::with_capacity(size);
    let ids = random_keys(size, 42)
        .into_iter()
        .enumerate()
        .map(|(i, key)| queue.insert(key, i as u64))
        .collect();
    (queue, ids)
}

// ============================================================================
// Insert
// ============================================================================

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for &size in &SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("ascending", size), &size, |b, &size| {
            b.iter(|| {
                let mut queue = IndexedQueue::with_capacity(size);
                for i in 0..size as u64 {
                    queue.insert(i, i);
                }
                black_box(queue.len())
            })
        });

        let keys = random_keys(size, 7);
        group.bench_with_input(BenchmarkId::new("random", size), &keys, |b, keys| {
            b.iter(|| {
                let mut queue = IndexedQueue::with_capacity(keys.len());
                for (i, &key) in keys.iter().enumerate() {
                    queue.insert(key, i);
                }
                black_box(queue.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("create", size), &keys, |b, keys| {
            b.iter(|| {
                let mut queue = IndexedQueue::with_capacity(keys.len());
                let ids = queue.create(keys.iter().copied().zip(0..));
                black_box(ids.len())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Pop / front-hole reuse
// ============================================================================

fn bench_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("pop");
    group.throughput(Throughput::Elements(OPS));

    for &size in &SIZES {
        group.bench_function(BenchmarkId::new("pop_reinsert_near_front", size), |b| {
            b.iter_custom(|iters| {
                let (mut queue, _) = filled(size);
                let mut rng = SmallRng::seed_from_u64(3);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        if let Some((key, value)) = queue.pop() {
                            let bump = rng.random::<u64>() % 64;
                            black_box(queue.insert(key + bump, value));
                        }
                    }
                }
                start.elapsed()
            })
        });

        group.bench_function(BenchmarkId::new("drain", size), |b| {
            b.iter_custom(|iters| {
                let mut total = std::time::Duration::ZERO;
                for _ in 0..iters {
                    let (mut queue, _) = filled(size);
                    let start = Instant::now();
                    while let Some(entry) = queue.pop() {
                        black_box(entry);
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

// ============================================================================
// Erase / update through ids
// ============================================================================

fn bench_by_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("by_id");
    group.throughput(Throughput::Elements(OPS));

    for &size in &SIZES {
        group.bench_function(BenchmarkId::new("erase_reinsert", size), |b| {
            b.iter_custom(|iters| {
                let (mut queue, mut ids) = filled(size);
                let mut rng = SmallRng::seed_from_u64(5);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        let slot = rng.random_range(0..ids.len());
                        if let Some((key, value)) = queue.erase(ids[slot]) {
                            ids[slot] = queue.insert(key, value);
                        }
                    }
                }
                start.elapsed()
            })
        });

        group.bench_function(BenchmarkId::new("update_small_step", size), |b| {
            b.iter_custom(|iters| {
                let (mut queue, ids) = filled(size);
                let mut rng = SmallRng::seed_from_u64(9);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        let id = ids[rng.random_range(0..ids.len())];
                        if let Some(&key) = queue.key(id) {
                            let step = rng.random::<u64>() % 200;
                            black_box(queue.update(id, (key + step).saturating_sub(100)));
                        }
                    }
                }
                start.elapsed()
            })
        });

        group.bench_function(BenchmarkId::new("contains", size), |b| {
            let (queue, ids) = filled(size);
            b.iter(|| {
                for id in &ids {
                    black_box(queue.contains(*id));
                }
            })
        });
    }

    group.finish();
}

// ============================================================================
// Keyed relaxation
// ============================================================================

fn bench_keyed(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("decrease_then_pop", |b| {
        b.iter_custom(|iters| {
            let mut rng = SmallRng::seed_from_u64(11);
            let start = Instant::now();
            for _ in 0..iters {
                let mut frontier: KeyedQueue<u32, u64> = KeyedQueue::with_capacity(4_096);
                for _ in 0..OPS {
                    let node = rng.random_range(0..4_096u32);
                    frontier.decrease(node, rng.random::<u64>() % 100_000);
                    if rng.random_bool(0.25) {
                        black_box(frontier.pop());
                    }
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_pop, bench_by_id, bench_keyed);
criterion_main!(benches);

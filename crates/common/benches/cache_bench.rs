//! Cache benchmarks
//!
//! Insert, hit, miss, eviction and read-through costs for `DataCache`.
//!
//! Run with: `cargo bench --bench cache_bench -p chirp-common --features
//! runtime`

use std::sync::Arc;
use std::time::Duration;

use chirp_common::cache::{CacheConfig, CoalescingLoader, DataCache, EvictionPolicy};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

type FeedCache = DataCache<Arc<Vec<String>>>;

fn bounded(size: usize) -> CacheConfig {
    CacheConfig::bounded(Duration::from_secs(300), size)
}

// ============================================================================
// Basic Operations Benchmarks
// ============================================================================

fn bench_cache_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_set");

    for size in [50, 200, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("fifo", size), &size, |b, &size| {
            let cache: DataCache<u64> = DataCache::new(bounded(size));
            let mut counter = 0u64;
            b.iter(|| {
                cache.set(format!("profile:{}", counter % size as u64), black_box(counter));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_cache_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_get_hit");

    for size in [50, 200, 1000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("fifo", size), &size, |b, &size| {
            let cache: DataCache<u64> = DataCache::new(bounded(size));
            let keys: Vec<String> = (0..size).map(|i| format!("profile:{i}")).collect();
            for (i, key) in keys.iter().enumerate() {
                cache.set(key.clone(), i as u64);
            }
            let mut counter = 0usize;
            b.iter(|| {
                let _ = black_box(cache.get(&keys[counter % size]));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_cache_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_get_miss");
    group.throughput(Throughput::Elements(1));
    group.bench_function("fifo_200", |b| {
        let cache: DataCache<u64> = DataCache::new(bounded(200));
        for i in 0..200u64 {
            cache.set(format!("profile:{i}"), i);
        }
        b.iter(|| black_box(cache.get(black_box("profile:missing"))));
    });
    group.finish();
}

// ============================================================================
// Eviction Benchmarks
// ============================================================================

fn bench_eviction_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_beyond_capacity");

    for (name, policy) in [("fifo", EvictionPolicy::Fifo), ("lru", EvictionPolicy::Lru)] {
        for size in [50, 200, 1000] {
            group.throughput(Throughput::Elements(1));
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, &size| {
                let config =
                    CacheConfig::builder().max_entries(size).eviction_policy(policy).build();
                let cache: DataCache<u64> = DataCache::new(config);
                for i in 0..size as u64 {
                    cache.set(format!("k{i}"), i);
                }
                let mut counter = size as u64;
                b.iter(|| {
                    cache.set(format!("k{counter}"), black_box(counter));
                    counter = counter.wrapping_add(1);
                });
            });
        }
    }

    group.finish();
}

// ============================================================================
// Read-through Benchmarks
// ============================================================================

fn bench_loader_hit(c: &mut Criterion) {
    let Ok(runtime) = tokio::runtime::Runtime::new() else {
        return;
    };
    let mut group = c.benchmark_group("loader");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_or_fetch_hit", |b| {
        let cache: FeedCache = DataCache::new(bounded(50));
        let loader = CoalescingLoader::new(cache.clone());
        cache.set("feed:for_you", Arc::new(vec!["t1".to_string(), "t2".to_string()]));

        b.to_async(&runtime).iter(|| {
            let loader = loader.clone();
            async move {
                let value = loader
                    .get_or_fetch("feed:for_you", || async {
                        Ok::<_, std::convert::Infallible>(Arc::new(Vec::new()))
                    })
                    .await;
                black_box(value)
            }
        });
    });

    group.finish();
}

criterion_group!(basic_operations, bench_cache_set, bench_cache_get_hit, bench_cache_get_miss);
criterion_group!(eviction, bench_eviction_policies);
criterion_group!(read_through, bench_loader_hit);

criterion_main!(basic_operations, eviction, read_through);

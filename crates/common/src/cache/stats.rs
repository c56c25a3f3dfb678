//! Cache statistics and metrics tracking
//!
//! `CacheStats` is a point-in-time snapshot. Counters live in a
//! `MetricsCollector` shared by every clone of a cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Snapshot of a cache's occupancy and access counters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Current number of entries (expired entries not yet accessed included)
    pub size: usize,

    /// Maximum allowed entries
    pub max_size: usize,

    /// `size / max_size` as a percentage in `0.0..=100.0`
    pub usage_percent: f64,

    /// Lookups that returned a live value
    pub hits: u64,

    /// Lookups that found nothing or an expired entry
    pub misses: u64,

    /// Total number of `set` operations that stored a value
    pub inserts: u64,

    /// Entries removed to make room for a new key
    pub evictions: u64,

    /// Expired entries removed on access or by an explicit purge
    pub expirations: u64,
}

impl CacheStats {
    /// Calculate hit rate (hits / total accesses)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Calculate miss rate (misses / total accesses)
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// Total number of access operations (hits + misses)
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

pub(crate) fn usage_percent(size: usize, max_size: usize) -> f64 {
    if max_size == 0 {
        0.0
    } else {
        size as f64 / max_size as f64 * 100.0
    }
}

/// Thread-safe metrics collector for cache operations
///
/// Atomic counters keep monitoring off the storage lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    expirations: AtomicU64,
}

impl MetricsCollector {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&self) {
        self.inner.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.inner.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inner.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.inner.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expirations(&self, count: u64) {
        self.inner.expirations.fetch_add(count, Ordering::Relaxed);
    }

    /// Get current statistics snapshot
    pub(crate) fn snapshot(&self, size: usize, max_size: usize) -> CacheStats {
        CacheStats {
            size,
            max_size,
            usage_percent: usage_percent(size, max_size),
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            inserts: self.inner.inserts.load(Ordering::Relaxed),
            evictions: self.inner.evictions.load(Ordering::Relaxed),
            expirations: self.inner.expirations.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero
    pub(crate) fn reset(&self) {
        self.inner.hits.store(0, Ordering::Relaxed);
        self.inner.misses.store(0, Ordering::Relaxed);
        self.inner.inserts.store(0, Ordering::Relaxed);
        self.inner.evictions.store(0, Ordering::Relaxed);
        self.inner.expirations.store(0, Ordering::Relaxed);
    }
}

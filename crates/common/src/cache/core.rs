//! Bounded TTL cache keyed by string
//!
//! Entries expire lazily: an expired entry stays in storage until a lookup
//! touches it (or [`DataCache::purge_expired`] is called), at which point it
//! is removed and reported as absent. Capacity is counted in entries only.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::config::{CacheConfig, EvictionPolicy};
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

/// Longest lifetime an entry can get; longer TTLs are clamped to it
pub const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A stored value with its insertion and expiry instants
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    data: V,
    stored_at: Instant,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// Create an entry stored at `now` that lives for `ttl`, at most [`MAX_TTL`]
    pub fn new(data: V, now: Instant, ttl: Duration) -> Self {
        let expires_at = now.checked_add(ttl.min(MAX_TTL)).unwrap_or(now);
        Self { data, stored_at: now, expires_at }
    }

    /// The cached value
    pub fn data(&self) -> &V {
        &self.data
    }

    /// When the entry was stored
    pub fn stored_at(&self) -> Instant {
        self.stored_at
    }

    /// When the entry stops being served
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    /// An entry is still live at exactly `expires_at`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug)]
struct CacheStorage<V> {
    entries: HashMap<String, CacheEntry<V>>,
    /// Eviction order, front is evicted first
    order: VecDeque<String>,
}

impl<V> CacheStorage<V> {
    fn new() -> Self {
        Self { entries: HashMap::new(), order: VecDeque::new() }
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        Some(entry)
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }
}

/// Bounded, time-expiring key-value store
///
/// Clones share storage and counters, so one instance can be handed to
/// several services.
///
/// # Type Parameters
/// - `V`: Value type (must be `Clone`; wrap large payloads in `Arc`)
/// - `C`: Clock used for expiry (defaults to `SystemClock`)
///
/// # Example
/// ```
/// use std::time::Duration;
///
/// use chirp_common::cache::{CacheConfig, DataCache};
///
/// let cache: DataCache<i32> = DataCache::new(CacheConfig::bounded(Duration::from_secs(1), 2));
/// cache.set("a", 1);
/// cache.set("b", 2);
/// cache.set("c", 3);
///
/// assert_eq!(cache.get("a"), None);
/// assert_eq!(cache.get("b"), Some(2));
/// assert_eq!(cache.get("c"), Some(3));
/// ```
pub struct DataCache<V, C = SystemClock>
where
    V: Clone,
    C: Clock,
{
    storage: Arc<Mutex<CacheStorage<V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<V> DataCache<V, SystemClock>
where
    V: Clone,
{
    /// Create a new cache with the given configuration using system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C> DataCache<V, C>
where
    V: Clone,
    C: Clock + Clone,
{
    /// Create a new cache with a custom clock (useful for testing)
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            storage: Arc::new(Mutex::new(CacheStorage::new())),
            config,
            metrics: MetricsCollector::new(),
            clock,
        }
    }

    /// Store `value` under `key` with the default TTL
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.set_with_ttl(key, value, self.config.ttl);
    }

    /// Store `value` under `key` with an explicit TTL
    ///
    /// When the cache is full and `key` is new, the entry at the front of the
    /// eviction order is dropped first. Overwriting an existing key never
    /// evicts and keeps the key's position.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        if self.config.max_entries == 0 {
            return;
        }

        let key = key.into();
        let entry = CacheEntry::new(value, self.clock.now(), ttl);
        let mut storage = self.storage.lock();

        if let Some(existing) = storage.entries.get_mut(&key) {
            *existing = entry;
        } else {
            if storage.entries.len() >= self.config.max_entries {
                if let Some(oldest) = storage.order.pop_front() {
                    storage.entries.remove(&oldest);
                    if self.config.track_metrics {
                        self.metrics.record_eviction();
                    }
                }
            }
            storage.order.push_back(key.clone());
            storage.entries.insert(key, entry);
        }

        if self.config.track_metrics {
            self.metrics.record_insert();
        }
    }

    /// Get a live value
    ///
    /// Returns `None` if the key is missing. An expired entry is removed and
    /// reported as `None`.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut storage = self.storage.lock();

        let expired = match storage.entries.get(key) {
            None => {
                self.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            storage.remove(key);
            if self.config.track_metrics {
                self.metrics.record_miss();
                self.metrics.record_expirations(1);
            }
            return None;
        }

        if self.config.eviction_policy == EvictionPolicy::Lru {
            storage.touch(key);
        }
        if self.config.track_metrics {
            self.metrics.record_hit();
        }
        storage.entries.get(key).map(|entry| entry.data.clone())
    }

    /// Read a live value without recording a hit or miss or reordering
    pub(crate) fn peek(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        self.storage
            .lock()
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.data.clone())
    }

    /// Whether a live value exists (expires the entry like `get`)
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove an entry; removing a missing key is a no-op
    pub fn delete(&self, key: &str) -> Option<V> {
        self.storage.lock().remove(key).map(|entry| entry.data)
    }

    /// Remove all entries. Counters are kept.
    pub fn clear(&self) {
        let mut storage = self.storage.lock();
        storage.entries.clear();
        storage.order.clear();
    }

    /// Current number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.storage.lock().entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored keys in eviction order (next victim first)
    pub fn keys(&self) -> Vec<String> {
        self.storage.lock().order.iter().cloned().collect()
    }

    /// Remove every expired entry now
    ///
    /// Returns the number of entries removed. Nothing calls this
    /// automatically.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut storage = self.storage.lock();

        let before = storage.entries.len();
        storage.entries.retain(|_, entry| !entry.is_expired_at(now));
        let CacheStorage { entries, order } = &mut *storage;
        order.retain(|k| entries.contains_key(k));
        let removed = before - storage.entries.len();

        if self.config.track_metrics && removed > 0 {
            self.metrics.record_expirations(removed as u64);
        }
        removed
    }

    /// Occupancy and counters; does not touch entries
    pub fn get_stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.max_entries)
    }

    /// Reset hit/miss/eviction counters
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// The configuration this cache was built with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn record_miss(&self) {
        if self.config.track_metrics {
            self.metrics.record_miss();
        }
    }
}

impl<V, C> Clone for DataCache<V, C>
where
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<V, C> std::fmt::Debug for DataCache<V, C>
where
    V: Clone,
    C: Clock,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataCache")
            .field("config", &self.config)
            .field("len", &self.storage.lock().entries.len())
            .finish_non_exhaustive()
    }
}

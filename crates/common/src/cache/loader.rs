//! Read-through loading with per-key fetch coalescing
//!
//! [`CoalescingLoader`] sits in front of a [`DataCache`]. A cache hit returns
//! immediately; on a miss, at most one fetch per key is in flight and every
//! concurrent caller for that key receives its result.
//!
//! Invalidation goes through the loader so it also forgets in-flight fetches:
//! a fetch that started before [`CoalescingLoader::invalidate`] still answers
//! its own callers but is not stored, and later callers start a new fetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::OnceCell;
#[cfg(feature = "observability")]
use tracing::debug;

use super::core::DataCache;
use crate::time::{Clock, SystemClock};

type InFlight<V> = Arc<OnceCell<V>>;

/// Read-through front for a [`DataCache`] that collapses concurrent fetches
///
/// # Example
/// ```
/// # tokio_test::block_on(async {
/// use chirp_common::cache::{CacheConfig, CoalescingLoader, DataCache};
///
/// let cache: DataCache<String> = DataCache::new(CacheConfig::default());
/// let loader = CoalescingLoader::new(cache.clone());
///
/// let value = loader
///     .get_or_fetch("profile:u1", || async { Ok::<_, std::io::Error>("bob".to_string()) })
///     .await
///     .unwrap();
///
/// assert_eq!(value, "bob");
/// assert_eq!(cache.get("profile:u1"), Some("bob".to_string()));
/// # });
/// ```
pub struct CoalescingLoader<V, C = SystemClock>
where
    V: Clone,
    C: Clock,
{
    cache: DataCache<V, C>,
    pending: Arc<Mutex<HashMap<String, InFlight<V>>>>,
}

impl<V, C> CoalescingLoader<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Clock + Clone,
{
    /// Wrap a cache; the loader shares the cache's storage
    pub fn new(cache: DataCache<V, C>) -> Self {
        Self { cache, pending: Arc::new(Mutex::new(HashMap::new())) }
    }

    /// The cache this loader reads through
    pub fn cache(&self) -> &DataCache<V, C> {
        &self.cache
    }

    /// Return the cached value for `key`, fetching it on a miss
    ///
    /// The fetched value is stored with the cache's default TTL. If `fetch`
    /// fails, nothing is stored and the error is returned to this caller
    /// only; a caller that was waiting on it runs its own fetch.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let ttl = self.cache.config().ttl;
        self.get_or_fetch_with_ttl(key, ttl, fetch).await
    }

    /// Like [`get_or_fetch`](Self::get_or_fetch) with an explicit TTL
    pub async fn get_or_fetch_with_ttl<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }

        let cell = self.in_flight_cell(key);
        let own = &cell;
        let result = cell
            .get_or_try_init(move || async move {
                // a fetch for this key may have finished and released its cell
                // between our miss and taking a new one
                if let Some(value) = self.cache.peek(key) {
                    return Ok(value);
                }
                let value = fetch().await?;
                self.store_if_current(key, own, value.clone(), ttl);
                Ok(value)
            })
            .await
            .cloned();

        self.release(key, &cell);
        result
    }

    /// Drop `key` from the cache and forget any fetch in flight for it
    pub fn invalidate(&self, key: &str) -> Option<V> {
        let mut pending = self.pending.lock();
        pending.remove(key);
        self.cache.delete(key)
    }

    /// Invalidate every stored or in-flight key matching `predicate`
    ///
    /// Returns the number of stored entries removed.
    pub fn invalidate_matching<P>(&self, predicate: P) -> usize
    where
        P: Fn(&str) -> bool,
    {
        let mut pending = self.pending.lock();
        pending.retain(|key, _| !predicate(key.as_str()));
        self.cache
            .keys()
            .into_iter()
            .filter(|key| predicate(key.as_str()))
            .filter(|key| self.cache.delete(key).is_some())
            .count()
    }

    /// Empty the cache and forget every in-flight fetch
    pub fn invalidate_all(&self) {
        let mut pending = self.pending.lock();
        pending.clear();
        self.cache.clear();
    }

    /// Keys with a fetch currently in flight
    pub fn in_flight(&self) -> Vec<String> {
        self.pending.lock().keys().cloned().collect()
    }

    fn in_flight_cell(&self, key: &str) -> InFlight<V> {
        let mut pending = self.pending.lock();
        if let Some(cell) = pending.get(key) {
            #[cfg(feature = "observability")]
            debug!(key, "Joining in-flight fetch");
            return Arc::clone(cell);
        }
        let cell = Arc::new(OnceCell::new());
        pending.insert(key.to_string(), Arc::clone(&cell));
        cell
    }

    /// Store a fetched value unless the key was invalidated while it was in
    /// flight. The pending lock is held across the write so an invalidation
    /// lands either before the check or after the store.
    fn store_if_current(&self, key: &str, cell: &InFlight<V>, value: V, ttl: Duration) {
        let pending = self.pending.lock();
        if pending.get(key).is_some_and(|current| Arc::ptr_eq(current, cell)) {
            self.cache.set_with_ttl(key, value, ttl);
        } else {
            #[cfg(feature = "observability")]
            debug!(key, "Key invalidated during fetch, result not cached");
        }
    }

    fn release(&self, key: &str, cell: &InFlight<V>) {
        let mut pending = self.pending.lock();
        if pending.get(key).is_some_and(|current| Arc::ptr_eq(current, cell)) {
            pending.remove(key);
        }
    }
}

impl<V, C> Clone for CoalescingLoader<V, C>
where
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self { cache: self.cache.clone(), pending: Arc::clone(&self.pending) }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for cache::loader.
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::cache::CacheConfig;
    use crate::time::MockClock;

    fn loader(ttl_ms: u64) -> (CoalescingLoader<String, MockClock>, MockClock) {
        let clock = MockClock::new();
        let cache = DataCache::with_clock(
            CacheConfig::bounded(Duration::from_millis(ttl_ms), 10),
            clock.clone(),
        );
        (CoalescingLoader::new(cache), clock)
    }

    /// Validates a hit skips the fetch.
    ///
    /// Assertions:
    /// - Confirms the fetch runs once across two sequential loads.
    #[tokio::test]
    async fn test_hit_skips_fetch() {
        let (loader, _clock) = loader(1000);
        let calls = AtomicUsize::new(0);

        for _ in 0..2 {
            let value = loader
                .get_or_fetch("k", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, String>("v".to_string())
                })
                .await
                .unwrap();
            assert_eq!(value, "v");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(loader.in_flight().is_empty());
        let stats = loader.cache().get_stats();
        assert_eq!((stats.misses, stats.hits), (1, 1));
    }

    /// Validates an expired entry is fetched again.
    ///
    /// Assertions:
    /// - Confirms the second load after the TTL returns the new value.
    #[tokio::test]
    async fn test_refetch_after_expiry() {
        let (loader, clock) = loader(10);

        let first = loader.get_or_fetch("k", || async { Ok::<_, String>("old".into()) }).await;
        clock.advance_millis(20);
        let second = loader.get_or_fetch("k", || async { Ok::<_, String>("new".into()) }).await;

        assert_eq!(first.unwrap(), "old");
        assert_eq!(second.unwrap(), "new");
    }

    /// Validates a failed fetch stores nothing.
    ///
    /// Assertions:
    /// - Confirms the error reaches the caller.
    /// - Confirms the cache stays empty and no key is left in flight.
    #[tokio::test]
    async fn test_error_is_not_cached() {
        let (loader, _clock) = loader(1000);

        let result =
            loader.get_or_fetch("k", || async { Err::<String, _>("backend down") }).await;

        assert_eq!(result, Err("backend down"));
        assert!(loader.cache().is_empty());
        assert!(loader.in_flight().is_empty());
    }

    #[tokio::test]
    async fn test_ttl_override() {
        let (loader, clock) = loader(60_000);

        loader
            .get_or_fetch_with_ttl("k", Duration::from_millis(5), || async {
                Ok::<_, String>("v".into())
            })
            .await
            .unwrap();
        clock.advance_millis(6);

        assert_eq!(loader.cache().get("k"), None);
    }

    /// Validates a read after invalidation does not join the older fetch.
    ///
    /// Assertions:
    /// - Confirms the older fetch still answers its own caller.
    /// - Confirms the later caller fetches and caches the new value.
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_invalidate_abandons_in_flight_fetch() {
        let (loader, _clock) = loader(1000);

        let slow = loader.clone();
        let before = tokio::spawn(async move {
            slow.get_or_fetch("profile:u1", || async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                Ok::<_, String>("old".to_string())
            })
            .await
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(loader.in_flight(), ["profile:u1"]);

        loader.invalidate("profile:u1");
        let after = loader
            .get_or_fetch("profile:u1", || async { Ok::<_, String>("new".to_string()) })
            .await
            .unwrap();

        assert_eq!(after, "new");
        assert_eq!(before.await.unwrap().unwrap(), "old");
        assert_eq!(loader.cache().get("profile:u1"), Some("new".to_string()));
        assert!(loader.in_flight().is_empty());
    }

    /// Validates bulk invalidation also drops in-flight fetches.
    ///
    /// Assertions:
    /// - Confirms only matching keys are removed.
    /// - Confirms a fetch running across `invalidate_all` is not stored.
    #[tokio::test]
    async fn test_invalidate_matching_and_all() {
        let (loader, _clock) = loader(1000);
        for key in ["tweets:u1:likes", "tweets:u1:media", "tweets:u2:likes"] {
            loader.cache().set(key, "v".to_string());
        }

        let removed = loader.invalidate_matching(|key| key.starts_with("tweets:u1:"));
        assert_eq!(removed, 2);
        assert_eq!(loader.cache().keys(), ["tweets:u2:likes"]);

        let value = loader
            .get_or_fetch("feed:for_you", || async {
                loader.invalidate_all();
                Ok::<_, String>("stale".to_string())
            })
            .await
            .unwrap();

        assert_eq!(value, "stale");
        assert!(loader.cache().is_empty());
        assert!(loader.in_flight().is_empty());
    }

    /// Validates concurrent loads of one key share a single fetch.
    ///
    /// Assertions:
    /// - Confirms every task receives the fetched value.
    /// - Confirms the fetch ran exactly once.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_fetches_coalesce() {
        let (loader, _clock) = loader(1000);
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let loader = loader.clone();
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    loader
                        .get_or_fetch("feed:home", || async move {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            Ok::<_, String>("payload".to_string())
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), "payload");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(loader.in_flight().is_empty());
    }
}

//! Bounded TTL caching for backend read results
//!
//! [`DataCache`] is a string-keyed store bounded by entry count, with a
//! per-entry time-to-live checked lazily on access. [`CoalescingLoader`]
//! reads through a cache and collapses concurrent fetches for one key.
//!
//! # Features
//!
//! - **Lazy expiry**: expired entries are dropped when a lookup touches them
//! - **Insertion-order eviction** by default, LRU as an explicit opt-in
//! - **Shared handles**: clones share storage, guarded by a
//!   `parking_lot::Mutex`
//! - **Metrics**: hit/miss/eviction/expiration counters and usage percentage
//! - **Testable**: clock abstraction for deterministic expiry tests
//!
//! # Examples
//!
//! ## Bounded TTL cache
//! ```
//! use std::time::Duration;
//!
//! use chirp_common::cache::{CacheConfig, DataCache};
//!
//! let cache: DataCache<String> =
//!     DataCache::new(CacheConfig::bounded(Duration::from_secs(300), 100));
//! cache.set("profile:u1", "bob".to_string());
//! assert_eq!(cache.get("profile:u1"), Some("bob".to_string()));
//! ```
//!
//! ## Per-entry TTL override
//! ```
//! use std::time::Duration;
//!
//! use chirp_common::cache::{CacheConfig, DataCache};
//! use chirp_common::time::MockClock;
//!
//! let clock = MockClock::new();
//! let cache: DataCache<&str, MockClock> =
//!     DataCache::with_clock(CacheConfig::default(), clock.clone());
//!
//! cache.set_with_ttl("x", "bob", Duration::from_millis(10));
//! clock.advance(Duration::from_millis(20));
//!
//! assert_eq!(cache.get("x"), None);
//! assert_eq!(cache.get_stats().size, 0);
//! ```
//!
//! ## Statistics
//! ```
//! use chirp_common::cache::{CacheConfig, DataCache};
//!
//! let cache: DataCache<i32> = DataCache::new(CacheConfig::builder().max_entries(4).build());
//! cache.set("a", 1);
//!
//! let stats = cache.get_stats();
//! assert_eq!(stats.size, 1);
//! assert_eq!(stats.usage_percent, 25.0);
//! ```

mod config;
mod core;
mod loader;
mod stats;
pub mod utils;

// Re-export public API
pub use self::core::{CacheEntry, DataCache, MAX_TTL};

pub use config::{CacheConfig, CacheConfigBuilder, EvictionPolicy, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
pub use loader::CoalescingLoader;
pub use stats::CacheStats;

//! Cache configuration types and builder patterns
//!
//! A cache is bounded by entry count and expires entries by time-to-live.
//! The eviction policy decides which entry makes room when the cache is full.

use std::time::Duration;

/// Default time-to-live when none is configured (five minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Default maximum number of entries when none is configured
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Eviction policy for cache entries when capacity is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// First In First Out - evicts the earliest inserted entry.
    /// Reads never change an entry's position.
    #[default]
    Fifo,
    /// Least Recently Used - a read moves the entry to the back of the
    /// eviction order
    Lru,
}

/// Configuration for cache behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Default time-to-live applied by `set`
    pub ttl: Duration,

    /// Maximum number of entries held at once
    pub max_entries: usize,

    /// Eviction policy when `max_entries` is reached
    pub eviction_policy: EvictionPolicy,

    /// Whether to collect hit/miss/eviction counters
    pub track_metrics: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            max_entries: DEFAULT_MAX_ENTRIES,
            eviction_policy: EvictionPolicy::Fifo,
            track_metrics: true,
        }
    }
}

impl CacheConfig {
    /// Create a new configuration builder
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Quick preset for a bounded TTL cache with insertion-order eviction
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    ///
    /// use chirp_common::cache::{CacheConfig, EvictionPolicy};
    ///
    /// let config = CacheConfig::bounded(Duration::from_secs(120), 50);
    /// assert_eq!(config.eviction_policy, EvictionPolicy::Fifo);
    /// ```
    pub fn bounded(ttl: Duration, max_entries: usize) -> Self {
        Self { ttl, max_entries, ..Self::default() }
    }
}

/// Builder for CacheConfig with fluent API
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum number of entries
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = max_entries;
        self
    }

    /// Set default time-to-live for entries
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.config.ttl = duration;
        self
    }

    /// Set eviction policy
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.config.eviction_policy = policy;
        self
    }

    /// Enable or disable metrics tracking
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Build the configuration
    pub fn build(self) -> CacheConfig {
        self.config
    }
}

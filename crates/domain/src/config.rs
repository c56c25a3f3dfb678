//! Application configuration structures
//!
//! Every section has defaults, so a config file only needs to name what it
//! overrides. Loading lives in `chirp-infra`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOG_LEVEL, FEED_CACHE_MAX_ENTRIES, FEED_CACHE_TTL_MS, PROFILE_CACHE_MAX_ENTRIES,
    PROFILE_CACHE_TTL_MS, TWEET_CACHE_MAX_ENTRIES, TWEET_CACHE_TTL_MS,
};
use crate::{ChirpError, Result};

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub caches: CachesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Check values serde cannot reject on its own
    ///
    /// # Errors
    /// Returns `ChirpError::Config` naming the first invalid cache section.
    pub fn validate(&self) -> Result<()> {
        self.caches.validate()
    }
}

/// TTL and capacity for the three named caches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachesConfig {
    #[serde(default = "CacheSettings::feed_default")]
    pub feed: CacheSettings,
    #[serde(default = "CacheSettings::profile_default")]
    pub profile: CacheSettings,
    #[serde(default = "CacheSettings::tweet_default")]
    pub tweet: CacheSettings,
}

impl Default for CachesConfig {
    fn default() -> Self {
        Self {
            feed: CacheSettings::feed_default(),
            profile: CacheSettings::profile_default(),
            tweet: CacheSettings::tweet_default(),
        }
    }
}

impl CachesConfig {
    /// Reject a cache that could never hold an entry
    ///
    /// # Errors
    /// Returns `ChirpError::Config` if any `max_entries` is zero.
    pub fn validate(&self) -> Result<()> {
        for (name, settings) in [("feed", &self.feed), ("profile", &self.profile), ("tweet", &self.tweet)]
        {
            if settings.max_entries == 0 {
                return Err(ChirpError::Config(format!(
                    "caches.{name}.max_entries must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for one cache instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Default time-to-live in milliseconds
    pub ttl_ms: u64,
    /// Maximum number of entries before eviction
    pub max_entries: usize,
}

impl CacheSettings {
    pub const fn new(ttl_ms: u64, max_entries: usize) -> Self {
        Self { ttl_ms, max_entries }
    }

    pub const fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    pub const fn feed_default() -> Self {
        Self::new(FEED_CACHE_TTL_MS, FEED_CACHE_MAX_ENTRIES)
    }

    pub const fn profile_default() -> Self {
        Self::new(PROFILE_CACHE_TTL_MS, PROFILE_CACHE_MAX_ENTRIES)
    }

    pub const fn tweet_default() -> Self {
        Self::new(TWEET_CACHE_TTL_MS, TWEET_CACHE_MAX_ENTRIES)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `chirp_core=debug`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), json: false }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

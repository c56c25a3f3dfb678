//! Cache health reporting
//!
//! Turns a [`CacheStats`] snapshot into a health verdict with tuning hints,
//! for logs and diagnostics.

use std::fmt;

#[cfg(feature = "observability")]
use tracing::{info, warn};

use super::{CacheStats, DataCache};
use crate::time::Clock;

/// Hit rate below which a cache is flagged (once it has seen enough traffic)
const LOW_HIT_RATE: f64 = 0.5;
/// Accesses needed before the hit rate is judged
const MIN_ACCESSES: u64 = 100;
/// Usage percentage above which a cache is flagged as nearly full
const NEAR_CAPACITY_PERCENT: f64 = 85.0;

/// Cache health status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheHealth {
    /// Cache is operating normally
    Healthy,
    /// Cache hit rate is low, consider tuning
    LowHitRate,
    /// Cache is nearly full, consider increasing size
    NearCapacity,
    /// Cache has both low hit rate and near capacity
    Critical,
}

impl fmt::Display for CacheHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::LowHitRate => write!(f, "Low Hit Rate"),
            Self::NearCapacity => write!(f, "Near Capacity"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// Cache health report with diagnostics
#[derive(Debug, Clone)]
pub struct CacheHealthReport {
    /// Name the cache is reported under
    pub name: String,
    /// Overall health status
    pub health: CacheHealth,
    /// Statistics the verdict was computed from
    pub stats: CacheStats,
    /// Recommendations for optimization
    pub recommendations: Vec<String>,
}

impl CacheHealthReport {
    /// Generate a health report for a cache
    ///
    /// # Example
    /// ```
    /// use chirp_common::cache::utils::{CacheHealth, CacheHealthReport};
    /// use chirp_common::cache::{CacheConfig, DataCache};
    ///
    /// let cache: DataCache<i32> = DataCache::new(CacheConfig::default());
    /// let report = CacheHealthReport::new("profile", &cache);
    /// assert_eq!(report.health, CacheHealth::Healthy);
    /// ```
    pub fn new<V, C>(name: impl Into<String>, cache: &DataCache<V, C>) -> Self
    where
        V: Clone,
        C: Clock + Clone,
    {
        Self::from_stats(name, cache.get_stats())
    }

    /// Generate a report from an existing snapshot
    pub fn from_stats(name: impl Into<String>, stats: CacheStats) -> Self {
        let mut recommendations = Vec::new();

        let low_hit_rate = stats.hit_rate() < LOW_HIT_RATE && stats.total_accesses() > MIN_ACCESSES;
        if low_hit_rate {
            recommendations.push(format!(
                "Hit rate is {:.2}%. Consider increasing max entries or the TTL.",
                stats.hit_rate() * 100.0
            ));
        }

        let near_capacity = stats.usage_percent > NEAR_CAPACITY_PERCENT;
        if near_capacity {
            recommendations.push(format!(
                "Cache is {:.1}% full. Consider increasing max entries.",
                stats.usage_percent
            ));
        }

        if stats.total_accesses() > 0 {
            let eviction_rate = stats.evictions as f64 / stats.total_accesses() as f64;
            if eviction_rate > 0.2 {
                recommendations.push(format!(
                    "High eviction rate: {:.2}%. Cache may be too small for workload.",
                    eviction_rate * 100.0
                ));
            }

            let expiration_rate = stats.expirations as f64 / stats.total_accesses() as f64;
            if expiration_rate > 0.3 {
                recommendations.push(format!(
                    "High expiration rate: {:.2}%. Consider increasing TTL.",
                    expiration_rate * 100.0
                ));
            }
        }

        let health = match (low_hit_rate, near_capacity) {
            (true, true) => CacheHealth::Critical,
            (true, false) => CacheHealth::LowHitRate,
            (false, true) => CacheHealth::NearCapacity,
            (false, false) => CacheHealth::Healthy,
        };

        Self { name: name.into(), health, stats, recommendations }
    }

    /// Structured form of the report
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "cache": self.name,
            "health": self.health.to_string(),
            "size": self.stats.size,
            "max_size": self.stats.max_size,
            "usage_percent": self.stats.usage_percent,
            "hits": self.stats.hits,
            "misses": self.stats.misses,
            "hit_rate": self.stats.hit_rate(),
            "evictions": self.stats.evictions,
            "expirations": self.stats.expirations,
            "recommendations": self.recommendations,
        })
    }

    /// Log the health report using tracing (requires `observability` feature)
    #[cfg(feature = "observability")]
    pub fn log(&self) {
        match self.health {
            CacheHealth::Healthy => {
                info!(
                    cache = %self.name,
                    health = %self.health,
                    hit_rate = self.stats.hit_rate(),
                    size = self.stats.size,
                    max_size = self.stats.max_size,
                    "Cache health check: Healthy"
                );
            }
            CacheHealth::LowHitRate | CacheHealth::NearCapacity | CacheHealth::Critical => {
                warn!(
                    cache = %self.name,
                    health = %self.health,
                    hit_rate = self.stats.hit_rate(),
                    size = self.stats.size,
                    max_size = self.stats.max_size,
                    "Cache health check: Issues detected"
                );
                for rec in &self.recommendations {
                    warn!(cache = %self.name, recommendation = %rec, "Cache optimization recommendation");
                }
            }
        }
    }
}

impl fmt::Display for CacheHealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cache Health Report: {}", self.name)?;
        writeln!(f, "Status: {}", self.health)?;
        writeln!(f, "  Size: {}/{} ({:.1}%)", self.stats.size, self.stats.max_size, self.stats.usage_percent)?;
        writeln!(f, "  Hits: {}", self.stats.hits)?;
        writeln!(f, "  Misses: {}", self.stats.misses)?;
        writeln!(f, "  Hit Rate: {:.2}%", self.stats.hit_rate() * 100.0)?;
        writeln!(f, "  Evictions: {}", self.stats.evictions)?;
        writeln!(f, "  Expirations: {}", self.stats.expirations)?;

        if !self.recommendations.is_empty() {
            writeln!(f, "Recommendations:")?;
            for (i, rec) in self.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec)?;
            }
        }

        Ok(())
    }
}

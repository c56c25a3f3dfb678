//! The three named caches and their payload types

use std::sync::Arc;

use chirp_common::cache::utils::CacheHealthReport;
use chirp_common::cache::{CacheConfig, CacheStats, CoalescingLoader, DataCache};
use chirp_common::time::{Clock, SystemClock};
use chirp_domain::{CacheSettings, CachesConfig, Country, HashtagCount, Tweet, TweetInteractions, UserProfile};
use tracing::info;

/// Values held by the feed cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedPayload {
    Tweets(Arc<Vec<Tweet>>),
    Countries(Arc<Vec<Country>>),
    Hashtags(Arc<Vec<HashtagCount>>),
}

impl FeedPayload {
    pub fn tweets(&self) -> Option<&Arc<Vec<Tweet>>> {
        match self {
            Self::Tweets(tweets) => Some(tweets),
            _ => None,
        }
    }

    pub fn countries(&self) -> Option<&Arc<Vec<Country>>> {
        match self {
            Self::Countries(countries) => Some(countries),
            _ => None,
        }
    }

    pub fn hashtags(&self) -> Option<&Arc<Vec<HashtagCount>>> {
        match self {
            Self::Hashtags(hashtags) => Some(hashtags),
            _ => None,
        }
    }
}

/// Values held by the tweet cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TweetPayload {
    Tweets(Arc<Vec<Tweet>>),
    Interactions(Arc<Vec<TweetInteractions>>),
}

impl TweetPayload {
    pub fn tweets(&self) -> Option<&Arc<Vec<Tweet>>> {
        match self {
            Self::Tweets(tweets) => Some(tweets),
            Self::Interactions(_) => None,
        }
    }

    pub fn interactions(&self) -> Option<&Arc<Vec<TweetInteractions>>> {
        match self {
            Self::Interactions(interactions) => Some(interactions),
            Self::Tweets(_) => None,
        }
    }
}

pub type FeedCache<C = SystemClock> = DataCache<FeedPayload, C>;
pub type ProfileCache<C = SystemClock> = DataCache<Arc<UserProfile>, C>;
pub type TweetCache<C = SystemClock> = DataCache<TweetPayload, C>;

/// Feed, profile and tweet caches
///
/// Built once at startup and handed to each service. Clones share storage
/// and in-flight fetches.
///
/// # Example
/// ```
/// use chirp_core::{keys, AppCaches};
/// use chirp_domain::CachesConfig;
///
/// let caches = AppCaches::new(&CachesConfig::default());
/// assert_eq!(caches.stats().profile.max_size, 100);
/// assert!(caches.profile().get(&keys::profile("u1")).is_none());
/// ```
pub struct AppCaches<C = SystemClock>
where
    C: Clock + Clone,
{
    feed: CoalescingLoader<FeedPayload, C>,
    profile: CoalescingLoader<Arc<UserProfile>, C>,
    tweet: CoalescingLoader<TweetPayload, C>,
}

impl AppCaches<SystemClock> {
    pub fn new(config: &CachesConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C> AppCaches<C>
where
    C: Clock + Clone,
{
    /// Build the caches on a custom clock
    pub fn with_clock(config: &CachesConfig, clock: C) -> Self {
        Self {
            feed: CoalescingLoader::new(DataCache::with_clock(cache_config(&config.feed), clock.clone())),
            profile: CoalescingLoader::new(DataCache::with_clock(
                cache_config(&config.profile),
                clock.clone(),
            )),
            tweet: CoalescingLoader::new(DataCache::with_clock(cache_config(&config.tweet), clock)),
        }
    }

    /// Timelines, country list and trending hashtags
    pub fn feed(&self) -> &FeedCache<C> {
        self.feed.cache()
    }

    /// One profile per user
    pub fn profile(&self) -> &ProfileCache<C> {
        self.profile.cache()
    }

    /// Per-user tab lists and interaction lookups
    pub fn tweet(&self) -> &TweetCache<C> {
        self.tweet.cache()
    }

    pub fn feed_loader(&self) -> &CoalescingLoader<FeedPayload, C> {
        &self.feed
    }

    pub fn profile_loader(&self) -> &CoalescingLoader<Arc<UserProfile>, C> {
        &self.profile
    }

    pub fn tweet_loader(&self) -> &CoalescingLoader<TweetPayload, C> {
        &self.tweet
    }

    /// Snapshot of all three caches
    pub fn stats(&self) -> AppCacheStats {
        AppCacheStats {
            feed: self.feed().get_stats(),
            profile: self.profile().get_stats(),
            tweet: self.tweet().get_stats(),
        }
    }

    /// Health verdict per cache
    pub fn health(&self) -> Vec<CacheHealthReport> {
        let stats = self.stats();
        vec![
            CacheHealthReport::from_stats("feed", stats.feed),
            CacheHealthReport::from_stats("profile", stats.profile),
            CacheHealthReport::from_stats("tweet", stats.tweet),
        ]
    }

    /// Emit per-cache statistics and health through `tracing`
    pub fn log_stats(&self) {
        for report in self.health() {
            info!(
                cache = %report.name,
                size = report.stats.size,
                max_size = report.stats.max_size,
                usage_percent = report.stats.usage_percent,
                hits = report.stats.hits,
                misses = report.stats.misses,
                "Cache stats"
            );
            report.log();
        }
    }
}

impl<C> Clone for AppCaches<C>
where
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self { feed: self.feed.clone(), profile: self.profile.clone(), tweet: self.tweet.clone() }
    }
}

impl<C> std::fmt::Debug for AppCaches<C>
where
    C: Clock + Clone,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppCaches")
            .field("feed", self.feed())
            .field("profile", self.profile())
            .field("tweet", self.tweet())
            .finish()
    }
}

/// Statistics for the three named caches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppCacheStats {
    pub feed: CacheStats,
    pub profile: CacheStats,
    pub tweet: CacheStats,
}

fn cache_config(settings: &CacheSettings) -> CacheConfig {
    CacheConfig::bounded(settings.ttl(), settings.max_entries)
}

//! Port interfaces for feeds

use async_trait::async_trait;
use chirp_domain::{Country, FeedFilters, FeedType, HashtagCount, Result, Tweet};

/// Trait for the backend's feed queries
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Tweets of one feed, already ordered for display
    async fn feed(&self, feed_type: FeedType, filters: &FeedFilters) -> Result<Vec<Tweet>>;

    /// Countries available as a feed filter
    async fn countries(&self) -> Result<Vec<Country>>;

    /// Hashtags by usage, most used first
    async fn trending_hashtags(&self) -> Result<Vec<HashtagCount>>;
}

//! Feed service - cached timelines and lookup lists

use std::sync::Arc;

use chirp_common::time::{Clock, SystemClock};
use chirp_domain::{ChirpError, Country, FeedFilters, FeedType, HashtagCount, Result, Tweet};

use super::ports::FeedRepository;
use super::search::filter_tweets;
use crate::cache::{keys, AppCaches, FeedPayload};

/// Feed service
pub struct FeedService<C = SystemClock>
where
    C: Clock + Clone,
{
    repository: Arc<dyn FeedRepository>,
    caches: AppCaches<C>,
}

impl<C> FeedService<C>
where
    C: Clock + Clone,
{
    /// Create a new feed service
    pub fn new(repository: Arc<dyn FeedRepository>, caches: AppCaches<C>) -> Self {
        Self { repository, caches }
    }

    /// Tweets of one feed, reading through the feed cache
    pub async fn feed(
        &self,
        feed_type: FeedType,
        filters: Option<&FeedFilters>,
    ) -> Result<Arc<Vec<Tweet>>> {
        let key = keys::feed(feed_type, filters);
        let repository = Arc::clone(&self.repository);
        let filters = filters.cloned().unwrap_or_default();

        let payload = self
            .caches
            .feed_loader()
            .get_or_fetch(&key, || async move {
                let tweets = repository.feed(feed_type, &filters).await?;
                Ok::<_, ChirpError>(FeedPayload::Tweets(Arc::new(tweets)))
            })
            .await?;

        payload.tweets().cloned().ok_or_else(|| unexpected_payload(&key))
    }

    /// Countries selectable as a filter
    pub async fn countries(&self) -> Result<Arc<Vec<Country>>> {
        let repository = Arc::clone(&self.repository);
        let payload = self
            .caches
            .feed_loader()
            .get_or_fetch(keys::countries(), || async move {
                Ok::<_, ChirpError>(FeedPayload::Countries(Arc::new(repository.countries().await?)))
            })
            .await?;

        payload.countries().cloned().ok_or_else(|| unexpected_payload(keys::countries()))
    }

    /// Hashtags by usage
    pub async fn trending_hashtags(&self) -> Result<Arc<Vec<HashtagCount>>> {
        let repository = Arc::clone(&self.repository);
        let payload = self
            .caches
            .feed_loader()
            .get_or_fetch(keys::hashtags(), || async move {
                let hashtags = repository.trending_hashtags().await?;
                Ok::<_, ChirpError>(FeedPayload::Hashtags(Arc::new(hashtags)))
            })
            .await?;

        payload.hashtags().cloned().ok_or_else(|| unexpected_payload(keys::hashtags()))
    }

    /// Search the unfiltered feed client-side
    ///
    /// See [`matches_query`](super::search::matches_query) for the query
    /// syntax.
    pub async fn search(&self, feed_type: FeedType, query: &str) -> Result<Vec<Tweet>> {
        let tweets = self.feed(feed_type, None).await?;
        Ok(filter_tweets(&tweets, query))
    }
}

impl<C> Clone for FeedService<C>
where
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self { repository: Arc::clone(&self.repository), caches: self.caches.clone() }
    }
}

fn unexpected_payload(key: &str) -> ChirpError {
    ChirpError::Internal(format!("feed cache holds a different payload under {key}"))
}

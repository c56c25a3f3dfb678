//! Tweet service - cached tab lists, composition and interaction toggles

use std::sync::Arc;

use chirp_common::time::{Clock, SystemClock};
use chirp_domain::constants::MAX_TWEET_LENGTH;
use chirp_domain::{ChirpError, InteractionKind, NewTweet, Result, Tweet, TweetInteractions, TweetTab};
use tracing::{debug, warn};

use super::interactions::TimelineTweet;
use super::ports::TweetRepository;
use super::thread::{flatten_thread, ThreadEntry};
use crate::cache::{keys, AppCaches, TweetPayload};

/// Tweet service
pub struct TweetService<C = SystemClock>
where
    C: Clock + Clone,
{
    repository: Arc<dyn TweetRepository>,
    caches: AppCaches<C>,
}

impl<C> TweetService<C>
where
    C: Clock + Clone,
{
    /// Create a new tweet service
    pub fn new(repository: Arc<dyn TweetRepository>, caches: AppCaches<C>) -> Self {
        Self { repository, caches }
    }

    /// Tweets on one profile tab, reading through the tweet cache
    pub async fn user_tweets(&self, user_id: &str, tab: TweetTab) -> Result<Arc<Vec<Tweet>>> {
        let key = keys::user_tweets(user_id, tab);
        let repository = Arc::clone(&self.repository);
        let payload = self
            .caches
            .tweet_loader()
            .get_or_fetch(&key, || async move {
                let tweets = repository.user_tweets(user_id, tab).await?;
                Ok::<_, ChirpError>(TweetPayload::Tweets(Arc::new(tweets)))
            })
            .await?;

        payload.tweets().cloned().ok_or_else(|| unexpected_payload(&key))
    }

    /// The viewer's interaction state on a batch of tweets
    ///
    /// The batch is cached under its id list as given. An empty batch returns
    /// an empty list without a backend call.
    pub async fn interactions(
        &self,
        user_id: &str,
        tweet_ids: &[String],
    ) -> Result<Arc<Vec<TweetInteractions>>> {
        if tweet_ids.is_empty() {
            return Ok(Arc::new(Vec::new()));
        }

        let key = keys::interactions(user_id, tweet_ids);
        let repository = Arc::clone(&self.repository);
        let payload = self
            .caches
            .tweet_loader()
            .get_or_fetch(&key, || async move {
                let interactions = repository.interactions(user_id, tweet_ids).await?;
                Ok::<_, ChirpError>(TweetPayload::Interactions(Arc::new(interactions)))
            })
            .await?;

        payload.interactions().cloned().ok_or_else(|| unexpected_payload(&key))
    }

    /// Validate and publish a tweet or reply
    ///
    /// Invalidates the author's profile and tabs and every feed.
    ///
    /// # Errors
    /// Returns `ChirpError::InvalidInput` for blank or over-long content and
    /// `ChirpError::NotFound` when replying to a missing tweet.
    pub async fn post_tweet(&self, author_id: &str, new_tweet: &NewTweet) -> Result<Tweet> {
        validate_content(&new_tweet.content)?;
        if let Some(parent_id) = new_tweet.reply_to.as_deref() {
            if self.repository.tweet(parent_id).await?.is_none() {
                return Err(ChirpError::NotFound(format!("tweet {parent_id}")));
            }
        }

        let tweet = self.repository.create_tweet(author_id, new_tweet).await?;
        self.invalidate_author(author_id);
        debug!(author_id, tweet_id = %tweet.id, reply = tweet.is_reply(), "Tweet posted");
        Ok(tweet)
    }

    /// Delete one of the author's tweets
    ///
    /// # Errors
    /// Returns `ChirpError::NotFound` for a missing tweet and
    /// `ChirpError::Unauthorized` when `author_id` did not write it.
    pub async fn delete_tweet(&self, author_id: &str, tweet_id: &str) -> Result<()> {
        let tweet = self
            .repository
            .tweet(tweet_id)
            .await?
            .ok_or_else(|| ChirpError::NotFound(format!("tweet {tweet_id}")))?;
        if tweet.author_id != author_id {
            return Err(ChirpError::Unauthorized(format!(
                "tweet {tweet_id} belongs to another user"
            )));
        }

        self.repository.delete_tweet(tweet_id).await?;
        self.invalidate_author(author_id);
        debug!(author_id, tweet_id, "Tweet deleted");
        Ok(())
    }

    /// Optimistically toggle an interaction, rolling back if the backend
    /// rejects it
    ///
    /// Returns the new state of the toggle. On success the acting user's
    /// tabs and interaction lookups are invalidated, along with the author's
    /// tabs and all feeds, since they carry the tweet's counters.
    ///
    /// # Errors
    /// Returns the repository error after restoring `timeline`.
    pub async fn toggle_interaction(
        &self,
        user_id: &str,
        timeline: &mut TimelineTweet,
        kind: InteractionKind,
    ) -> Result<bool> {
        let snapshot = timeline.apply(kind);
        let active = timeline.is_active(kind);

        if let Err(err) =
            self.repository.set_interaction(user_id, &timeline.tweet.id, kind, active).await
        {
            timeline.rollback(snapshot);
            warn!(
                user_id,
                tweet_id = %timeline.tweet.id,
                kind = %kind,
                error = %err,
                "Interaction failed, rolled back"
            );
            return Err(err);
        }

        self.caches.invalidate_user_tweets(user_id);
        self.caches.invalidate_user_interactions(user_id);
        if timeline.tweet.author_id != user_id {
            self.caches.invalidate_user_tweets(&timeline.tweet.author_id);
        }
        self.caches.invalidate_feeds();
        Ok(active)
    }

    /// Root tweet and all its replies in display order
    ///
    /// # Errors
    /// Returns `ChirpError::NotFound` if the root does not exist.
    pub async fn thread(&self, root_id: &str) -> Result<Vec<ThreadEntry>> {
        let (root, replies) = futures::try_join!(
            self.repository.tweet(root_id),
            self.repository.thread_replies(root_id)
        )?;
        let root = root.ok_or_else(|| ChirpError::NotFound(format!("tweet {root_id}")))?;

        let mut tweets = Vec::with_capacity(replies.len() + 1);
        tweets.push(root);
        tweets.extend(replies);
        Ok(flatten_thread(root_id, &tweets))
    }

    fn invalidate_author(&self, author_id: &str) {
        self.caches.invalidate_user_profile(author_id);
        self.caches.invalidate_user_tweets(author_id);
        self.caches.invalidate_feeds();
    }
}

impl<C> Clone for TweetService<C>
where
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self { repository: Arc::clone(&self.repository), caches: self.caches.clone() }
    }
}

/// Reject blank or over-long tweet content
///
/// Length is counted in characters, not bytes.
///
/// # Errors
/// Returns `ChirpError::InvalidInput` describing the problem.
pub fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(ChirpError::InvalidInput("tweet cannot be empty".to_string()));
    }
    let length = content.chars().count();
    if length > MAX_TWEET_LENGTH {
        return Err(ChirpError::InvalidInput(format!(
            "tweet is {length} characters, limit is {MAX_TWEET_LENGTH}"
        )));
    }
    Ok(())
}

fn unexpected_payload(key: &str) -> ChirpError {
    ChirpError::Internal(format!("tweet cache holds a different payload under {key}"))
}

//! Port interfaces for tweets

use async_trait::async_trait;
use chirp_domain::{InteractionKind, NewTweet, Result, Tweet, TweetInteractions, TweetTab};

/// Trait for the backend's tweet storage and interaction toggles
#[async_trait]
pub trait TweetRepository: Send + Sync {
    /// Get one tweet; `None` if it does not exist
    async fn tweet(&self, tweet_id: &str) -> Result<Option<Tweet>>;

    /// Tweets shown on one profile tab, newest first
    async fn user_tweets(&self, user_id: &str, tab: TweetTab) -> Result<Vec<Tweet>>;

    /// Store a new tweet and return it with its assigned id
    async fn create_tweet(&self, author_id: &str, new_tweet: &NewTweet) -> Result<Tweet>;

    async fn delete_tweet(&self, tweet_id: &str) -> Result<()>;

    /// Every reply below `root_id`, at any depth, in no particular order
    async fn thread_replies(&self, root_id: &str) -> Result<Vec<Tweet>>;

    /// Interaction state of `user_id` on each requested tweet
    async fn interactions(
        &self,
        user_id: &str,
        tweet_ids: &[String],
    ) -> Result<Vec<TweetInteractions>>;

    /// Turn one interaction on or off
    async fn set_interaction(
        &self,
        user_id: &str,
        tweet_id: &str,
        kind: InteractionKind,
        active: bool,
    ) -> Result<()>;
}

//! `TweetRepository` over the in-memory store

use std::collections::HashSet;

use async_trait::async_trait;
use chirp_core::feed::search::extract_hashtags;
use chirp_core::TweetRepository as TweetRepositoryPort;
use chirp_domain::{
    ChirpError, InteractionKind, NewTweet, Result as DomainResult, Tweet, TweetInteractions,
    TweetTab,
};
use chrono::Utc;
use uuid::Uuid;

use super::store::{newest_first, InMemoryBackend};

#[async_trait]
impl TweetRepositoryPort for InMemoryBackend {
    async fn tweet(&self, tweet_id: &str) -> DomainResult<Option<Tweet>> {
        Ok(self.read().tweets.iter().find(|t| t.id == tweet_id).cloned())
    }

    async fn user_tweets(&self, user_id: &str, tab: TweetTab) -> DomainResult<Vec<Tweet>> {
        let state = self.read();
        let mut tweets: Vec<Tweet> = state
            .tweets
            .iter()
            .filter(|t| match tab {
                TweetTab::Tweets => t.author_id == user_id && !t.is_reply(),
                TweetTab::Replies => t.author_id == user_id && t.is_reply(),
                TweetTab::Media => t.author_id == user_id && t.has_media(),
                TweetTab::Likes => state
                    .interactions
                    .get(&(user_id.to_string(), t.id.clone()))
                    .is_some_and(|s| s.liked),
            })
            .cloned()
            .collect();
        newest_first(&mut tweets);
        Ok(tweets)
    }

    async fn create_tweet(&self, author_id: &str, new_tweet: &NewTweet) -> DomainResult<Tweet> {
        let mut state = self.write();
        if !state.profiles.contains_key(author_id) {
            return Err(ChirpError::NotFound(format!("user {author_id}")));
        }
        if let Some(parent_id) = &new_tweet.reply_to {
            let parent = state
                .tweet_mut(parent_id)
                .ok_or_else(|| ChirpError::NotFound(format!("tweet {parent_id}")))?;
            parent.replies_count += 1;
        }

        let tweet = Tweet {
            id: Uuid::now_v7().to_string(),
            author_id: author_id.to_string(),
            content: new_tweet.content.clone(),
            hashtags: extract_hashtags(&new_tweet.content),
            media_urls: new_tweet.media_urls.clone(),
            country: new_tweet.country.clone(),
            reply_to: new_tweet.reply_to.clone(),
            likes_count: 0,
            retweets_count: 0,
            bookmarks_count: 0,
            replies_count: 0,
            created_at: Utc::now(),
        };
        state.tweets.push(tweet.clone());
        if let Some(author) = state.profiles.get_mut(author_id) {
            author.tweets_count += 1;
        }

        tracing::debug!(tweet_id = %tweet.id, author_id, "Stored tweet");
        Ok(tweet)
    }

    async fn delete_tweet(&self, tweet_id: &str) -> DomainResult<()> {
        let mut state = self.write();
        let index = state
            .tweets
            .iter()
            .position(|t| t.id == tweet_id)
            .ok_or_else(|| ChirpError::NotFound(format!("tweet {tweet_id}")))?;
        let removed = state.tweets.remove(index);

        if let Some(parent) = removed.reply_to.as_deref().and_then(|id| state.tweet_mut(id)) {
            parent.replies_count = parent.replies_count.saturating_sub(1);
        }
        if let Some(author) = state.profiles.get_mut(&removed.author_id) {
            author.tweets_count = author.tweets_count.saturating_sub(1);
        }
        state.interactions.retain(|(_, id), _| id != tweet_id);
        Ok(())
    }

    async fn thread_replies(&self, root_id: &str) -> DomainResult<Vec<Tweet>> {
        let state = self.read();
        let mut reached: HashSet<&str> = HashSet::from([root_id]);
        let mut replies = Vec::new();

        // Replies are appended after their parents, so one pass per depth level
        loop {
            let found: Vec<&Tweet> = state
                .tweets
                .iter()
                .filter(|t| !reached.contains(t.id.as_str()))
                .filter(|t| t.reply_to.as_deref().is_some_and(|p| reached.contains(p)))
                .collect();
            if found.is_empty() {
                break;
            }
            reached.extend(found.iter().map(|t| t.id.as_str()));
            replies.extend(found.into_iter().cloned());
        }
        Ok(replies)
    }

    async fn interactions(
        &self,
        user_id: &str,
        tweet_ids: &[String],
    ) -> DomainResult<Vec<TweetInteractions>> {
        let state = self.read();
        Ok(tweet_ids
            .iter()
            .map(|id| TweetInteractions {
                tweet_id: id.clone(),
                state: state
                    .interactions
                    .get(&(user_id.to_string(), id.clone()))
                    .copied()
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn set_interaction(
        &self,
        user_id: &str,
        tweet_id: &str,
        kind: InteractionKind,
        active: bool,
    ) -> DomainResult<()> {
        let mut state = self.write();
        if state.tweet_mut(tweet_id).is_none() {
            return Err(ChirpError::NotFound(format!("tweet {tweet_id}")));
        }

        let entry = state.interactions.entry((user_id.to_string(), tweet_id.to_string())).or_default();
        if entry.get(kind) == active {
            return Ok(());
        }
        entry.set(kind, active);

        if let Some(tweet) = state.tweet_mut(tweet_id) {
            let count = tweet.count_mut(kind);
            *count = if active { *count + 1 } else { count.saturating_sub(1) };
        }
        Ok(())
    }
}

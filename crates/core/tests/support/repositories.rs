//! Mock repository implementations for testing
//!
//! In-memory mocks for the backend ports. Each counts the calls the cache is
//! supposed to save, and the tweet mock can be told to fail interaction
//! writes.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chirp_core::{FeedRepository, ProfileRepository, TweetRepository};
use chirp_domain::{
    ChirpError, Country, FeedFilters, FeedType, HashtagCount, InteractionKind, InteractionState,
    NewTweet, ProfileUpdate, Result as DomainResult, Tweet, TweetInteractions, TweetTab,
    UserProfile,
};

use super::fixtures;

/// In-memory mock for `ProfileRepository`.
#[derive(Default)]
pub struct MockProfileRepository {
    profiles: Mutex<HashMap<String, UserProfile>>,
    edges: Mutex<HashSet<(String, String)>>,
    pub profile_fetches: AtomicUsize,
    /// Delay applied to each profile fetch so concurrent callers overlap
    pub fetch_delay: Mutex<Option<Duration>>,
}

impl MockProfileRepository {
    /// Create a new mock seeded with one profile per id.
    pub fn with_users(ids: &[&str]) -> Self {
        let repo = Self::default();
        for id in ids {
            repo.profiles.lock().unwrap().insert((*id).to_string(), fixtures::profile(id));
        }
        repo
    }

    pub fn fetches(&self) -> usize {
        self.profile_fetches.load(Ordering::SeqCst)
    }

    pub fn set_fetch_delay(&self, delay: Duration) {
        *self.fetch_delay.lock().unwrap() = Some(delay);
    }

    pub fn clear_fetch_delay(&self) {
        *self.fetch_delay.lock().unwrap() = None;
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn get_profile(&self, user_id: &str) -> DomainResult<Option<UserProfile>> {
        self.profile_fetches.fetch_add(1, Ordering::SeqCst);
        // read first, so a delayed response reflects the state at request time
        let profile = self.profiles.lock().unwrap().get(user_id).cloned();
        let delay = *self.fetch_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(profile)
    }

    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> DomainResult<UserProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile =
            profiles.get_mut(user_id).ok_or_else(|| ChirpError::NotFound(user_id.to_string()))?;
        update.apply_to(profile);
        Ok(profile.clone())
    }

    async fn follow(&self, follower_id: &str, target_id: &str) -> DomainResult<()> {
        let inserted =
            self.edges.lock().unwrap().insert((follower_id.to_string(), target_id.to_string()));
        if inserted {
            let mut profiles = self.profiles.lock().unwrap();
            if let Some(p) = profiles.get_mut(follower_id) {
                p.following_count += 1;
            }
            if let Some(p) = profiles.get_mut(target_id) {
                p.followers_count += 1;
            }
        }
        Ok(())
    }

    async fn unfollow(&self, follower_id: &str, target_id: &str) -> DomainResult<()> {
        let removed =
            self.edges.lock().unwrap().remove(&(follower_id.to_string(), target_id.to_string()));
        if removed {
            let mut profiles = self.profiles.lock().unwrap();
            if let Some(p) = profiles.get_mut(follower_id) {
                p.following_count -= 1;
            }
            if let Some(p) = profiles.get_mut(target_id) {
                p.followers_count -= 1;
            }
        }
        Ok(())
    }

    async fn is_following(&self, follower_id: &str, target_id: &str) -> DomainResult<bool> {
        Ok(self.edges.lock().unwrap().contains(&(follower_id.to_string(), target_id.to_string())))
    }

    async fn followers(&self, user_id: &str) -> DomainResult<Vec<UserProfile>> {
        let edges = self.edges.lock().unwrap();
        let profiles = self.profiles.lock().unwrap();
        Ok(edges
            .iter()
            .filter(|(_, target)| target == user_id)
            .filter_map(|(follower, _)| profiles.get(follower).cloned())
            .collect())
    }

    async fn following(&self, user_id: &str) -> DomainResult<Vec<UserProfile>> {
        let edges = self.edges.lock().unwrap();
        let profiles = self.profiles.lock().unwrap();
        Ok(edges
            .iter()
            .filter(|(follower, _)| follower == user_id)
            .filter_map(|(_, target)| profiles.get(target).cloned())
            .collect())
    }
}

/// In-memory mock for `TweetRepository`.
#[derive(Default)]
pub struct MockTweetRepository {
    tweets: Mutex<Vec<Tweet>>,
    interactions: Mutex<HashMap<(String, String), InteractionState>>,
    next_id: AtomicUsize,
    pub tab_fetches: AtomicUsize,
    pub interaction_fetches: AtomicUsize,
    pub fail_interactions: AtomicBool,
}

impl MockTweetRepository {
    /// Create a new mock seeded with the provided tweets.
    pub fn new(tweets: Vec<Tweet>) -> Self {
        Self { tweets: Mutex::new(tweets), ..Self::default() }
    }

    pub fn tab_fetches(&self) -> usize {
        self.tab_fetches.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.tweets.lock().unwrap().len()
    }
}

#[async_trait]
impl TweetRepository for MockTweetRepository {
    async fn tweet(&self, tweet_id: &str) -> DomainResult<Option<Tweet>> {
        Ok(self.tweets.lock().unwrap().iter().find(|t| t.id == tweet_id).cloned())
    }

    async fn user_tweets(&self, user_id: &str, tab: TweetTab) -> DomainResult<Vec<Tweet>> {
        self.tab_fetches.fetch_add(1, Ordering::SeqCst);
        let tweets = self.tweets.lock().unwrap();
        let interactions = self.interactions.lock().unwrap();
        Ok(tweets
            .iter()
            .filter(|t| match tab {
                TweetTab::Tweets => t.author_id == user_id && !t.is_reply(),
                TweetTab::Replies => t.author_id == user_id && t.is_reply(),
                TweetTab::Media => t.author_id == user_id && t.has_media(),
                TweetTab::Likes => interactions
                    .get(&(user_id.to_string(), t.id.clone()))
                    .is_some_and(|state| state.liked),
            })
            .cloned()
            .collect())
    }

    async fn create_tweet(&self, author_id: &str, new_tweet: &NewTweet) -> DomainResult<Tweet> {
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let tweet = Tweet {
            reply_to: new_tweet.reply_to.clone(),
            country: new_tweet.country.clone(),
            media_urls: new_tweet.media_urls.clone(),
            ..fixtures::tweet(&id, author_id, &new_tweet.content, 100)
        };
        self.tweets.lock().unwrap().push(tweet.clone());
        Ok(tweet)
    }

    async fn delete_tweet(&self, tweet_id: &str) -> DomainResult<()> {
        self.tweets.lock().unwrap().retain(|t| t.id != tweet_id);
        Ok(())
    }

    async fn thread_replies(&self, root_id: &str) -> DomainResult<Vec<Tweet>> {
        let tweets = self.tweets.lock().unwrap();
        let mut ids: HashSet<String> = HashSet::from([root_id.to_string()]);
        let mut replies = Vec::new();
        loop {
            let found: Vec<Tweet> = tweets
                .iter()
                .filter(|t| !ids.contains(&t.id))
                .filter(|t| t.reply_to.as_ref().is_some_and(|p| ids.contains(p)))
                .cloned()
                .collect();
            if found.is_empty() {
                break;
            }
            ids.extend(found.iter().map(|t| t.id.clone()));
            replies.extend(found);
        }
        Ok(replies)
    }

    async fn interactions(
        &self,
        user_id: &str,
        tweet_ids: &[String],
    ) -> DomainResult<Vec<TweetInteractions>> {
        self.interaction_fetches.fetch_add(1, Ordering::SeqCst);
        let interactions = self.interactions.lock().unwrap();
        Ok(tweet_ids
            .iter()
            .map(|id| TweetInteractions {
                tweet_id: id.clone(),
                state: interactions
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
        if self.fail_interactions.load(Ordering::SeqCst) {
            return Err(ChirpError::Network("connection reset".to_string()));
        }
        self.interactions
            .lock()
            .unwrap()
            .entry((user_id.to_string(), tweet_id.to_string()))
            .or_default()
            .set(kind, active);
        Ok(())
    }
}

/// In-memory mock for `FeedRepository`.
#[derive(Default)]
pub struct MockFeedRepository {
    pub tweets: Mutex<Vec<Tweet>>,
    pub feed_fetches: AtomicUsize,
}

impl MockFeedRepository {
    pub fn new(tweets: Vec<Tweet>) -> Self {
        Self { tweets: Mutex::new(tweets), ..Self::default() }
    }

    pub fn feed_fetches(&self) -> usize {
        self.feed_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedRepository for MockFeedRepository {
    async fn feed(&self, _feed_type: FeedType, filters: &FeedFilters) -> DomainResult<Vec<Tweet>> {
        self.feed_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tweets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| filters.hashtag.as_ref().map_or(true, |tag| t.hashtags.contains(tag)))
            .cloned()
            .collect())
    }

    async fn countries(&self) -> DomainResult<Vec<Country>> {
        Ok(Vec::new())
    }

    async fn trending_hashtags(&self) -> DomainResult<Vec<HashtagCount>> {
        Ok(Vec::new())
    }
}

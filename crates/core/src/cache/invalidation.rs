//! Invalidation after mutations
//!
//! Each helper deletes the keys whose backend data a mutation changed, so the
//! next read misses and refetches. Deletes go through the loaders, so a read
//! already in flight for a dropped key is not cached or joined afterwards.

use chirp_common::time::Clock;
use chirp_domain::TweetTab;
use tracing::debug;

use super::keys;
use super::registry::AppCaches;

impl<C> AppCaches<C>
where
    C: Clock + Clone,
{
    /// Drop the cached profile of one user
    pub fn invalidate_user_profile(&self, user_id: &str) {
        let removed = self.profile_loader().invalidate(&keys::profile(user_id)).is_some();
        debug!(user_id, removed, "Invalidated user profile");
    }

    /// Drop all four profile tab lists of one user
    pub fn invalidate_user_tweets(&self, user_id: &str) {
        let removed = TweetTab::ALL
            .iter()
            .filter(|tab| {
                self.tweet_loader().invalidate(&keys::user_tweets(user_id, **tab)).is_some()
            })
            .count();
        debug!(user_id, removed, "Invalidated user tweets");
    }

    /// Drop every interactions lookup made for one user
    ///
    /// Interaction keys embed the requested id list, so they are found by
    /// prefix rather than rebuilt.
    pub fn invalidate_user_interactions(&self, user_id: &str) {
        let prefix = keys::interactions_prefix(user_id);
        let removed = self.tweet_loader().invalidate_matching(|key| key.starts_with(&prefix));
        debug!(user_id, removed, "Invalidated user interactions");
    }

    /// Drop every feed, including the country and hashtag lists
    pub fn invalidate_feeds(&self) {
        self.feed_loader().invalidate_all();
        debug!("Invalidated feeds");
    }

    /// Drop everything in all three caches
    pub fn invalidate_all(&self) {
        self.feed_loader().invalidate_all();
        self.profile_loader().invalidate_all();
        self.tweet_loader().invalidate_all();
        debug!("Invalidated all caches");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chirp_domain::{CachesConfig, FeedType, UserProfile};

    use super::*;
    use crate::cache::{FeedPayload, TweetPayload};

    fn caches() -> AppCaches {
        AppCaches::new(&CachesConfig::default())
    }

    fn tweets() -> TweetPayload {
        TweetPayload::Tweets(Arc::new(Vec::new()))
    }

    fn profile(id: &str) -> Arc<UserProfile> {
        Arc::new(UserProfile::new(id, id, chrono::Utc::now()))
    }

    /// Validates profile invalidation targets one user.
    ///
    /// Assertions:
    /// - Confirms `profile:u1` is gone after invalidation.
    /// - Confirms `profile:u2` survives.
    #[test]
    fn test_invalidate_user_profile() {
        let caches = caches();
        caches.profile().set(keys::profile("u1"), profile("u1"));
        caches.profile().set(keys::profile("u2"), profile("u2"));

        caches.invalidate_user_profile("u1");
        caches.invalidate_user_profile("u1");

        assert_eq!(caches.profile().get(&keys::profile("u1")), None);
        assert!(caches.profile().has(&keys::profile("u2")));
    }

    /// Validates tweet invalidation covers every tab of one user only.
    ///
    /// Assertions:
    /// - Confirms all four `u1` tab keys are gone.
    /// - Confirms `u2` tabs and `u1` interactions are untouched.
    #[test]
    fn test_invalidate_user_tweets_all_tabs() {
        let caches = caches();
        for tab in TweetTab::ALL {
            caches.tweet().set(keys::user_tweets("u1", tab), tweets());
            caches.tweet().set(keys::user_tweets("u2", tab), tweets());
        }
        caches.tweet().set(keys::interactions("u1", &["t1"]), tweets());

        caches.invalidate_user_tweets("u1");

        for tab in TweetTab::ALL {
            assert!(!caches.tweet().has(&keys::user_tweets("u1", tab)));
            assert!(caches.tweet().has(&keys::user_tweets("u2", tab)));
        }
        assert!(caches.tweet().has(&keys::interactions("u1", &["t1"])));
    }

    #[test]
    fn test_invalidate_user_interactions_by_prefix() {
        let caches = caches();
        caches.tweet().set(keys::interactions("u1", &["t1", "t2"]), tweets());
        caches.tweet().set(keys::interactions("u1", &["t2", "t1"]), tweets());
        caches.tweet().set(keys::interactions("u10", &["t1"]), tweets());

        caches.invalidate_user_interactions("u1");

        assert_eq!(caches.tweet().keys(), [keys::interactions("u10", &["t1"])]);
    }

    /// Validates feed and global invalidation.
    ///
    /// Assertions:
    /// - Confirms `invalidate_feeds` empties only the feed cache.
    /// - Confirms `invalidate_all` empties all three.
    #[test]
    fn test_invalidate_feeds_and_all() {
        let caches = caches();
        caches.feed().set(keys::feed(FeedType::ForYou, None), FeedPayload::Tweets(Arc::new(Vec::new())));
        caches.feed().set(keys::countries(), FeedPayload::Countries(Arc::new(Vec::new())));
        caches.profile().set(keys::profile("u1"), profile("u1"));
        caches.tweet().set(keys::user_tweets("u1", TweetTab::Likes), tweets());

        caches.invalidate_feeds();
        let stats = caches.stats();
        assert_eq!((stats.feed.size, stats.profile.size, stats.tweet.size), (0, 1, 1));

        caches.invalidate_all();
        let stats = caches.stats();
        assert_eq!((stats.feed.size, stats.profile.size, stats.tweet.size), (0, 0, 0));
    }
}

//! Shared state behind the in-memory backend

use std::collections::{BTreeSet, HashMap};

use chirp_domain::{Country, InteractionState, Tweet, UserProfile};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::snapshot::{BackendSnapshot, Follow, StoredInteraction};

/// Process-local backend implementing the profile, tweet and feed ports
///
/// Stands in for the hosted service in tests, demos and offline runs. All
/// state sits behind one lock, so each port call sees a consistent view.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: RwLock<BackendState>,
}

#[derive(Debug, Default)]
pub(crate) struct BackendState {
    pub(crate) profiles: HashMap<String, UserProfile>,
    /// Insertion order
    pub(crate) tweets: Vec<Tweet>,
    /// `(follower, target)` edges
    pub(crate) follows: BTreeSet<(String, String)>,
    /// Keyed by `(user, tweet)`
    pub(crate) interactions: HashMap<(String, String), InteractionState>,
    pub(crate) countries: Vec<Country>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend from a snapshot, recomputing follow and tweet counts
    pub fn from_snapshot(snapshot: BackendSnapshot) -> Self {
        let mut state = BackendState {
            profiles: snapshot.profiles.into_iter().map(|p| (p.id.clone(), p)).collect(),
            tweets: snapshot.tweets,
            follows: snapshot
                .follows
                .into_iter()
                .map(|edge| (edge.follower_id, edge.target_id))
                .collect(),
            interactions: snapshot
                .interactions
                .into_iter()
                .map(|entry| ((entry.user_id, entry.tweet_id), entry.state))
                .collect(),
            countries: snapshot.countries,
        };
        state.recount();

        tracing::debug!(
            profiles = state.profiles.len(),
            tweets = state.tweets.len(),
            "In-memory backend seeded from snapshot"
        );
        Self { state: RwLock::new(state) }
    }

    /// Export the current state
    pub fn snapshot(&self) -> BackendSnapshot {
        let state = self.read();
        let mut profiles: Vec<UserProfile> = state.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| a.id.cmp(&b.id));

        let mut interactions: Vec<StoredInteraction> = state
            .interactions
            .iter()
            .map(|((user_id, tweet_id), state)| StoredInteraction {
                user_id: user_id.clone(),
                tweet_id: tweet_id.clone(),
                state: *state,
            })
            .collect();
        interactions.sort_by(|a, b| (&a.user_id, &a.tweet_id).cmp(&(&b.user_id, &b.tweet_id)));

        BackendSnapshot {
            profiles,
            tweets: state.tweets.clone(),
            follows: state
                .follows
                .iter()
                .map(|(follower, target)| Follow {
                    follower_id: follower.clone(),
                    target_id: target.clone(),
                })
                .collect(),
            interactions,
            countries: state.countries.clone(),
        }
    }

    /// Add or replace a profile
    pub fn insert_profile(&self, profile: UserProfile) {
        self.write().profiles.insert(profile.id.clone(), profile);
    }

    /// Register a country for the country filter list
    pub fn insert_country(&self, code: impl Into<String>, name: impl Into<String>) {
        let code = code.into();
        let mut state = self.write();
        state.countries.retain(|c| c.code != code);
        state.countries.push(Country { code, name: name.into(), tweet_count: 0 });
    }

    pub fn tweet_count(&self) -> usize {
        self.read().tweets.len()
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, BackendState> {
        self.state.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, BackendState> {
        self.state.write()
    }
}

impl BackendState {
    pub(crate) fn tweet_mut(&mut self, tweet_id: &str) -> Option<&mut Tweet> {
        self.tweets.iter_mut().find(|t| t.id == tweet_id)
    }

    pub(crate) fn follows(&self, follower_id: &str, target_id: &str) -> bool {
        self.follows.contains(&(follower_id.to_string(), target_id.to_string()))
    }

    fn recount(&mut self) {
        for profile in self.profiles.values_mut() {
            profile.followers_count = 0;
            profile.following_count = 0;
            profile.tweets_count = 0;
        }
        for (follower, target) in &self.follows {
            if let Some(p) = self.profiles.get_mut(follower) {
                p.following_count += 1;
            }
            if let Some(p) = self.profiles.get_mut(target) {
                p.followers_count += 1;
            }
        }
        for tweet in &self.tweets {
            if let Some(p) = self.profiles.get_mut(&tweet.author_id) {
                p.tweets_count += 1;
            }
        }
    }
}

/// Sort newest first, breaking timestamp ties by id
pub(crate) fn newest_first(tweets: &mut [Tweet]) {
    tweets.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
}

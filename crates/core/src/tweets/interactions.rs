//! Optimistic like/retweet/bookmark state
//!
//! The UI flips a toggle before the backend confirms it. [`TimelineTweet::apply`]
//! returns a snapshot that [`TimelineTweet::rollback`] restores if the
//! request fails.

use std::collections::HashMap;

use chirp_domain::{InteractionKind, InteractionState, Tweet, TweetInteractions};

/// A tweet as displayed to one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineTweet {
    pub tweet: Tweet,
    pub state: InteractionState,
}

/// State of one toggle before an optimistic update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionSnapshot {
    pub kind: InteractionKind,
    pub active: bool,
    pub count: u64,
}

impl TimelineTweet {
    pub fn new(tweet: Tweet, state: InteractionState) -> Self {
        Self { tweet, state }
    }

    /// Flip `kind` and move its counter by one, never below zero
    pub fn apply(&mut self, kind: InteractionKind) -> InteractionSnapshot {
        let snapshot =
            InteractionSnapshot { kind, active: self.state.get(kind), count: self.tweet.count(kind) };

        let active = !snapshot.active;
        self.state.set(kind, active);
        let count = self.tweet.count_mut(kind);
        *count = if active { count.saturating_add(1) } else { count.saturating_sub(1) };

        snapshot
    }

    /// Restore the toggle and counter captured by [`apply`](Self::apply)
    pub fn rollback(&mut self, snapshot: InteractionSnapshot) {
        self.state.set(snapshot.kind, snapshot.active);
        *self.tweet.count_mut(snapshot.kind) = snapshot.count;
    }

    pub fn is_active(&self, kind: InteractionKind) -> bool {
        self.state.get(kind)
    }
}

/// Pair tweets with the viewer's interaction state
///
/// Tweets without a matching entry get the default (all off) state.
pub fn merge_interactions(tweets: &[Tweet], interactions: &[TweetInteractions]) -> Vec<TimelineTweet> {
    let by_id: HashMap<&str, InteractionState> =
        interactions.iter().map(|i| (i.tweet_id.as_str(), i.state)).collect();

    tweets
        .iter()
        .map(|tweet| {
            let state = by_id.get(tweet.id.as_str()).copied().unwrap_or_default();
            TimelineTweet::new(tweet.clone(), state)
        })
        .collect()
}

//! Cache key builders
//!
//! Keys are a namespace tag followed by the identifying fields, joined with
//! `:`. The same inputs always give the same key.

use chirp_domain::{FeedFilters, FeedType, TweetTab};

pub const PROFILE_PREFIX: &str = "profile";
pub const USER_TWEETS_PREFIX: &str = "user_tweets";
pub const FEED_PREFIX: &str = "feed";
pub const INTERACTIONS_PREFIX: &str = "interactions";

/// `profile:<user_id>`
pub fn profile(user_id: &str) -> String {
    format!("{PROFILE_PREFIX}:{user_id}")
}

/// `user_tweets:<user_id>:<tab>`
pub fn user_tweets(user_id: &str, tab: TweetTab) -> String {
    format!("{USER_TWEETS_PREFIX}:{user_id}:{tab}")
}

/// `feed:<type>`, or `feed:<type>:<filters-json>` when any filter is set
///
/// Empty filters give the unfiltered key so `None` and `Some(default)` share
/// one entry.
pub fn feed(feed_type: FeedType, filters: Option<&FeedFilters>) -> String {
    match filters.filter(|f| !f.is_empty()) {
        // string options always serialize
        Some(filters) => format!(
            "{FEED_PREFIX}:{feed_type}:{}",
            serde_json::to_string(filters).unwrap_or_default()
        ),
        None => format!("{FEED_PREFIX}:{feed_type}"),
    }
}

/// `countries`
pub const fn countries() -> &'static str {
    "countries"
}

/// `hashtags`
pub const fn hashtags() -> &'static str {
    "hashtags"
}

/// `interactions:<user_id>:<id1,id2,...>`
///
/// Ids are joined in the order given; the same set in another order is a
/// different key.
pub fn interactions<S: AsRef<str>>(user_id: &str, tweet_ids: &[S]) -> String {
    let ids: Vec<&str> = tweet_ids.iter().map(|id| id.as_ref()).collect();
    format!("{INTERACTIONS_PREFIX}:{user_id}:{}", ids.join(","))
}

/// Prefix shared by every interactions key of one user
pub fn interactions_prefix(user_id: &str) -> String {
    format!("{INTERACTIONS_PREFIX}:{user_id}:")
}

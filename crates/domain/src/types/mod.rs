//! Domain types and models

pub mod feed;
pub mod profile;
pub mod tweet;

pub use feed::{Country, FeedFilters, FeedType, HashtagCount};
pub use profile::{ProfileUpdate, UserProfile};
pub use tweet::{
    InteractionKind, InteractionState, NewTweet, Tweet, TweetInteractions, TweetTab,
};

//! Tweet and interaction types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// A tweet or reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub author_id: String,
    pub content: String,
    /// Lowercased tags without the leading `#`
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub media_urls: Vec<String>,
    /// ISO country code the tweet was posted from
    #[serde(default)]
    pub country: Option<String>,
    /// Parent tweet id when this is a reply
    #[serde(default)]
    pub reply_to: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub retweets_count: u64,
    #[serde(default)]
    pub bookmarks_count: u64,
    #[serde(default)]
    pub replies_count: u64,
    pub created_at: DateTime<Utc>,
}

impl Tweet {
    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }

    pub fn has_media(&self) -> bool {
        !self.media_urls.is_empty()
    }

    /// Counter matching an interaction kind
    pub const fn count(&self, kind: InteractionKind) -> u64 {
        match kind {
            InteractionKind::Like => self.likes_count,
            InteractionKind::Retweet => self.retweets_count,
            InteractionKind::Bookmark => self.bookmarks_count,
        }
    }

    pub fn count_mut(&mut self, kind: InteractionKind) -> &mut u64 {
        match kind {
            InteractionKind::Like => &mut self.likes_count,
            InteractionKind::Retweet => &mut self.retweets_count,
            InteractionKind::Bookmark => &mut self.bookmarks_count,
        }
    }
}

/// Profile page tabs, each cached as its own tweet list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TweetTab {
    Tweets,
    Replies,
    Likes,
    Media,
}

impl_wire_name_conversions!(TweetTab {
    Tweets => "tweets",
    Replies => "replies",
    Likes => "likes",
    Media => "media",
});

impl TweetTab {
    /// All tabs in display order
    pub const ALL: [Self; 4] = [Self::Tweets, Self::Replies, Self::Likes, Self::Media];
}

/// Per-user toggles on a tweet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Retweet,
    Bookmark,
}

impl_wire_name_conversions!(InteractionKind {
    Like => "like",
    Retweet => "retweet",
    Bookmark => "bookmark",
});

/// Whether the viewing user has liked, retweeted or bookmarked a tweet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionState {
    pub liked: bool,
    pub retweeted: bool,
    pub bookmarked: bool,
}

impl InteractionState {
    pub const fn get(&self, kind: InteractionKind) -> bool {
        match kind {
            InteractionKind::Like => self.liked,
            InteractionKind::Retweet => self.retweeted,
            InteractionKind::Bookmark => self.bookmarked,
        }
    }

    pub fn set(&mut self, kind: InteractionKind, active: bool) {
        match kind {
            InteractionKind::Like => self.liked = active,
            InteractionKind::Retweet => self.retweeted = active,
            InteractionKind::Bookmark => self.bookmarked = active,
        }
    }
}

/// Interaction state of one user on one tweet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TweetInteractions {
    pub tweet_id: String,
    #[serde(flatten)]
    pub state: InteractionState,
}

/// Composer input for a new tweet or reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTweet {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,
}

impl NewTweet {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), ..Self::default() }
    }

    pub fn reply(parent_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { content: content.into(), reply_to: Some(parent_id.into()), ..Self::default() }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_media(mut self, url: impl Into<String>) -> Self {
        self.media_urls.push(url.into());
        self
    }
}

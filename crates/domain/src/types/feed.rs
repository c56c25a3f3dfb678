//! Feed types

use serde::{Deserialize, Serialize};

use crate::impl_wire_name_conversions;

/// Timeline variants offered on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedType {
    /// Everything, newest first
    ForYou,
    /// Tweets by accounts the viewer follows
    Following,
    /// Tweets ranked by engagement
    Trending,
}

impl_wire_name_conversions!(FeedType {
    ForYou => "for_you",
    Following => "following",
    Trending => "trending",
});

/// Optional narrowing of a feed
///
/// Serialized into the feed cache key, so unset fields are omitted and field
/// order is fixed by this declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedFilters {
    /// ISO country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Tag without the leading `#`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtag: Option<String>,
    /// Viewer whose follow graph drives the `following` feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_id: Option<String>,
}

impl FeedFilters {
    pub fn is_empty(&self) -> bool {
        self.country.is_none() && self.hashtag.is_none() && self.viewer_id.is_none()
    }

    #[must_use]
    pub fn country(mut self, code: impl Into<String>) -> Self {
        self.country = Some(code.into());
        self
    }

    #[must_use]
    pub fn hashtag(mut self, tag: impl Into<String>) -> Self {
        self.hashtag = Some(tag.into());
        self
    }

    #[must_use]
    pub fn viewer(mut self, user_id: impl Into<String>) -> Self {
        self.viewer_id = Some(user_id.into());
        self
    }
}

/// Country selectable as a feed filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub tweet_count: u64,
}

/// Trending hashtag with its usage count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagCount {
    pub tag: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_type_wire_names() {
        assert_eq!(FeedType::ForYou.to_string(), "for_you");
        assert_eq!("TRENDING".parse::<FeedType>(), Ok(FeedType::Trending));
        assert_eq!(
            serde_json::to_string(&FeedType::ForYou).unwrap(),
            format!("\"{}\"", FeedType::ForYou)
        );
    }

    /// Validates filter serialization is stable and sparse.
    ///
    /// Assertions:
    /// - Confirms unset fields are omitted.
    /// - Confirms declaration order regardless of builder call order.
    #[test]
    fn test_filters_serialization() {
        let filters = FeedFilters::default().hashtag("rust").country("NG");

        assert_eq!(serde_json::to_string(&filters).unwrap(), r#"{"country":"NG","hashtag":"rust"}"#);
        assert_eq!(serde_json::to_string(&FeedFilters::default()).unwrap(), "{}");
    }

    #[test]
    fn test_filters_is_empty() {
        assert!(FeedFilters::default().is_empty());
        assert!(!FeedFilters::default().viewer("u1").is_empty());
    }
}

//! Tweet and profile fixtures with fixed timestamps

use chirp_domain::{Tweet, UserProfile};
use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed base time plus `minutes`
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
}

pub fn profile(id: &str) -> UserProfile {
    UserProfile::new(id, format!("user_{id}"), at(0))
}

pub fn tweet(id: &str, author_id: &str, content: &str, minutes: i64) -> Tweet {
    Tweet {
        id: id.to_string(),
        author_id: author_id.to_string(),
        content: content.to_string(),
        hashtags: chirp_core::feed::search::extract_hashtags(content),
        media_urls: Vec::new(),
        country: None,
        reply_to: None,
        likes_count: 0,
        retweets_count: 0,
        bookmarks_count: 0,
        replies_count: 0,
        created_at: at(minutes),
    }
}

pub fn reply(id: &str, author_id: &str, parent_id: &str, minutes: i64) -> Tweet {
    Tweet { reply_to: Some(parent_id.to_string()), ..tweet(id, author_id, "reply", minutes) }
}

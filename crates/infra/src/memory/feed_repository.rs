//! `FeedRepository` over the in-memory store

use std::collections::HashMap;

use async_trait::async_trait;
use chirp_core::FeedRepository as FeedRepositoryPort;
use chirp_domain::{
    ChirpError, Country, FeedFilters, FeedType, HashtagCount, Result as DomainResult, Tweet,
};

use super::store::{newest_first, BackendState, InMemoryBackend};

/// How many hashtags the trending list returns
pub const TRENDING_HASHTAG_LIMIT: usize = 10;

fn engagement(tweet: &Tweet) -> u64 {
    tweet.likes_count + tweet.retweets_count + tweet.replies_count
}

fn matches_filters(tweet: &Tweet, filters: &FeedFilters) -> bool {
    let country_ok = filters.country.as_deref().map_or(true, |code| {
        tweet.country.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(code))
    });
    let hashtag_ok = filters.hashtag.as_deref().map_or(true, |tag| {
        let tag = tag.trim_start_matches('#');
        tweet.hashtags.iter().any(|h| h.eq_ignore_ascii_case(tag))
    });
    country_ok && hashtag_ok
}

fn tweet_counts_by_country(state: &BackendState) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for code in state.tweets.iter().filter_map(|t| t.country.as_deref()) {
        *counts.entry(code.to_ascii_uppercase()).or_insert(0) += 1;
    }
    counts
}

#[async_trait]
impl FeedRepositoryPort for InMemoryBackend {
    async fn feed(&self, feed_type: FeedType, filters: &FeedFilters) -> DomainResult<Vec<Tweet>> {
        let state = self.read();
        let mut tweets: Vec<Tweet> = state
            .tweets
            .iter()
            .filter(|t| !t.is_reply() && matches_filters(t, filters))
            .cloned()
            .collect();

        match feed_type {
            FeedType::ForYou => newest_first(&mut tweets),
            FeedType::Following => {
                let viewer = filters.viewer_id.as_deref().ok_or_else(|| {
                    ChirpError::InvalidInput("the following feed needs a viewer".to_string())
                })?;
                tweets.retain(|t| state.follows(viewer, &t.author_id));
                newest_first(&mut tweets);
            }
            FeedType::Trending => {
                newest_first(&mut tweets);
                // Stable sort keeps newest first within equal engagement
                tweets.sort_by_key(|t| std::cmp::Reverse(engagement(t)));
            }
        }
        Ok(tweets)
    }

    async fn countries(&self) -> DomainResult<Vec<Country>> {
        let state = self.read();
        let counts = tweet_counts_by_country(&state);

        if !state.countries.is_empty() {
            return Ok(state
                .countries
                .iter()
                .map(|c| Country {
                    tweet_count: counts.get(&c.code.to_ascii_uppercase()).copied().unwrap_or(0),
                    ..c.clone()
                })
                .collect());
        }

        // No registered list: offer every country that has tweets
        let mut countries: Vec<Country> = counts
            .into_iter()
            .map(|(code, tweet_count)| Country { name: code.clone(), code, tweet_count })
            .collect();
        countries.sort_by(|a, b| b.tweet_count.cmp(&a.tweet_count).then_with(|| a.code.cmp(&b.code)));
        Ok(countries)
    }

    async fn trending_hashtags(&self) -> DomainResult<Vec<HashtagCount>> {
        let state = self.read();
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for tag in state.tweets.iter().flat_map(|t| t.hashtags.iter()) {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }

        let mut trending: Vec<HashtagCount> = counts
            .into_iter()
            .map(|(tag, count)| HashtagCount { tag: tag.to_string(), count })
            .collect();
        trending.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
        trending.truncate(TRENDING_HASHTAG_LIMIT);
        Ok(trending)
    }
}

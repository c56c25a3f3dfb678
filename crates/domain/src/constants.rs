//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Feed cache: timelines, country list, trending hashtags
pub const FEED_CACHE_TTL_MS: u64 = 2 * 60 * 1000;
pub const FEED_CACHE_MAX_ENTRIES: usize = 50;

// Profile cache: one entry per user
pub const PROFILE_CACHE_TTL_MS: u64 = 5 * 60 * 1000;
pub const PROFILE_CACHE_MAX_ENTRIES: usize = 100;

// Tweet cache: per-user tab lists and interaction lookups
pub const TWEET_CACHE_TTL_MS: u64 = 3 * 60 * 1000;
pub const TWEET_CACHE_MAX_ENTRIES: usize = 200;

// Composition
pub const MAX_TWEET_LENGTH: usize = 280;

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";

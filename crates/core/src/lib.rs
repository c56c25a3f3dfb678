//! # Chirp Core
//!
//! Client-side business logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Cache key builders, the named caches and their invalidation rules
//! - Port interfaces (traits) for the hosted backend
//! - Read-through services for profiles, feeds and tweets
//! - Optimistic interaction state, reply threads and search filtering
//!
//! ## Architecture Principles
//! - Only depends on `chirp-common` and `chirp-domain`
//! - No HTTP or storage code
//! - All backend access via traits
//! - Caches are passed in explicitly, never global

pub mod cache;
pub mod feed;
pub mod profile;
pub mod tweets;

// Re-export specific items to avoid ambiguity
pub use cache::{keys, AppCacheStats, AppCaches, FeedPayload, TweetPayload};
pub use feed::ports::FeedRepository;
pub use feed::FeedService;
pub use profile::ports::ProfileRepository;
pub use profile::ProfileService;
pub use tweets::interactions::{InteractionSnapshot, TimelineTweet};
pub use tweets::ports::TweetRepository;
pub use tweets::thread::{flatten_thread, ThreadEntry};
pub use tweets::TweetService;

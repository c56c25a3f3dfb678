//! Named caches for backend read results
//!
//! - [`keys`]: deterministic string keys per resource
//! - [`AppCaches`]: the feed, profile and tweet caches, built once from
//!   configuration and shared by cloning
//! - invalidation helpers on [`AppCaches`] that drop keys after mutations

mod invalidation;
pub mod keys;
mod registry;

pub use registry::{
    AppCacheStats, AppCaches, FeedCache, FeedPayload, ProfileCache, TweetCache, TweetPayload,
};

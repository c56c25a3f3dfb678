//! Modular common utilities shared across Chirp crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: clock abstraction and TTL parsing
//! - `runtime`: caching (`DataCache`, `CoalescingLoader`, health reports)
//! - `observability`: tracing output from the runtime tier

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod time;

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod cache;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use cache::{CacheConfig, CacheStats, CoalescingLoader, DataCache, EvictionPolicy};
#[cfg(feature = "foundation")]
pub use time::{Clock, MockClock, SystemClock};

//! In-memory backend
//!
//! One [`InMemoryBackend`] implements all three backend ports, so a single
//! `Arc` can be handed to every service. State can be seeded from and
//! exported to a JSON [`BackendSnapshot`].

mod feed_repository;
mod profile_repository;
pub mod snapshot;
mod store;
mod tweet_repository;

pub use feed_repository::TRENDING_HASHTAG_LIMIT;
pub use snapshot::{BackendSnapshot, Follow, StoredInteraction};
pub use store::InMemoryBackend;

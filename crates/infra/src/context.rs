//! Application context - dependency injection container
//!
//! Wires one set of named caches into the three services so that a write
//! through any service invalidates what the others read.

use std::path::PathBuf;
use std::sync::Arc;

use chirp_core::{
    AppCaches, FeedRepository as FeedRepositoryPort, FeedService,
    ProfileRepository as ProfileRepositoryPort, ProfileService,
    TweetRepository as TweetRepositoryPort, TweetService,
};
use chirp_domain::{AppConfig, Result};

use crate::memory::{BackendSnapshot, InMemoryBackend};
use crate::{config, observability};

/// Environment variable naming a JSON snapshot to seed the in-memory backend
pub const SEED_FILE_ENV: &str = "CHIRP_SEED_FILE";

/// Application context - holds all services and the caches they share
#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub caches: AppCaches,
    pub profiles: ProfileService,
    pub tweets: TweetService,
    pub feeds: FeedService,
}

impl AppContext {
    /// Build a context over arbitrary backend ports
    ///
    /// # Errors
    /// Returns `ChirpError::Config` if the cache settings are invalid.
    pub fn with_ports(
        config: AppConfig,
        profiles: Arc<dyn ProfileRepositoryPort>,
        tweets: Arc<dyn TweetRepositoryPort>,
        feeds: Arc<dyn FeedRepositoryPort>,
    ) -> Result<Self> {
        config.validate()?;
        let caches = AppCaches::new(&config.caches);

        Ok(Self {
            profiles: ProfileService::new(profiles, caches.clone()),
            tweets: TweetService::new(tweets, caches.clone()),
            feeds: FeedService::new(feeds, caches.clone()),
            caches,
            config,
        })
    }

    /// Build a context whose services all talk to one in-memory backend
    ///
    /// # Errors
    /// Returns `ChirpError::Config` if the cache settings are invalid.
    pub fn in_memory(config: AppConfig, backend: Arc<InMemoryBackend>) -> Result<Self> {
        Self::with_ports(config, backend.clone(), backend.clone(), backend)
    }

    /// Load `.env`, configuration and logging, then build an in-memory
    /// context, seeded from `CHIRP_SEED_FILE` when it is set
    ///
    /// # Errors
    /// Returns the first configuration, logging or seed-file error.
    pub fn bootstrap() -> Result<Self> {
        let dotenv = dotenvy::dotenv();
        let config = config::load()?;
        observability::init_logging(&config.logging)?;

        match dotenv {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
        }

        let backend = match std::env::var_os(SEED_FILE_ENV) {
            Some(path) => {
                InMemoryBackend::from_snapshot(BackendSnapshot::load(&PathBuf::from(path))?)
            }
            None => InMemoryBackend::new(),
        };

        let context = Self::in_memory(config, Arc::new(backend))?;
        tracing::info!(
            feed_max = context.config.caches.feed.max_entries,
            profile_max = context.config.caches.profile.max_entries,
            tweet_max = context.config.caches.tweet.max_entries,
            "Application context ready"
        );
        Ok(context)
    }

    /// Log final cache statistics
    pub fn shutdown(&self) {
        self.caches.log_stats();
        tracing::info!("Application context shut down");
    }
}

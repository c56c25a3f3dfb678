//! # Chirp Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Configuration loading (environment, TOML and JSON files)
//! - Logging initialisation
//! - An in-memory backend implementing every port
//! - The application context that wires services to shared caches
//!
//! ## Architecture
//! - Implements traits defined in `chirp-core`
//! - Contains all "impure" code (environment, files, global subscriber)

pub mod config;
pub mod context;
pub mod errors;
pub mod memory;
pub mod observability;

// Re-export commonly used items
pub use context::AppContext;
pub use errors::InfraError;
pub use memory::{BackendSnapshot, InMemoryBackend};
pub use observability::init_logging;

//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Chirp
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ChirpError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChirpError {
    /// Whether retrying the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Backend(_))
    }
}

impl From<serde_json::Error> for ChirpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("Serialization failed: {err}"))
    }
}

/// Result type alias for Chirp operations
pub type Result<T> = std::result::Result<T, ChirpError>;

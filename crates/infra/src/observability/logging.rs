//! Structured logging with tracing
//!
//! `RUST_LOG` takes precedence over the configured level so a single run can
//! be made more verbose without touching config files.

use chirp_domain::{ChirpError, LoggingConfig, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Build the level filter for the subscriber
///
/// # Errors
/// Returns `ChirpError::Config` if the configured directive does not parse.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| ChirpError::Config(format!("Invalid log level '{}': {e}", config.level)))
}

/// Install the global subscriber
///
/// Returns `Ok(false)` when a subscriber is already installed, which happens
/// when tests or an embedding binary got there first.
///
/// # Errors
/// Returns `ChirpError::Config` if the level directive is invalid.
pub fn init_logging(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;
    let registry = Registry::default().with(filter);

    // Layer types differ between the two formats
    let installed = if config.json {
        registry.with(fmt::layer().json().with_target(true).with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::info!(level = %config.level, json = config.json, "Logging initialized");
            Ok(true)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Global subscriber already set");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_accepts_directives() {
        let config = LoggingConfig { level: "warn,chirp_core=debug".to_string(), json: false };
        assert!(build_filter(&config).is_ok());
    }

    /// Validates repeated initialisation is not an error.
    ///
    /// Assertions:
    /// - At most one call installs the subscriber
    /// - The second call reports `false`
    #[test]
    fn test_second_init_is_noop() {
        let config = LoggingConfig::default();
        let _first = init_logging(&config).unwrap();
        assert!(!init_logging(&config).unwrap());
    }
}

//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from `CHIRP_*` environment variables
//! 2. If none are set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Uses built-in defaults when no file exists
//!
//! ## Environment Variables
//! - `CHIRP_FEED_CACHE_TTL`: Feed cache TTL (`120000`, `2m`, `90s`)
//! - `CHIRP_FEED_CACHE_MAX`: Feed cache capacity
//! - `CHIRP_PROFILE_CACHE_TTL`: Profile cache TTL
//! - `CHIRP_PROFILE_CACHE_MAX`: Profile cache capacity
//! - `CHIRP_TWEET_CACHE_TTL`: Tweet cache TTL
//! - `CHIRP_TWEET_CACHE_MAX`: Tweet cache capacity
//! - `CHIRP_LOG_LEVEL`: Log filter directive (`info`, `chirp_core=debug`)
//! - `CHIRP_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! Unset variables keep their defaults.
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./chirp.toml`, `./chirp.json`, `./config.toml`, `./config.json`
//! 2. The same names in the parent and grandparent directories
//! 3. Relative to executable location

use std::path::{Path, PathBuf};

use chirp_common::time::parse_ttl;
use chirp_domain::{AppConfig, CacheSettings, ChirpError, Result};

const CONFIG_FILE_NAMES: [&str; 4] = ["chirp.toml", "chirp.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// Environment variables win when at least one `CHIRP_*` variable is set.
/// Otherwise the first config file found is used, and defaults apply when
/// there is none.
///
/// # Errors
/// Returns `ChirpError::Config` if a source exists but holds invalid values.
pub fn load() -> Result<AppConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(ChirpError::NotFound(reason)) => {
            tracing::debug!(%reason, "No environment configuration, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No config file found, using defaults");
                    Ok(AppConfig::default())
                }
            }
        }
        Err(e) => Err(e),
    }
}

/// Load configuration from `CHIRP_*` environment variables
///
/// # Errors
/// Returns `ChirpError::NotFound` if no variable is set, and
/// `ChirpError::Config` if a set variable has an invalid value.
pub fn load_from_env() -> Result<AppConfig> {
    load_from_lookup(|name| std::env::var(name).ok())
}

/// Build a configuration from any name-to-value lookup
pub(crate) fn load_from_lookup<F>(lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AppConfig::default();
    let mut found = false;

    for (prefix, settings) in [
        ("CHIRP_FEED_CACHE", &mut config.caches.feed),
        ("CHIRP_PROFILE_CACHE", &mut config.caches.profile),
        ("CHIRP_TWEET_CACHE", &mut config.caches.tweet),
    ] {
        found |= apply_cache_vars(&lookup, prefix, settings)?;
    }

    if let Some(level) = lookup("CHIRP_LOG_LEVEL") {
        config.logging.level = level.trim().to_string();
        found = true;
    }
    if let Some(json) = lookup("CHIRP_LOG_JSON") {
        config.logging.json = parse_bool("CHIRP_LOG_JSON", &json)?;
        found = true;
    }

    if !found {
        return Err(ChirpError::NotFound("no CHIRP_* environment variables set".to_string()));
    }

    config.validate()?;
    Ok(config)
}

fn apply_cache_vars<F>(lookup: &F, prefix: &str, settings: &mut CacheSettings) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let mut found = false;

    let ttl_var = format!("{prefix}_TTL");
    if let Some(raw) = lookup(&ttl_var) {
        let ttl = parse_ttl(&raw)
            .map_err(|e| ChirpError::Config(format!("Invalid {ttl_var}: {e}")))?;
        settings.ttl_ms = u64::try_from(ttl.as_millis())
            .map_err(|_| ChirpError::Config(format!("Invalid {ttl_var}: out of range")))?;
        found = true;
    }

    let max_var = format!("{prefix}_MAX");
    if let Some(raw) = lookup(&max_var) {
        settings.max_entries = raw
            .trim()
            .parse::<usize>()
            .map_err(|e| ChirpError::Config(format!("Invalid {max_var}: {e}")))?;
        found = true;
    }

    Ok(found)
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ChirpError::Config(format!("Invalid {name}: {other}"))),
    }
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `ChirpError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - A cache section fails validation
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ChirpError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ChirpError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| ChirpError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| ChirpError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| ChirpError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(ChirpError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use chirp_domain::CachesConfig;
    use tempfile::NamedTempFile;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let path = file.path().with_extension(extension);
        std::fs::copy(file.path(), &path).unwrap();
        (file, path)
    }

    /// Validates that no variables means "not configured" rather than an error.
    #[test]
    fn test_empty_environment_is_not_found() {
        let result = load_from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(ChirpError::NotFound(_))));
    }

    /// Validates partial overrides keep the remaining defaults.
    ///
    /// Assertions:
    /// - TTL units are parsed
    /// - Unset caches keep their stock settings
    #[test]
    fn test_partial_environment_overrides() {
        let config = load_from_lookup(lookup_from(&[
            ("CHIRP_FEED_CACHE_TTL", "30s"),
            ("CHIRP_TWEET_CACHE_MAX", "500"),
            ("CHIRP_LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.caches.feed.ttl_ms, 30_000);
        assert_eq!(config.caches.feed.max_entries, 50);
        assert_eq!(config.caches.tweet.max_entries, 500);
        assert_eq!(config.caches.profile, CachesConfig::default().profile);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_plain_millisecond_ttl() {
        let config =
            load_from_lookup(lookup_from(&[("CHIRP_PROFILE_CACHE_TTL", "1500")])).unwrap();
        assert_eq!(config.caches.profile.ttl_ms, 1_500);
    }

    #[test]
    fn test_invalid_environment_values() {
        for (name, value) in [
            ("CHIRP_FEED_CACHE_TTL", "soon"),
            ("CHIRP_PROFILE_CACHE_MAX", "-1"),
            ("CHIRP_LOG_JSON", "maybe"),
            ("CHIRP_TWEET_CACHE_MAX", "0"),
        ] {
            let result = load_from_lookup(lookup_from(&[(name, value)]));
            assert!(
                matches!(result, Err(ChirpError::Config(_))),
                "{name}={value} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_parse_toml_sections() {
        let (_file, path) = write_config(
            "[caches.feed]\nttl_ms = 1000\nmax_entries = 5\n\n[logging]\nlevel = \"debug\"\n",
            "toml",
        );

        let config = load_from_file(Some(path.clone())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.caches.feed, CacheSettings::new(1_000, 5));
        assert_eq!(config.caches.tweet, CacheSettings::tweet_default());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_unsupported_extension() {
        let result = parse_config("", Path::new("chirp.yaml"));
        assert!(matches!(result, Err(ChirpError::Config(msg)) if msg.contains("yaml")));
    }

    #[test]
    fn test_zero_capacity_file_rejected() {
        let (_file, path) =
            write_config(r#"{"caches":{"profile":{"ttl_ms":10,"max_entries":0}}}"#, "json");

        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ChirpError::Config(msg)) if msg.contains("caches.profile")));
    }
}

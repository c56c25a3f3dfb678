//! Time-to-live parsing from configuration strings
//!
//! Accepts `500ms`, `30s`, `5m`, `1h`, `1d`, combinations such as `1m 30s`,
//! and bare integers which are read as milliseconds.

use std::time::Duration;

use thiserror::Error;

/// Error type for TTL parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TtlParseError {
    #[error("Invalid TTL format: {0}")]
    InvalidFormat(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Empty TTL string")]
    EmptyString,
}

/// Parse a TTL string into a [`Duration`]
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use chirp_common::time::parse_ttl;
///
/// assert_eq!(parse_ttl("500ms").unwrap(), Duration::from_millis(500));
/// assert_eq!(parse_ttl("5m").unwrap(), Duration::from_secs(300));
/// assert_eq!(parse_ttl("1m 30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(parse_ttl("1500").unwrap(), Duration::from_millis(1500));
/// ```
pub fn parse_ttl(s: &str) -> Result<Duration, TtlParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TtlParseError::EmptyString);
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| TtlParseError::InvalidNumber(s.to_string()));
    }

    let mut total = Duration::ZERO;
    let mut number = String::new();
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            number.push(ch);
            continue;
        }
        if ch.is_whitespace() {
            continue;
        }

        if number.is_empty() {
            return Err(TtlParseError::InvalidFormat("Expected number before unit".to_string()));
        }
        let value: u64 =
            number.parse().map_err(|_| TtlParseError::InvalidNumber(number.clone()))?;

        let unit = match ch {
            'm' if chars.peek() == Some(&'s') => {
                chars.next();
                Duration::from_millis(value)
            }
            's' => Duration::from_secs(value),
            'm' => Duration::from_secs(value.saturating_mul(60)),
            'h' => Duration::from_secs(value.saturating_mul(3_600)),
            'd' => Duration::from_secs(value.saturating_mul(86_400)),
            other => return Err(TtlParseError::UnknownUnit(other.to_string())),
        };

        total = total.saturating_add(unit);
        number.clear();
    }

    if !number.is_empty() {
        return Err(TtlParseError::InvalidFormat("Missing unit after number".to_string()));
    }

    Ok(total)
}

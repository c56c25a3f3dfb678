//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use chirp_domain::ChirpError;
use serde_json::Error as JsonError;
use toml::de::Error as TomlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ChirpError);

impl From<InfraError> for ChirpError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ChirpError> for InfraError {
    fn from(value: ChirpError) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for InfraError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for InfraError {}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoChirpError {
    fn into_chirp(self) -> ChirpError;
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → ChirpError */
/* -------------------------------------------------------------------------- */

impl IntoChirpError for IoError {
    fn into_chirp(self) -> ChirpError {
        match self.kind() {
            ErrorKind::NotFound => ChirpError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                ChirpError::Unauthorized(format!("permission denied: {self}"))
            }
            ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
                ChirpError::InvalidInput(format!("unreadable data: {self}"))
            }
            _ => ChirpError::Internal(format!("I/O failure: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        Self(value.into_chirp())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ChirpError */
/* -------------------------------------------------------------------------- */

impl IntoChirpError for JsonError {
    fn into_chirp(self) -> ChirpError {
        if self.is_io() {
            return ChirpError::Internal(format!("I/O failure while reading JSON: {self}"));
        }
        ChirpError::InvalidInput(format!(
            "Invalid JSON at line {} column {}: {self}",
            self.line(),
            self.column()
        ))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        Self(value.into_chirp())
    }
}

/* -------------------------------------------------------------------------- */
/* toml::de::Error → ChirpError */
/* -------------------------------------------------------------------------- */

impl IntoChirpError for TomlError {
    fn into_chirp(self) -> ChirpError {
        ChirpError::InvalidInput(format!("Invalid TOML: {}", self.message()))
    }
}

impl From<TomlError> for InfraError {
    fn from(value: TomlError) -> Self {
        Self(value.into_chirp())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err = IoError::new(ErrorKind::NotFound, "snapshot.json");
        let mapped: ChirpError = InfraError::from(err).into();
        match mapped {
            ChirpError::NotFound(msg) => assert!(msg.contains("snapshot.json")),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn io_permission_maps_to_unauthorized() {
        let err = IoError::new(ErrorKind::PermissionDenied, "locked");
        let mapped: ChirpError = InfraError::from(err).into();
        assert!(matches!(mapped, ChirpError::Unauthorized(_)));
    }

    #[test]
    fn json_syntax_error_reports_position() {
        let err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let mapped: ChirpError = InfraError::from(err).into();
        match mapped {
            ChirpError::InvalidInput(msg) => assert!(msg.contains("line 2")),
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn toml_error_maps_to_invalid_input() {
        let err = toml::from_str::<toml::Table>("key = ").unwrap_err();
        let mapped: ChirpError = InfraError::from(err).into();
        assert!(matches!(mapped, ChirpError::InvalidInput(msg) if msg.starts_with("Invalid TOML")));
    }
}

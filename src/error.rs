//! Error types and handling for pos-energy
//!
//! This module defines the error types used throughout the crate. Everything
//! that can go wrong while talking to the statistics feeds collapses into
//! [`EnergyError::FetchFailed`]; the remaining variants cover the ambient
//! concerns (configuration, I/O, the HTTP API).

use thiserror::Error;

/// Result type alias for pos-energy operations
pub type Result<T> = std::result::Result<T, EnergyError>;

/// User-facing message shown in place of the comparison after a failed refresh
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Main error type for pos-energy
#[derive(Debug, Error)]
pub enum EnergyError {
    /// Network failure, non-2xx response or undecodable body from either feed
    #[error("Fetch failed: {message}")]
    FetchFailed { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// HTTP server errors
    #[error("Web server error: {message}")]
    Web { message: String },
}

impl EnergyError {
    /// Create a new fetch error
    pub fn fetch_failed<S: Into<String>>(message: S) -> Self {
        EnergyError::FetchFailed {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        EnergyError::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        EnergyError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        EnergyError::Io {
            message: message.into(),
        }
    }

    /// Create a new web error
    pub fn web<S: Into<String>>(message: S) -> Self {
        EnergyError::Web {
            message: message.into(),
        }
    }

    /// Whether this error came from one of the statistics feeds
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, EnergyError::FetchFailed { .. })
    }
}

impl From<std::io::Error> for EnergyError {
    fn from(err: std::io::Error) -> Self {
        EnergyError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for EnergyError {
    fn from(err: serde_yaml::Error) -> Self {
        EnergyError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnergyError {
    fn from(err: serde_json::Error) -> Self {
        EnergyError::Serialization {
            message: err.to_string(),
        }
    }
}

// Transport, status and body-decoding failures are indistinguishable to callers
impl From<reqwest::Error> for EnergyError {
    fn from(err: reqwest::Error) -> Self {
        EnergyError::fetch_failed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = EnergyError::config("test config error");
        assert!(matches!(err, EnergyError::Config { .. }));

        let err = EnergyError::fetch_failed("connection refused");
        assert!(matches!(err, EnergyError::FetchFailed { .. }));
        assert!(err.is_fetch_failure());

        let err = EnergyError::validation("field", "test validation error");
        assert!(matches!(err, EnergyError::Validation { .. }));
        assert!(!err.is_fetch_failure());
    }

    #[test]
    fn test_error_display() {
        let err = EnergyError::config("test error");
        assert_eq!(format!("{}", err), "Configuration error: test error");

        let err = EnergyError::validation("refresh.interval_secs", "must be positive");
        assert_eq!(
            format!("{}", err),
            "Validation error: refresh.interval_secs - must be positive"
        );
    }

    #[test]
    fn json_errors_map_to_serialization() {
        let err: EnergyError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, EnergyError::Serialization { .. }));
    }
}

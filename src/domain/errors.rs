//! Domain error types
//!
//! This module defines the error hierarchy for awp. Two layers exist:
//!
//! - [`ApiError`] is the value returned by the signed API client for every
//!   failed call. It is data, not a panic, and every call site branches on it.
//! - [`AwpError`] is the error type for operations that abort a run
//!   (bad configuration, unreadable credentials, failed root enumeration).
//!
//! Neither type exposes third-party error types.

use thiserror::Error;

/// Main awp error type
#[derive(Debug, Error)]
pub enum AwpError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// `.edgerc` credential errors
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// A remote call failed and the failure is fatal for the current operation
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Enumeration could not produce a work list
    #[error("Enumeration error: {0}")]
    Enumeration(String),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Failure returned by the signed API client
///
/// Mirrors the `{error, status_code?}` mapping returned by the remote transport:
/// `status_code` is present for HTTP-level failures and absent for transport
/// or decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    /// Human-readable error message
    pub message: String,

    /// HTTP status code, when the server answered
    pub status_code: Option<u16>,
}

impl ApiError {
    /// Creates an error for a transport-level failure (no HTTP status)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }

    /// Creates an error for an HTTP-level failure
    pub fn http(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Creates an error for an unparseable response body
    pub fn decode(message: impl std::fmt::Display) -> Self {
        Self::transport(format!("JSON decode error: {message}"))
    }

    /// Whether the server rejected the call with 429 Too Many Requests
    pub fn is_rate_limited(&self) -> bool {
        self.status_code == Some(429)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AwpError {
    fn from(err: std::io::Error) -> Self {
        AwpError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AwpError {
    fn from(err: serde_json::Error) -> Self {
        AwpError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AwpError {
    fn from(err: toml::de::Error) -> Self {
        AwpError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for AwpError {
    fn from(err: csv::Error) -> Self {
        AwpError::Csv(err.to_string())
    }
}

//! Result type aliases for awp

use super::errors::{ApiError, AwpError};

/// Result type alias for operations that can abort a run
///
/// # Examples
///
/// ```
/// use awp::domain::result::Result;
/// use awp::domain::errors::AwpError;
///
/// fn failing_function() -> Result<()> {
///     Err(AwpError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AwpError>;

/// Outcome of a single signed API call: the parsed JSON body or an [`ApiError`] value
pub type ApiResult = std::result::Result<serde_json::Value, ApiError>;

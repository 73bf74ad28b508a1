//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - human-readable console output on stderr
//! - optional JSON log files with rotation
//!
//! Progress of enumeration and export is reported through
//! [`Reporter`](crate::core::report::Reporter); the console reporter forwards
//! those events to the macros re-exported here.
//!
//! # Example
//!
//! ```no_run
//! use awp::config::LoggingConfig;
//! use awp::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(group_id = "grp_1", "Enumerating group");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use awp::domain::AwpError;
/// use awp::log_error_with_context;
///
/// let error = AwpError::Credentials("section [papi] not found".to_string());
/// log_error_with_context!(&error, "Failed to load credentials");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log the outcome of a batch export
///
/// # Example
///
/// ```no_run
/// use awp::log_batch_complete;
/// use std::time::Duration;
///
/// log_batch_complete!(4, 5, Duration::from_secs(90));
/// ```
#[macro_export]
macro_rules! log_batch_complete {
    ($succeeded:expr, $total:expr, $duration:expr) => {
        tracing::info!(
            succeeded = $succeeded,
            total = $total,
            duration_ms = $duration.as_millis() as u64,
            "Batch export completed"
        );
    };
}

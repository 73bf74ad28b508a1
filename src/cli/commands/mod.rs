//! CLI command implementations
//!
//! Every command returns its process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Partial failure, or nothing found |
//! | 2 | Configuration error |
//! | 4 | Credential or connection error |
//! | 5 | Fatal run error |
//! | 130 | Interrupted |

pub mod lists;
pub mod properties;
pub mod search;

use crate::adapters::akamai::{EdgeGridClient, EdgeRc, SignedApiClient};
use crate::config::{validate_delay_seconds, AwpConfig};
use crate::core::export::BatchSummary;
use crate::core::report::{ConsoleReporter, Reporter};
use crate::domain::{AwpError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Everything a command needs besides its own arguments
pub struct CommandContext {
    pub config: AwpConfig,
    pub verbose: bool,
    shutdown: watch::Receiver<bool>,
}

impl CommandContext {
    pub fn new(config: AwpConfig, verbose: bool, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            config,
            verbose,
            shutdown,
        }
    }

    /// Builds the signed client from the configured `.edgerc` section
    ///
    /// # Errors
    ///
    /// Returns [`AwpError::Credentials`] if the credentials cannot be read.
    pub fn connect(&self) -> Result<Arc<dyn SignedApiClient>> {
        let credentials = &self.config.credentials;
        let edgerc = EdgeRc::from_file(&credentials.edgerc, &credentials.section)?;
        tracing::debug!(
            host = %edgerc.host,
            section = %credentials.section,
            account_switch_key = credentials.account_switch_key.is_some(),
            "Loaded EdgeGrid credentials"
        );

        let client = EdgeGridClient::new(
            &edgerc,
            &self.config.http,
            credentials.account_switch_key.clone(),
        )?;
        Ok(Arc::new(client))
    }

    pub fn reporter(&self) -> Arc<dyn Reporter> {
        Arc::new(ConsoleReporter::new(self.verbose))
    }

    pub fn shutdown(&self) -> watch::Receiver<bool> {
        self.shutdown.clone()
    }
}

/// Exit code for an error that ends a command
pub fn exit_code_for(error: &AwpError) -> i32 {
    match error {
        AwpError::Configuration(_) | AwpError::Validation(_) => 2,
        AwpError::Credentials(_) => 4,
        AwpError::Api(api) => match api.status_code {
            None | Some(401) | Some(403) => 4,
            Some(_) => 5,
        },
        _ => 5,
    }
}

/// Prints `action` and the error on stderr and returns the matching exit code
pub fn report_failure(action: &str, error: &AwpError) -> i32 {
    crate::log_error_with_context!(error, action);
    eprintln!("❌ {action}");
    eprintln!("   Error: {error}");
    exit_code_for(error)
}

/// Exit code for a finished batch
pub fn summary_exit_code(summary: &BatchSummary) -> i32 {
    if summary.interrupted {
        130
    } else if summary.is_successful() {
        0
    } else {
        1
    }
}

/// Parses a `--delay` value given in seconds
pub fn parse_delay(value: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    validate_delay_seconds(seconds)?;
    Ok(Duration::from_secs_f64(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiError;
    use test_case::test_case;

    #[test_case(AwpError::Configuration("bad".into()), 2; "configuration")]
    #[test_case(AwpError::Validation("bad id".into()), 2; "validation")]
    #[test_case(AwpError::Credentials("missing section".into()), 4; "credentials")]
    #[test_case(AwpError::Api(ApiError::transport("connection refused")), 4; "transport")]
    #[test_case(AwpError::Api(ApiError::http(403, "Forbidden")), 4; "forbidden")]
    #[test_case(AwpError::Api(ApiError::http(500, "Server Error")), 5; "server error")]
    #[test_case(AwpError::Enumeration("bad response".into()), 5; "enumeration")]
    fn test_exit_code_for(error: AwpError, expected: i32) {
        assert_eq!(exit_code_for(&error), expected);
    }

    #[test]
    fn test_parse_delay() {
        assert_eq!(parse_delay("21"), Ok(Duration::from_secs(21)));
        assert_eq!(parse_delay("0.5"), Ok(Duration::from_millis(500)));
        assert_eq!(parse_delay("0"), Ok(Duration::ZERO));
        assert!(parse_delay("-1").is_err());
        assert!(parse_delay("soon").is_err());
    }

    #[test]
    fn test_summary_exit_code() {
        let mut summary = BatchSummary::new(0);
        assert_eq!(summary_exit_code(&summary), 0);

        summary.interrupted = true;
        assert_eq!(summary_exit_code(&summary), 130);
    }

    #[test]
    fn test_connect_reports_missing_credentials() {
        let mut config = AwpConfig::default();
        config.credentials.edgerc = "/nonexistent/awp/.edgerc".to_string();
        let (_tx, rx) = watch::channel(false);
        let ctx = CommandContext::new(config, false, rx);

        let err = ctx.connect().err().map(|e| exit_code_for(&e));
        assert_eq!(err, Some(4));
    }
}

//! Configuration schema types
//!
//! Every section and field has a default, so an absent or empty `awp.toml`
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main awp configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AwpConfig {
    /// Credential source settings
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AwpConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.credentials.validate()?;
        self.http.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Where EdgeGrid credentials come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Path to the `.edgerc` file (`~` is expanded)
    #[serde(default = "default_edgerc")]
    pub edgerc: String,

    /// Section of the `.edgerc` file
    #[serde(default = "default_section")]
    pub section: String,

    /// Account switch key for multi-account access
    #[serde(default)]
    pub account_switch_key: Option<String>,
}

impl CredentialsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.edgerc.trim().is_empty() {
            return Err("credentials.edgerc cannot be empty".to_string());
        }
        if self.section.trim().is_empty() {
            return Err("credentials.section cannot be empty".to_string());
        }
        if let Some(key) = &self.account_switch_key {
            if key.trim().is_empty() {
                return Err(
                    "credentials.account_switch_key cannot be empty when set".to_string()
                );
            }
        }
        Ok(())
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            edgerc: default_edgerc(),
            section: default_section(),
            account_switch_key: None,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,

    /// Maximum number of body bytes covered by the request signature
    ///
    /// A `max-body` entry in the `.edgerc` section takes precedence.
    #[serde(default = "default_max_body")]
    pub max_body: usize,
}

impl HttpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err(format!(
                "http.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }
        if self.connect_timeout_seconds == 0 {
            return Err("http.connect_timeout_seconds must be greater than 0".to_string());
        }
        if self.max_body == 0 {
            return Err("http.max_body must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Connect timeout as a [`Duration`]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            max_body: default_max_body(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pause between rule tree fetches, in seconds
    ///
    /// The rule tree endpoint allows 3 calls per minute; 21 seconds keeps
    /// every run under that ceiling.
    #[serde(default = "default_rule_tree_delay_seconds")]
    pub rule_tree_delay_seconds: f64,

    /// Pause before each property listing call during enumeration, in milliseconds
    #[serde(default = "default_enumeration_delay_ms")]
    pub enumeration_delay_ms: u64,

    /// Default output directory for rule trees
    #[serde(default = "default_properties_dir")]
    pub properties_dir: PathBuf,

    /// Default output directory for network list CSV files
    #[serde(default = "default_network_lists_dir")]
    pub network_lists_dir: PathBuf,

    /// Default output directory for client list CSV files
    #[serde(default = "default_client_lists_dir")]
    pub client_lists_dir: PathBuf,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        validate_delay_seconds(self.rule_tree_delay_seconds)
            .map_err(|e| format!("export.rule_tree_delay_seconds {e}"))?;

        if self.enumeration_delay_ms > 60_000 {
            return Err(format!(
                "export.enumeration_delay_ms must be <= 60000, got {}",
                self.enumeration_delay_ms
            ));
        }

        Ok(())
    }

    /// Rule tree inter-request delay as a [`Duration`]
    pub fn rule_tree_delay(&self) -> Duration {
        Duration::from_secs_f64(self.rule_tree_delay_seconds)
    }

    /// Enumeration delay as a [`Duration`]
    pub fn enumeration_delay(&self) -> Duration {
        Duration::from_millis(self.enumeration_delay_ms)
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            rule_tree_delay_seconds: default_rule_tree_delay_seconds(),
            enumeration_delay_ms: default_enumeration_delay_ms(),
            properties_dir: default_properties_dir(),
            network_lists_dir: default_network_lists_dir(),
            client_lists_dir: default_client_lists_dir(),
        }
    }
}

/// Checks that a delay given in seconds can become a [`Duration`]
pub fn validate_delay_seconds(seconds: f64) -> Result<(), String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("must be a non-negative number of seconds, got {seconds}"));
    }
    if seconds > 3600.0 {
        return Err(format!("must be <= 3600 seconds, got {seconds}"));
    }
    Ok(())
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid logging.log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_edgerc() -> String {
    "~/.edgerc".to_string()
}

fn default_section() -> String {
    "default".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_connect_timeout_seconds() -> u64 {
    10
}

fn default_max_body() -> usize {
    131_072
}

fn default_rule_tree_delay_seconds() -> f64 {
    21.0
}

fn default_enumeration_delay_ms() -> u64 {
    300
}

fn default_properties_dir() -> PathBuf {
    PathBuf::from("./properties")
}

fn default_network_lists_dir() -> PathBuf {
    PathBuf::from("./networklists")
}

fn default_client_lists_dir() -> PathBuf {
    PathBuf::from("./clientlists")
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

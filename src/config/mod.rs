//! Configuration management for awp.
//!
//! awp works without any configuration file: every setting has a default and
//! the command-line flags cover the common cases. An optional `awp.toml`
//! (or the file given with `--config`) adjusts the defaults.
//!
//! Settings are resolved in this order, later sources winning:
//!
//! 1. Built-in defaults
//! 2. The TOML file, with `${VAR_NAME}` environment substitution
//! 3. `AWP_*` environment variable overrides
//! 4. Command-line flags
//!
//! # Example Configuration
//!
//! ```toml
//! [credentials]
//! edgerc = "~/.edgerc"
//! section = "papi"
//! account_switch_key = "${AKAMAI_ACCOUNT_SWITCH_KEY}"
//!
//! [http]
//! timeout_seconds = 30
//!
//! [export]
//! rule_tree_delay_seconds = 21.0
//! properties_dir = "./properties"
//!
//! [logging]
//! log_level = "info"
//! local_enabled = true
//! local_path = "./logs"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use awp::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config_or_default(None)?;
//! println!("Using .edgerc section [{}]", config.credentials.section);
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, DEFAULT_CONFIG_FILE};
pub use schema::{
    validate_delay_seconds, AwpConfig, CredentialsConfig, ExportConfig, HttpConfig,
    LoggingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};

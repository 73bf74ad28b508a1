//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AwpConfig;
use crate::domain::errors::AwpError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "awp.toml";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`AwpConfig`]
/// 4. Applies environment variable overrides (`AWP_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, a referenced
/// environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<AwpConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AwpError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AwpError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: AwpConfig = toml::from_str(&contents)
        .map_err(|e| AwpError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

/// Loads configuration, falling back to defaults when no file is present
///
/// An explicitly requested file must exist. Without one, [`DEFAULT_CONFIG_FILE`]
/// is used if it exists in the working directory; otherwise defaults apply.
/// Environment overrides and validation run in every case.
pub fn load_config_or_default(path: Option<&Path>) -> Result<AwpConfig> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config(DEFAULT_CONFIG_FILE),
        None => {
            tracing::debug!("No configuration file found, using defaults");
            finish(AwpConfig::default())
        }
    }
}

fn finish(mut config: AwpConfig) -> Result<AwpConfig> {
    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| AwpError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| AwpError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AwpError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `AWP_*` prefix
///
/// Variables follow the pattern `AWP_<SECTION>_<KEY>`, e.g. `AWP_CREDENTIALS_SECTION`.
/// Unparseable numeric values are ignored with a warning.
fn apply_env_overrides(config: &mut AwpConfig) {
    if let Ok(val) = std::env::var("AWP_CREDENTIALS_EDGERC") {
        config.credentials.edgerc = val;
    }
    if let Ok(val) = std::env::var("AWP_CREDENTIALS_SECTION") {
        config.credentials.section = val;
    }
    if let Ok(val) = std::env::var("AWP_CREDENTIALS_ACCOUNT_SWITCH_KEY") {
        config.credentials.account_switch_key = Some(val);
    }

    if let Some(timeout) = parsed_env("AWP_HTTP_TIMEOUT_SECONDS") {
        config.http.timeout_seconds = timeout;
    }

    if let Some(delay) = parsed_env("AWP_EXPORT_RULE_TREE_DELAY_SECONDS") {
        config.export.rule_tree_delay_seconds = delay;
    }
    if let Some(delay) = parsed_env("AWP_EXPORT_ENUMERATION_DELAY_MS") {
        config.export.enumeration_delay_ms = delay;
    }

    if let Ok(val) = std::env::var("AWP_LOGGING_LOG_LEVEL") {
        config.logging.log_level = val;
    }
    if let Some(enabled) = parsed_env("AWP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = enabled;
    }
    if let Ok(val) = std::env::var("AWP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

fn parsed_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Ignoring unparseable override");
            None
        }
    }
}

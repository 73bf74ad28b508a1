//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for awp using clap.

pub mod commands;
pub mod table;

use crate::config::{load_config_or_default, AwpConfig};
use crate::domain::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// awp - Akamai configuration export toolset
#[derive(Parser, Debug)]
#[command(name = "awp")]
#[command(version, about, long_about = None)]
#[command(author = "awp Contributors")]
pub struct Cli {
    /// Path to configuration file (default: ./awp.toml when present)
    #[arg(short, long, global = true, env = "AWP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "AWP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Path to .edgerc credentials file (default: ~/.edgerc)
    #[arg(long, global = true)]
    pub edgerc: Option<String>,

    /// Section in .edgerc file (default: default)
    #[arg(long, global = true)]
    pub section: Option<String>,

    /// Account switch key for multi-account access
    #[arg(short = 'k', long, global = true)]
    pub account_switch_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Loads configuration and applies the global flags on top of it
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file is invalid or a flag value
    /// fails validation.
    pub fn load_config(&self) -> Result<AwpConfig> {
        let mut config = load_config_or_default(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        config.validate().map_err(|e| {
            crate::domain::AwpError::Configuration(format!("Invalid command-line value: {e}"))
        })?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut AwpConfig) {
        if let Some(edgerc) = &self.edgerc {
            config.credentials.edgerc = edgerc.clone();
        }
        if let Some(section) = &self.section {
            config.credentials.section = section.clone();
        }
        if let Some(key) = &self.account_switch_key {
            config.credentials.account_switch_key = Some(key.clone());
        }
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = timeout;
        }
    }

    /// Effective log level: flag, then `--verbose`, then configuration
    pub fn effective_log_level(&self, config: &AwpConfig) -> String {
        match (&self.log_level, self.verbose) {
            (Some(level), _) => level.clone(),
            (None, true) => "debug".to_string(),
            (None, false) => config.logging.log_level.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for account switch keys
    SearchAsw(commands::search::SearchAswArgs),

    /// Search for groups by name
    SearchGroup(commands::search::SearchGroupArgs),

    /// List all properties with version info
    ListProperties(commands::properties::ListPropertiesArgs),

    /// Download property rules to JSON
    DownloadProperty(commands::properties::DownloadPropertyArgs),

    /// Download all property rules to JSON files
    DownloadProperties(commands::properties::DownloadPropertiesArgs),

    /// List all network lists
    #[command(name = "list-networklists")]
    ListNetworkLists(commands::lists::ListNetworkListsArgs),

    /// Download all network lists to CSV files
    #[command(name = "download-networklists")]
    DownloadNetworkLists(commands::lists::DownloadNetworkListsArgs),

    /// List all client lists
    #[command(name = "list-clientlists")]
    ListClientLists(commands::lists::ListClientListsArgs),

    /// Download all client lists to CSV files
    #[command(name = "download-clientlists")]
    DownloadClientLists(commands::lists::DownloadClientListsArgs),
}

// awp - Akamai configuration export toolset
// Copyright (c) 2025 awp Contributors
// Licensed under the MIT License

//! # awp - Akamai configuration export toolset
//!
//! awp exports Akamai configuration objects to local files: property rule
//! trees as JSON, network lists and client lists as CSV.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Enumerating** properties by walking groups → contracts → properties
//! - **Exporting** one artifact per item, sequentially, with a fixed pause
//!   between detail fetches to respect the remote rate limit
//! - **Signing** every request with EdgeGrid credentials from `.edgerc`
//! - **Reporting** per-item outcomes and a final `succeeded/total` tally
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Enumeration, export, progress reporting
//! - [`adapters`] - EdgeGrid-signed Akamai API client
//! - [`domain`] - Work items, identifiers, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use awp::adapters::akamai::{EdgeGridClient, EdgeRc, SignedApiClient};
//! use awp::config::AwpConfig;
//! use awp::core::enumerate::HierarchyEnumerator;
//! use awp::core::export::{BatchExporter, ExportOptions};
//! use awp::core::report::{ConsoleReporter, Reporter};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AwpConfig::default();
//!     let edgerc = EdgeRc::from_file(&config.credentials.edgerc, &config.credentials.section)?;
//!     let client: Arc<dyn SignedApiClient> =
//!         Arc::new(EdgeGridClient::new(&edgerc, &config.http, None)?);
//!     let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(true));
//!
//!     let items = HierarchyEnumerator::new(client.clone(), reporter.clone())
//!         .enumerate()
//!         .await?;
//!
//!     let options = ExportOptions::new(&config.export.properties_dir)
//!         .with_delay(config.export.rule_tree_delay());
//!     let summary = BatchExporter::new(client, reporter, options)
//!         .export(items)
//!         .await?;
//!
//!     println!("Downloaded {} of {} properties", summary.succeeded, summary.total);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Remote calls return [`domain::ApiError`] as a value; each call site decides
//! whether the failure skips one item or ends the run. Run-ending failures are
//! [`domain::AwpError`]:
//!
//! ```rust,no_run
//! use awp::domain::AwpError;
//!
//! fn example() -> Result<(), AwpError> {
//!     let config = awp::config::load_config("awp.toml")?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;

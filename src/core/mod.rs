//! Core business logic for awp.
//!
//! # Modules
//!
//! - [`enumerate`] - Builds the ordered work list from the remote hierarchy
//! - [`export`] - Rate-limited sequential export of a work list to files
//! - [`report`] - Progress events and reporters
//!
//! # Export Workflow
//!
//! 1. **Enumerate**: list groups, then properties per (group, contract) pair
//! 2. **Resolve**: pick each property's version, skip items that have none
//! 3. **Fetch**: one rule tree per item, pausing between calls
//! 4. **Write**: one uniquely named file per item
//! 5. **Report**: `succeeded/total` plus per-item results
//!
//! # Example
//!
//! ```rust,no_run
//! use awp::adapters::akamai::{EdgeGridClient, EdgeRc, SignedApiClient};
//! use awp::config::HttpConfig;
//! use awp::core::enumerate::HierarchyEnumerator;
//! use awp::core::export::{BatchExporter, ExportOptions};
//! use awp::core::report::{ConsoleReporter, Reporter};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let edgerc = EdgeRc::from_file("~/.edgerc", "default")?;
//! let client: Arc<dyn SignedApiClient> =
//!     Arc::new(EdgeGridClient::new(&edgerc, &HttpConfig::default(), None)?);
//! let reporter: Arc<dyn Reporter> = Arc::new(ConsoleReporter::new(false));
//!
//! let items = HierarchyEnumerator::new(client.clone(), reporter.clone())
//!     .enumerate()
//!     .await?;
//!
//! let summary = BatchExporter::new(client, reporter, ExportOptions::new("./properties"))
//!     .export(items)
//!     .await?;
//!
//! println!("Downloaded {} of {}", summary.succeeded, summary.total);
//! # Ok(())
//! # }
//! ```

pub mod enumerate;
pub mod export;
pub mod report;

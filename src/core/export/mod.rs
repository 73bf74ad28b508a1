//! Rate-limited batch export
//!
//! This module turns a work list into files on disk:
//! - [`exporter`] drives the sequential, rate-limited fetch loop
//! - [`version`] picks the version of versioned resources
//! - [`naming`] derives safe, unique file names
//! - [`writer`] serializes payloads to JSON or CSV
//! - [`summary`] tallies per-item results

pub mod exporter;
pub mod naming;
pub mod summary;
pub mod version;
pub mod writer;

pub use exporter::{detail_request, BatchExporter, ExportOptions, DEFAULT_RULE_TREE_DELAY};
pub use naming::{sanitize_filename, NamingScheme};
pub use summary::{BatchSummary, ExportResult, ExportStatus};
pub use version::{resolve_version, ResolvedVersion};
pub use writer::write_artifact;

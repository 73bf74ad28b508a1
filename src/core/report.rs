//! Progress reporting
//!
//! Enumeration and export announce what they do through a [`Reporter`] passed
//! in by the caller. The CLI uses [`ConsoleReporter`]; tests record events.

use crate::domain::{ResourceKind, WorkItem};
use std::path::PathBuf;
use std::time::Duration;

/// Something worth telling the operator about
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Root collection fetch is starting
    FetchingRoot { kind: ResourceKind },

    /// Root collection fetch returned `count` parents
    RootFetched { kind: ResourceKind, count: usize },

    /// Child listing for one (group, contract) pair is starting
    FetchingChildren {
        group_id: String,
        group_name: String,
        contract_id: String,
    },

    /// Child listing failed; the pair is skipped
    ChildFetchFailed {
        group_id: String,
        contract_id: String,
        error: String,
    },

    /// A listed entry could not become a work item
    EntryDropped { kind: ResourceKind, reason: String },

    /// Enumeration produced `count` work items
    Enumerated { kind: ResourceKind, count: usize },

    /// Output directory in use
    OutputDirectory { path: PathBuf },

    /// Waiting before the next detail fetch
    Waiting { delay: Duration },

    /// Detail fetch for an item is starting
    Fetching { item: WorkItem, version: Option<u64> },

    /// Artifact written
    Exported {
        item: WorkItem,
        version: Option<u64>,
        path: PathBuf,
    },

    /// Item skipped because its data is incomplete
    Skipped { item: WorkItem, reason: String },

    /// Fetch or write failed for an item
    Failed { item: WorkItem, error: String },

    /// The server answered 429 despite the inter-request delay
    RateLimited { delay: Duration },

    /// Shutdown requested; `remaining` items were not processed
    Interrupted { remaining: usize },

    /// Batch completed
    Finished {
        kind: ResourceKind,
        succeeded: usize,
        total: usize,
    },
}

/// Receiver of progress events
pub trait Reporter: Send + Sync {
    /// Handles one event
    fn report(&self, event: &ProgressEvent);
}

/// Reports progress on stderr and through `tracing`
///
/// Item outcomes are always printed; step-by-step progress only when verbose.
/// Warnings go through `tracing` so they honour the configured level.
#[derive(Debug, Clone, Default)]
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn progress(&self, message: std::fmt::Arguments<'_>) {
        if self.verbose {
            eprintln!("{message}");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::FetchingRoot { kind } => {
                tracing::debug!(kind = %kind, "Fetching root collection");
                self.progress(format_args!("Fetching {}s...", root_label(*kind)));
            }
            ProgressEvent::RootFetched { kind, count } => {
                tracing::debug!(kind = %kind, count, "Root collection fetched");
                self.progress(format_args!("Found {count} {}s", root_label(*kind)));
            }
            ProgressEvent::FetchingChildren {
                group_id,
                group_name,
                contract_id,
            } => {
                tracing::debug!(%group_id, %contract_id, "Fetching properties");
                self.progress(format_args!("Fetching: {group_name} ({group_id})"));
            }
            ProgressEvent::ChildFetchFailed {
                group_id,
                contract_id,
                error,
            } => {
                tracing::warn!(%group_id, %contract_id, %error, "Skipping group/contract pair");
            }
            ProgressEvent::EntryDropped { kind, reason } => {
                tracing::warn!(kind = %kind, %reason, "Dropping listed entry");
            }
            ProgressEvent::Enumerated { kind, count } => {
                tracing::info!(kind = %kind, count, "Enumeration complete");
                if *count > 0 {
                    eprintln!("Found {count} {}s", kind.label());
                }
            }
            ProgressEvent::OutputDirectory { path } => {
                tracing::debug!(path = %path.display(), "Output directory");
                self.progress(format_args!("Output directory: {}", path.display()));
            }
            ProgressEvent::Waiting { delay } => {
                tracing::debug!(delay_ms = delay.as_millis() as u64, "Waiting before next fetch");
                self.progress(format_args!("Waiting {:.1}s (rate limit)...", delay.as_secs_f64()));
            }
            ProgressEvent::Fetching { item, version } => {
                tracing::debug!(id = %item.id, version, "Fetching detail");
                self.progress(format_args!(
                    "Downloading {}{}...",
                    item.display_name,
                    version_suffix(*version)
                ));
            }
            ProgressEvent::Exported {
                item,
                version,
                path,
            } => {
                tracing::info!(id = %item.id, version, path = %path.display(), "Exported");
                eprintln!("✓ {}{}", item.display_name, version_suffix(*version));
            }
            ProgressEvent::Skipped { item, reason } => {
                tracing::info!(id = %item.id, %reason, "Skipped");
                eprintln!("- Skipped {}: {reason}", item.display_name);
            }
            ProgressEvent::Failed { item, error } => {
                tracing::info!(id = %item.id, %error, "Export failed");
                eprintln!("✗ Failed to export {}: {error}", item.display_name);
            }
            ProgressEvent::RateLimited { delay } => {
                tracing::warn!(
                    delay_ms = delay.as_millis() as u64,
                    "Rate limit exceeded; raise --delay"
                );
            }
            ProgressEvent::Interrupted { remaining } => {
                tracing::warn!(remaining, "Export interrupted");
                eprintln!("Interrupted, {remaining} items not processed");
            }
            ProgressEvent::Finished {
                kind,
                succeeded,
                total,
            } => {
                tracing::info!(kind = %kind, succeeded, total, "Batch finished");
                eprintln!("\nDownloaded {succeeded} of {total} {}s", kind.label());
            }
        }
    }
}

fn root_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Property => "group",
        other => other.label(),
    }
}

fn version_suffix(version: Option<u64>) -> String {
    version.map(|v| format!(" v{v}")).unwrap_or_default()
}

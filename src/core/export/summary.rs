//! Export results and batch summary
//!
//! Every item handed to the exporter yields exactly one [`ExportResult`], kept
//! in processing order.

use crate::domain::WorkItem;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of exporting one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    /// Artifact written to `file_path`
    Success { file_path: PathBuf },

    /// Item lacks data needed for its detail fetch; never fetched
    SkippedIncomplete { reason: String },

    /// Fetch or write failed
    Failed { error_detail: String },
}

/// Result for one work item
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult {
    /// The item this result is for
    pub item: WorkItem,

    /// Version exported or attempted, for versioned kinds
    pub version: Option<u64>,

    /// Outcome
    pub status: ExportStatus,
}

impl ExportResult {
    pub fn success(item: WorkItem, version: Option<u64>, file_path: PathBuf) -> Self {
        Self {
            item,
            version,
            status: ExportStatus::Success { file_path },
        }
    }

    pub fn skipped(item: WorkItem, reason: impl Into<String>) -> Self {
        Self {
            item,
            version: None,
            status: ExportStatus::SkippedIncomplete {
                reason: reason.into(),
            },
        }
    }

    pub fn failed(item: WorkItem, version: Option<u64>, error_detail: impl Into<String>) -> Self {
        Self {
            item,
            version,
            status: ExportStatus::Failed {
                error_detail: error_detail.into(),
            },
        }
    }

    /// Whether the artifact was written
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExportStatus::Success { .. })
    }

    /// Path of the written artifact
    pub fn file_path(&self) -> Option<&PathBuf> {
        match &self.status {
            ExportStatus::Success { file_path } => Some(file_path),
            _ => None,
        }
    }

    /// Error detail of a failed export
    pub fn error_detail(&self) -> Option<&str> {
        match &self.status {
            ExportStatus::Failed { error_detail } => Some(error_detail),
            _ => None,
        }
    }
}

/// Summary of a batch export
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// Number of work items handed to the exporter
    pub total: usize,

    /// Number of artifacts written
    pub succeeded: usize,

    /// Number of items skipped as incomplete
    pub skipped: usize,

    /// Number of failed items
    pub failed: usize,

    /// Per-item results in processing order
    pub results: Vec<ExportResult>,

    /// Number of detail fetches issued
    pub fetches: usize,

    /// Whether a shutdown request stopped the batch early
    pub interrupted: bool,

    /// Wall-clock duration of the batch
    pub duration: Duration,
}

impl BatchSummary {
    /// Creates an empty summary for `total` items
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            skipped: 0,
            failed: 0,
            results: Vec::with_capacity(total),
            fetches: 0,
            interrupted: false,
            duration: Duration::ZERO,
        }
    }

    /// Appends a result and updates the counters
    pub fn record(&mut self, result: ExportResult) {
        match result.status {
            ExportStatus::Success { .. } => self.succeeded += 1,
            ExportStatus::SkippedIncomplete { .. } => self.skipped += 1,
            ExportStatus::Failed { .. } => self.failed += 1,
        }
        self.results.push(result);
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether every item was exported and the batch ran to completion
    pub fn is_successful(&self) -> bool {
        !self.interrupted && self.succeeded == self.total
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.succeeded as f64 / self.total as f64) * 100.0
    }

    /// Failed results in processing order
    pub fn failures(&self) -> impl Iterator<Item = &ExportResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.status, ExportStatus::Failed { .. }))
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_batch_complete!(self.succeeded, self.total, self.duration);
        tracing::info!(
            skipped = self.skipped,
            failed = self.failed,
            fetches = self.fetches,
            interrupted = self.interrupted,
            success_rate = %format!("{:.2}%", self.success_rate()),
            "Batch summary"
        );

        for result in self.failures() {
            tracing::warn!(
                id = %result.item.id,
                name = %result.item.display_name,
                error = result.error_detail().unwrap_or_default(),
                "Export error"
            );
        }
    }
}

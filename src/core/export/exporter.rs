//! Rate-limited sequential batch exporter
//!
//! Items are processed one at a time in the order given. Before every detail
//! fetch except the first the exporter waits for the configured delay; items
//! that are skipped or arrive with their payload do not fetch and are not
//! delayed. A failed fetch or write is recorded and the batch moves on.

use super::naming::NamingScheme;
use super::summary::{BatchSummary, ExportResult};
use super::version::{resolve_version, ResolvedVersion};
use super::writer::write_artifact;
use crate::adapters::akamai::{QueryParams, SignedApiClient};
use crate::core::report::{ProgressEvent, Reporter};
use crate::domain::{AwpError, ResourceKind, Result, WorkItem};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Rule tree endpoint allows 3 calls per minute
pub const DEFAULT_RULE_TREE_DELAY: Duration = Duration::from_secs(21);

/// Exporter settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Directory artifacts are written to; created if missing
    pub output_dir: PathBuf,

    /// Pause between consecutive detail fetches
    pub inter_request_delay: Duration,

    /// File naming scheme
    pub naming: NamingScheme,

    /// Explicit output file, overriding the naming scheme
    pub output_file: Option<PathBuf>,
}

impl ExportOptions {
    /// Batch naming into `output_dir` with the rule tree delay
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            inter_request_delay: DEFAULT_RULE_TREE_DELAY,
            naming: NamingScheme::Batch,
            output_file: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_request_delay = delay;
        self
    }

    pub fn with_naming(mut self, naming: NamingScheme) -> Self {
        self.naming = naming;
        self
    }

    /// Writes the (single) artifact to `path` instead of a generated name
    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}

/// Sequential exporter bound to one API client
pub struct BatchExporter {
    client: Arc<dyn SignedApiClient>,
    reporter: Arc<dyn Reporter>,
    options: ExportOptions,
    shutdown: Option<watch::Receiver<bool>>,
}

impl BatchExporter {
    pub fn new(
        client: Arc<dyn SignedApiClient>,
        reporter: Arc<dyn Reporter>,
        options: ExportOptions,
    ) -> Self {
        Self {
            client,
            reporter,
            options,
            shutdown: None,
        }
    }

    /// Stops the batch between items once the flag turns `true`
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Exports `items` and returns the batch summary
    ///
    /// # Errors
    ///
    /// Only failing to create the output location aborts the batch; every
    /// per-item failure is recorded in the summary instead.
    pub async fn export(&self, items: Vec<WorkItem>) -> Result<BatchSummary> {
        let start = Instant::now();
        let total = items.len();
        let kind = items.first().map_or(ResourceKind::Property, |i| i.kind);

        self.prepare_output()?;

        let mut summary = BatchSummary::new(total);
        for (index, item) in items.into_iter().enumerate() {
            if self.shutdown_requested() {
                self.interrupt(&mut summary, total - index);
                break;
            }

            let version = match resolve_version(&item) {
                ResolvedVersion::Unversioned => None,
                ResolvedVersion::Version(v) => Some(v),
                ResolvedVersion::Unresolvable => {
                    self.skip(&mut summary, item, "no production or latest version".to_string());
                    continue;
                }
            };

            let payload = match item.payload.clone() {
                Some(payload) => payload,
                None => {
                    let missing = item.parent_context.missing_for(item.kind);
                    if !missing.is_empty() {
                        let reason = format!("missing {}", missing.join(", "));
                        self.skip(&mut summary, item, reason);
                        continue;
                    }

                    if summary.fetches > 0 && !self.pause().await {
                        self.interrupt(&mut summary, total - index);
                        break;
                    }

                    summary.fetches += 1;
                    self.reporter.report(&ProgressEvent::Fetching {
                        item: item.clone(),
                        version,
                    });

                    let (path, params) = detail_request(&item, version);
                    match self.client.get(&path, &params).await {
                        Ok(payload) => payload,
                        Err(e) => {
                            if e.is_rate_limited() {
                                self.reporter.report(&ProgressEvent::RateLimited {
                                    delay: self.options.inter_request_delay,
                                });
                            }
                            self.fail(&mut summary, item, version, e.to_string());
                            continue;
                        }
                    }
                }
            };

            let file_path = self.target_path(&item, version);
            match write_artifact(item.kind, &file_path, &payload) {
                Ok(()) => {
                    self.reporter.report(&ProgressEvent::Exported {
                        item: item.clone(),
                        version,
                        path: file_path.clone(),
                    });
                    summary.record(ExportResult::success(item, version, file_path));
                }
                Err(e) => self.fail(&mut summary, item, version, e.to_string()),
            }
        }

        let summary = summary.with_duration(start.elapsed());
        self.reporter.report(&ProgressEvent::Finished {
            kind,
            succeeded: summary.succeeded,
            total: summary.total,
        });
        summary.log_summary();

        Ok(summary)
    }

    fn prepare_output(&self) -> Result<()> {
        let dir: &Path = match &self.options.output_file {
            Some(file) => file.parent().unwrap_or_else(|| Path::new("")),
            None => &self.options.output_dir,
        };
        if dir.as_os_str().is_empty() {
            return Ok(());
        }

        std::fs::create_dir_all(dir).map_err(|e| {
            AwpError::Export(format!(
                "Failed to create output directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        self.reporter.report(&ProgressEvent::OutputDirectory {
            path: dir.to_path_buf(),
        });
        Ok(())
    }

    fn target_path(&self, item: &WorkItem, version: Option<u64>) -> PathBuf {
        match &self.options.output_file {
            Some(file) => file.clone(),
            None => self
                .options
                .output_dir
                .join(self.options.naming.file_name(item, version)),
        }
    }

    fn skip(&self, summary: &mut BatchSummary, item: WorkItem, reason: String) {
        self.reporter.report(&ProgressEvent::Skipped {
            item: item.clone(),
            reason: reason.clone(),
        });
        summary.record(ExportResult::skipped(item, reason));
    }

    fn fail(&self, summary: &mut BatchSummary, item: WorkItem, version: Option<u64>, error: String) {
        self.reporter.report(&ProgressEvent::Failed {
            item: item.clone(),
            error: error.clone(),
        });
        summary.record(ExportResult::failed(item, version, error));
    }

    fn interrupt(&self, summary: &mut BatchSummary, remaining: usize) {
        summary.interrupted = true;
        self.reporter
            .report(&ProgressEvent::Interrupted { remaining });
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Waits out the inter-request delay; `false` if shutdown was requested
    async fn pause(&self) -> bool {
        let delay = self.options.inter_request_delay;
        if delay.is_zero() {
            return !self.shutdown_requested();
        }

        self.reporter.report(&ProgressEvent::Waiting { delay });
        match &self.shutdown {
            None => {
                tokio::time::sleep(delay).await;
                true
            }
            Some(rx) => {
                let mut rx = rx.clone();
                tokio::select! {
                    _ = tokio::time::sleep(delay) => true,
                    _ = wait_for_shutdown(&mut rx) => false,
                }
            }
        }
    }
}

async fn wait_for_shutdown(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            // Sender gone: shutdown can no longer be requested
            std::future::pending::<()>().await;
        }
    }
}

/// Endpoint and query for an item's detail payload
pub fn detail_request(item: &WorkItem, version: Option<u64>) -> (String, QueryParams) {
    match item.kind {
        ResourceKind::Property => (
            format!(
                "/papi/v1/properties/{}/versions/{}/rules",
                item.id,
                version.unwrap_or_default()
            ),
            item.parent_context.query_params(),
        ),
        ResourceKind::NetworkList => (
            format!("/network-list/v2/network-lists/{}", item.id),
            vec![("includeElements".to_string(), "true".to_string())],
        ),
        ResourceKind::ClientList => (
            format!("/client-list/v1/lists/{}", item.id),
            vec![("includeItems".to_string(), "true".to_string())],
        ),
    }
}

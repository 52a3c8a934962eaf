//! The orchestrator: per-file decision sequence and the per-run loop.
//!
//! Each candidate file moves through a fixed sequence: fingerprint,
//! dedup check, filename parse, directory lookup, delivery with bounded
//! retries, archive copy, dedup commit. Every early exit is a named
//! terminal outcome recorded via counters and logs; only unreadable
//! sources, archive failures, and cache failures abort a file as errors,
//! and even those never abort the run.
//!
//! Ordering of the success path matters: the dedup entry is written only
//! after the archive copy succeeds, so a crash or storage failure in
//! between leaves the content eligible for redelivery on a future run.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::archive::ArchiveStore;
use crate::cache::{DedupCache, dedup_key};
use crate::checksum::sha256_file;
use crate::config::Config;
use crate::delivery::{DeliveryClient, MockHrClient, UploadOutcome};
use crate::directory::EmployeeDirectory;
use crate::emit;
use crate::error::{DeliveryError, FileError, PipelineError};
use crate::filename::parse_meta;
use crate::listing::list_payslips;
use crate::metrics::MetricsSink;
use crate::metrics::events::{
    DeliveryExhausted, DuplicateSkipped, EmployeeNotFound, FileAborted, FileDelivered, ParseFailed,
};
use crate::notify::{LogNotifier, NotificationSink};
use crate::retry::RetryPolicy;

/// Terminal outcome for one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Delivered, archived, and recorded in the dedup cache.
    Delivered { archive_path: PathBuf },
    /// Content fingerprint already present in the dedup cache.
    SkippedDuplicate,
    /// Filename did not match the payslip pattern.
    ParseFailed,
    /// Employee id missing from the directory.
    EmployeeNotFound,
    /// Delivery failed after exhausting all retry attempts.
    DeliveryFailed,
}

impl FileOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileOutcome::Delivered { .. } => "delivered",
            FileOutcome::SkippedDuplicate => "skipped_duplicate",
            FileOutcome::ParseFailed => "parse_failed",
            FileOutcome::EmployeeNotFound => "employee_not_found",
            FileOutcome::DeliveryFailed => "delivery_failed",
        }
    }
}

/// Composes the pipeline components into the per-file sequence.
pub struct Orchestrator {
    directory: EmployeeDirectory,
    cache: DedupCache,
    archive: ArchiveStore,
    client: Arc<dyn DeliveryClient>,
    notifier: Arc<dyn NotificationSink>,
    metrics: Arc<MetricsSink>,
    retry: RetryPolicy,
}

impl Orchestrator {
    /// Create an orchestrator from explicit components.
    pub fn new(
        directory: EmployeeDirectory,
        cache: DedupCache,
        archive: ArchiveStore,
        client: Arc<dyn DeliveryClient>,
        notifier: Arc<dyn NotificationSink>,
        metrics: Arc<MetricsSink>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            directory,
            cache,
            archive,
            client,
            notifier,
            metrics,
            retry,
        }
    }

    /// Create an orchestrator wired with the default collaborators:
    /// the mock HR client, the log notifier, and a fresh metrics sink.
    pub async fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let directory = EmployeeDirectory::load(&config.employees_file).await?;
        let cache = DedupCache::connect(config.redis_url.as_deref()).await;
        let metrics = Arc::new(MetricsSink::new());

        Ok(Self::new(
            directory,
            cache,
            ArchiveStore::new(&config.archive_dir),
            Arc::new(MockHrClient::new(config.fail_rate, metrics.clone())),
            Arc::new(LogNotifier),
            metrics,
            RetryPolicy::new(config.max_attempts, config.base_delay),
        ))
    }

    /// The metrics sink this orchestrator records into.
    pub fn metrics(&self) -> &Arc<MetricsSink> {
        &self.metrics
    }

    /// The dedup cache this orchestrator consults.
    pub fn cache(&self) -> &DedupCache {
        &self.cache
    }

    /// Process one candidate file through the full decision sequence.
    ///
    /// Terminal outcomes are `Ok`; `Err` means the file was aborted by
    /// an I/O, archive, or cache failure and no dedup entry was written.
    pub async fn process_file(&self, path: &Path) -> Result<FileOutcome, FileError> {
        let file = path.display().to_string();
        info!(%file, "Processing start");

        // Dedup is purely content-based: hash before looking at the name.
        let checksum = sha256_file(path).await?;
        let key = dedup_key(&checksum);

        if self.cache.get(&key).await?.is_some() {
            info!(%file, %checksum, "Duplicate content, skipping");
            emit!(&self.metrics, DuplicateSkipped { checksum });
            return Ok(FileOutcome::SkippedDuplicate);
        }

        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        let Some(meta) = parse_meta(name) else {
            error!(%file, "Filename parse failed");
            emit!(&self.metrics, ParseFailed { file });
            return Ok(FileOutcome::ParseFailed);
        };

        let Some(employee) = self.directory.find(&meta.employee_id) else {
            error!(%file, employee_id = %meta.employee_id, "Employee not found");
            emit!(
                &self.metrics,
                EmployeeNotFound {
                    employee_id: meta.employee_id,
                }
            );
            return Ok(FileOutcome::EmployeeNotFound);
        };

        // Only an explicit acceptance is success; any other response is
        // a retryable failure.
        let client = self.client.as_ref();
        let external_id = employee.external_id.as_str();
        let upload = self
            .retry
            .run(move || async move {
                match client.upload(external_id, path).await {
                    UploadOutcome::Accepted { receipt_id } => Ok(receipt_id),
                    UploadOutcome::Rejected { message } => Err(DeliveryError::Rejected { message }),
                }
            })
            .await;

        let receipt_id = match upload {
            Ok(receipt_id) => receipt_id,
            Err(e) => {
                error!(%file, error = %e, "Upload failed after retries");
                emit!(&self.metrics, DeliveryExhausted { file: file.clone() });
                self.notifier.notify(
                    &format!("Upload failed for {file}"),
                    &[("error", &e.to_string())],
                );
                return Ok(FileOutcome::DeliveryFailed);
            }
        };

        // Archive before committing the dedup entry: a failure here
        // leaves the content eligible for a retried future run.
        let archive_path = self.archive.archive(path).await?;
        self.cache.set(&key, "1", None).await?;

        info!(
            %file,
            %receipt_id,
            archive = %archive_path.display(),
            "Processing done"
        );
        emit!(&self.metrics, FileDelivered { file: file.clone() });
        self.notifier.notify(
            &format!("Uploaded {name}"),
            &[
                ("employee", &employee.external_id),
                ("period", &meta.period),
            ],
        );

        Ok(FileOutcome::Delivered { archive_path })
    }

    /// Process every candidate file in `folder`, in lexicographic order.
    ///
    /// Files are handled one at a time, so a later file's dedup check
    /// observes entries written earlier in the same run. Per-file errors
    /// are logged and counted; only setup failures propagate.
    pub async fn run_folder(&self, folder: &Path) -> Result<(), PipelineError> {
        let files = list_payslips(folder).await?;

        if files.is_empty() {
            info!(folder = %folder.display(), "No payslip files found");
        }

        for path in &files {
            match self.process_file(path).await {
                Ok(outcome) => {
                    info!(file = %path.display(), outcome = outcome.as_str(), "File finished");
                }
                Err(e) => {
                    error!(file = %path.display(), error = %e, "File aborted");
                    emit!(
                        &self.metrics,
                        FileAborted {
                            file: path.display().to_string(),
                        }
                    );
                }
            }
        }

        let snapshot = self.metrics.snapshot();
        info!(metrics = ?snapshot, "Run complete");
        Ok(())
    }
}

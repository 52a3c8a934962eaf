//! payrun: Batch payslip ingestion and delivery pipeline.
//!
//! This library provides components for ingesting a directory of payslip
//! PDFs, deduplicating them by content hash, delivering each unique file
//! to a downstream HR endpoint with bounded retries, and archiving
//! successfully delivered files:
//!
//! - Content fingerprinting (streaming SHA-256)
//! - Filename metadata extraction (`<employee>_<YYYYMM>.pdf`)
//! - Dedup cache with interchangeable memory/redis backends
//! - Exponential-backoff retry policy
//! - The orchestrator tying the per-file decision sequence together
//!
//! # Example
//!
//! ```ignore
//! use payrun::{Config, Orchestrator, error::PipelineError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), PipelineError> {
//!     let config = Config::from_env()?;
//!     let orchestrator = Orchestrator::from_config(&config).await?;
//!     orchestrator.run_folder("data/payslips".as_ref()).await?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cache;
pub mod checksum;
pub mod config;
pub mod delivery;
pub mod directory;
pub mod error;
pub mod filename;
pub mod listing;
pub mod metrics;
pub mod notify;
pub mod pipeline;
pub mod retry;
pub mod tracing;

// Re-export main types
pub use archive::ArchiveStore;
pub use cache::DedupCache;
pub use config::Config;
pub use delivery::{DeliveryClient, MockHrClient, UploadOutcome};
pub use directory::EmployeeDirectory;
pub use error::PipelineError;
pub use metrics::MetricsSink;
pub use notify::{LogNotifier, NotificationSink};
pub use pipeline::{FileOutcome, Orchestrator};
pub use retry::RetryPolicy;
pub use tracing::init_tracing;

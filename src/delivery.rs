//! Delivery collaborator boundary.
//!
//! The downstream HR endpoint accepts `(external_id, file)` and reports
//! a tagged outcome. Only an explicit [`UploadOutcome::Accepted`] counts
//! as success; anything else is translated at the call site into the
//! retry-triggering [`crate::error::DeliveryError`].

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::emit;
use crate::metrics::MetricsSink;
use crate::metrics::events::UploadAttempt;

/// Outcome of a single upload attempt, tagged at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The endpoint confirmed receipt.
    Accepted {
        /// Endpoint-assigned identifier, logged but never inspected.
        receipt_id: String,
    },
    /// The endpoint reported a failure.
    Rejected { message: String },
}

/// Downstream delivery endpoint.
#[async_trait]
pub trait DeliveryClient: Send + Sync {
    /// Attempt to upload one file for the given delivery target.
    async fn upload(&self, external_id: &str, file: &Path) -> UploadOutcome;
}

/// Stand-in for the real HR endpoint: fails randomly at a configured
/// rate. Demo and test use only.
pub struct MockHrClient {
    fail_rate: f64,
    metrics: Arc<MetricsSink>,
}

impl MockHrClient {
    pub fn new(fail_rate: f64, metrics: Arc<MetricsSink>) -> Self {
        Self { fail_rate, metrics }
    }
}

#[async_trait]
impl DeliveryClient for MockHrClient {
    async fn upload(&self, external_id: &str, file: &Path) -> UploadOutcome {
        if rand::random::<f64>() < self.fail_rate {
            error!(external_id, file = %file.display(), "Upload attempt failed");
            emit!(&self.metrics, UploadAttempt { ok: false });
            return UploadOutcome::Rejected {
                message: "Simulated failure".to_string(),
            };
        }

        info!(external_id, file = %file.display(), "Upload accepted");
        emit!(&self.metrics, UploadAttempt { ok: true });
        UploadOutcome::Accepted {
            receipt_id: external_id.to_string(),
        }
    }
}

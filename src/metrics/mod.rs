//! Metrics and observability infrastructure.
//!
//! The pipeline counts terminal outcomes in a [`MetricsSink`]: an
//! instance-scoped counter map passed into the orchestrator at
//! construction, standing in for a real metrics backend. Keeping the
//! sink instance-scoped (rather than a process-wide singleton) lets
//! multiple orchestrators coexist in tests without sharing state.
//!
//! `events` carries the internal-event types; each measurable occurrence
//! is a struct that emits a trace line plus a counter increment.

pub mod events;

use std::collections::BTreeMap;
use std::sync::Mutex;

/// Counter names recorded by the pipeline. Terminal-outcome counters are
/// incremented exactly once per file; the per-attempt counters below are
/// internal to the delivery path and tick on every attempt.
pub mod counters {
    /// File skipped because its content was already processed.
    pub const DEDUP_SKIPPED: &str = "dedup_skipped_total";
    /// Filename did not match the payslip pattern.
    pub const PARSE_ERROR: &str = "parse_error_total";
    /// Employee id not present in the directory.
    pub const EMPLOYEE_NOT_FOUND: &str = "employee_not_found_total";
    /// Delivery failed after exhausting all retry attempts.
    pub const UPLOAD_FINAL_FAIL: &str = "upload_final_fail_total";
    /// File delivered, archived, and recorded.
    pub const UPLOAD_SUCCESS: &str = "upload_success_total";
    /// File aborted by a fatal-for-this-file error.
    pub const FILE_ERROR: &str = "file_error_total";
    /// Single delivery attempt succeeded.
    pub const UPLOAD_ATTEMPT_OK: &str = "upload_attempt_ok_total";
    /// Single delivery attempt failed.
    pub const UPLOAD_ATTEMPT_FAIL: &str = "upload_attempt_fail_total";
}

/// Instance-scoped counter map.
///
/// Counters are monotonically increasing and reset only by an explicit
/// [`MetricsSink::reset`]. Increments are atomic across tasks.
#[derive(Debug, Default)]
pub struct MetricsSink {
    counters: Mutex<BTreeMap<String, u64>>,
}

impl MetricsSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a counter by 1.
    pub fn increment(&self, name: &str) {
        self.increment_by(name, 1);
    }

    /// Increment a counter by `n`.
    pub fn increment_by(&self, name: &str, n: u64) {
        let mut counters = self.counters.lock().expect("metrics lock poisoned");
        *counters.entry(name.to_string()).or_insert(0) += n;
    }

    /// Current value of a single counter (0 when never incremented).
    pub fn get(&self, name: &str) -> u64 {
        self.counters
            .lock()
            .expect("metrics lock poisoned")
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    /// Snapshot of every counter.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters.lock().expect("metrics lock poisoned").clone()
    }

    /// Clear every counter.
    pub fn reset(&self) {
        self.counters.lock().expect("metrics lock poisoned").clear();
    }
}

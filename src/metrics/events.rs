//! Internal events for pipeline metrics emission.
//!
//! Each event struct represents a measurable occurrence in the pipeline.
//! Events implement the `InternalEvent` trait, which writes a trace line
//! and increments the corresponding counter on the sink it is given.

use tracing::trace;

use super::{MetricsSink, counters};

/// Trait for internal events that can be emitted as metrics.
pub trait InternalEvent {
    /// Emit this event into the given sink.
    fn emit(self, sink: &MetricsSink);
}

/// Macro for emitting metric events.
///
/// # Example
///
/// ```ignore
/// use payrun::emit;
/// use payrun::metrics::events::DuplicateSkipped;
///
/// emit!(sink, DuplicateSkipped { checksum: digest });
/// ```
#[macro_export]
macro_rules! emit {
    ($sink:expr, $event:expr) => {
        $crate::metrics::events::InternalEvent::emit($event, $sink)
    };
}

/// Event emitted when a file is skipped as a content duplicate.
pub struct DuplicateSkipped {
    pub checksum: String,
}

impl InternalEvent for DuplicateSkipped {
    fn emit(self, sink: &MetricsSink) {
        trace!(checksum = %self.checksum, "Duplicate skipped");
        sink.increment(counters::DEDUP_SKIPPED);
    }
}

/// Event emitted when a filename fails to parse.
pub struct ParseFailed {
    pub file: String,
}

impl InternalEvent for ParseFailed {
    fn emit(self, sink: &MetricsSink) {
        trace!(file = %self.file, "Filename parse failed");
        sink.increment(counters::PARSE_ERROR);
    }
}

/// Event emitted when an employee id is missing from the directory.
pub struct EmployeeNotFound {
    pub employee_id: String,
}

impl InternalEvent for EmployeeNotFound {
    fn emit(self, sink: &MetricsSink) {
        trace!(employee_id = %self.employee_id, "Employee not found");
        sink.increment(counters::EMPLOYEE_NOT_FOUND);
    }
}

/// Event emitted when delivery fails after exhausting retries.
pub struct DeliveryExhausted {
    pub file: String,
}

impl InternalEvent for DeliveryExhausted {
    fn emit(self, sink: &MetricsSink) {
        trace!(file = %self.file, "Delivery retries exhausted");
        sink.increment(counters::UPLOAD_FINAL_FAIL);
    }
}

/// Event emitted when a file completes the full sequence.
pub struct FileDelivered {
    pub file: String,
}

impl InternalEvent for FileDelivered {
    fn emit(self, sink: &MetricsSink) {
        trace!(file = %self.file, "File delivered");
        sink.increment(counters::UPLOAD_SUCCESS);
    }
}

/// Event emitted when a file aborts on a fatal-for-this-file error.
pub struct FileAborted {
    pub file: String,
}

impl InternalEvent for FileAborted {
    fn emit(self, sink: &MetricsSink) {
        trace!(file = %self.file, "File aborted");
        sink.increment(counters::FILE_ERROR);
    }
}

/// Event emitted for each delivery attempt outcome.
pub struct UploadAttempt {
    pub ok: bool,
}

impl InternalEvent for UploadAttempt {
    fn emit(self, sink: &MetricsSink) {
        trace!(ok = self.ok, "Upload attempt");
        if self.ok {
            sink.increment(counters::UPLOAD_ATTEMPT_OK);
        } else {
            sink.increment(counters::UPLOAD_ATTEMPT_FAIL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_increment_expected_counters() {
        let sink = MetricsSink::new();

        emit!(
            &sink,
            DuplicateSkipped {
                checksum: "abc".into()
            }
        );
        emit!(&sink, ParseFailed { file: "x".into() });
        emit!(
            &sink,
            EmployeeNotFound {
                employee_id: "EMP404".into()
            }
        );
        emit!(&sink, DeliveryExhausted { file: "x".into() });
        emit!(&sink, FileDelivered { file: "x".into() });
        emit!(&sink, UploadAttempt { ok: true });
        emit!(&sink, UploadAttempt { ok: false });

        assert_eq!(sink.get(counters::DEDUP_SKIPPED), 1);
        assert_eq!(sink.get(counters::PARSE_ERROR), 1);
        assert_eq!(sink.get(counters::EMPLOYEE_NOT_FOUND), 1);
        assert_eq!(sink.get(counters::UPLOAD_FINAL_FAIL), 1);
        assert_eq!(sink.get(counters::UPLOAD_SUCCESS), 1);
        assert_eq!(sink.get(counters::UPLOAD_ATTEMPT_OK), 1);
        assert_eq!(sink.get(counters::UPLOAD_ATTEMPT_FAIL), 1);
    }
}

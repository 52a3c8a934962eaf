//! Notification sink.
//!
//! Fire-and-forget alerts for delivery outcomes. The sink must never
//! block or fail the pipeline; the default implementation reduces
//! Slack/email delivery to structured log lines.

use tracing::info;

/// Receives human-facing event notifications.
pub trait NotificationSink: Send + Sync {
    /// Send a notification with structured context. Must not block.
    fn notify(&self, text: &str, context: &[(&str, &str)]);
}

/// Logs notifications instead of sending them.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, text: &str, context: &[(&str, &str)]) {
        let context = context
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        info!(%context, "Notify: {text}");
    }
}

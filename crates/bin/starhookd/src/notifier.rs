//! [`Notifier`] that turns success toasts into log lines.

use starhook_app::ports::Notifier;

/// Logs every success notification at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn show_success(&self, message: &str) {
        tracing::info!(target: "starhookd::toast", toast = message, "success");
    }
}

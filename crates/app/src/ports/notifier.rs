//! Notification port — user-visible toasts.

use std::sync::Arc;

/// Fire-and-forget notification sink.
///
/// No failure is surfaced to the caller.
pub trait Notifier: Send + Sync {
    fn show_success(&self, message: &str);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn show_success(&self, message: &str) {
        (**self).show_success(message);
    }
}

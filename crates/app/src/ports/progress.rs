//! Progress port — status updates while a sequence item runs.

/// Receives status text while a trigger executes.
pub trait ProgressSink {
    fn report(&self, status: &str);
}

/// Discards all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn report(&self, _status: &str) {}
}

//! Cancellation signals handed to executing triggers.

use tokio::sync::watch;

/// Owner side: raises the signal.
#[derive(Debug)]
pub struct CancellationSource {
    sender: watch::Sender<bool>,
}

impl Default for CancellationSource {
    fn default() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal observing this source.
    #[must_use]
    pub fn signal(&self) -> CancellationSignal {
        CancellationSignal {
            receiver: self.sender.subscribe(),
        }
    }

    /// Raise the signal. Stays raised.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}

/// Observer side: checked by triggers before doing their work.
#[derive(Debug, Clone)]
pub struct CancellationSignal {
    receiver: watch::Receiver<bool>,
}

impl CancellationSignal {
    /// A signal that is never raised.
    #[must_use]
    pub fn never() -> Self {
        let (_, receiver) = watch::channel(false);
        Self { receiver }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.receiver.borrow()
    }

    /// Resolve once the signal is raised.
    ///
    /// Never resolves if the source is dropped without cancelling.
    pub async fn cancelled(&self) {
        let mut receiver = self.receiver.clone();
        if receiver.wait_for(|raised| *raised).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_not_be_cancelled_initially() {
        let source = CancellationSource::new();
        assert!(!source.signal().is_cancelled());
        assert!(!source.is_cancelled());
    }

    #[test]
    fn should_propagate_cancel_to_existing_and_new_signals() {
        let source = CancellationSource::new();
        let early = source.signal();
        source.cancel();
        assert!(early.is_cancelled());
        assert!(source.signal().is_cancelled());
    }

    #[tokio::test]
    async fn should_wake_waiter_when_cancelled() {
        let source = CancellationSource::new();
        let signal = source.signal();
        let waiter = tokio::spawn(async move { signal.cancelled().await });

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        source.cancel();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn should_resolve_immediately_when_already_cancelled() {
        let source = CancellationSource::new();
        source.cancel();
        source.signal().cancelled().await;
    }

    #[test]
    fn should_never_cancel_detached_signal() {
        assert!(!CancellationSignal::never().is_cancelled());
    }
}

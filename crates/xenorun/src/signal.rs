//! Cooperative cancellation signal.

use std::sync::Arc;

use tokio::sync::watch;

/// A clonable, trigger-once cancellation signal.
///
/// Triggering only *requests* termination: the bridge keeps polling and the
/// foreign side decides how (and whether) to wind down. It never frees
/// resources early or prevents a later completion from being processed.
#[derive(Clone)]
pub struct CancelSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Trigger the signal. Idempotent; later triggers are no-ops.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the signal has been triggered.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the signal is triggered, immediately if it already was.
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in self, so this can only resolve by trigger.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

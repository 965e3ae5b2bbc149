//! Stop signal for the per-chain update loops.
//!
//! Each `ChainUpdater::run` races its loop against a receiver from here.
//! When the signal fires the loop future is dropped wherever it is: during a
//! Hermes fetch, between submission and receipt, or in the interval sleep.
//! A transaction already broadcast is not tracked further and may still be
//! mined. Nothing is retried or drained on the way out.

use tokio::sync::broadcast;

/// Fan-out of a single stop signal to every chain task.
///
/// Subscribe before spawning a chain; a receiver created after
/// [`Shutdown::trigger`] never observes the signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            tx: broadcast::channel(1).0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Stop every subscribed chain loop. Without subscribers this is a no-op.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Chain tasks whose receiver is still alive.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

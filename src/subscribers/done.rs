//! # One-shot "finished" signal for blocking listeners.
//!
//! A blocking subscription hands its listener a [`Done`]. The dispatch cycle
//! treats the listener as finished when the first of these happens:
//! - any clone of the `Done` calls [`Done::finish`];
//! - every clone of the `Done` is dropped without finishing;
//! - the subscription's block timeout elapses.
//!
//! Whatever comes later is ignored: `finish` may be called any number of times,
//! from any thread, including after the cycle already moved on.
//!
//! ```text
//! listener ── done.finish() ──► [oneshot] ──► cycle wait  (first wins)
//!                                              ▲
//!                          timeout(block) ─────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

/// Idempotent completion signal passed to every listener invocation.
///
/// Non-blocking subscriptions receive a detached `Done`; finishing it is a no-op.
#[derive(Clone, Debug)]
pub struct Done {
    tx: Option<Arc<Mutex<Option<oneshot::Sender<()>>>>>,
}

impl Done {
    /// Creates a signal that is not awaited by anyone.
    pub(crate) fn detached() -> Self {
        Self { tx: None }
    }

    /// Creates a signal and the receiver the dispatch cycle waits on.
    pub(crate) fn channel() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        let done = Self {
            tx: Some(Arc::new(Mutex::new(Some(tx)))),
        };
        (done, rx)
    }

    /// Marks the listener as finished. Later calls have no effect.
    pub fn finish(&self) {
        let Some(slot) = &self.tx else {
            return;
        };
        let sender = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(sender) = sender {
            // The cycle may have stopped waiting (timeout); that is fine.
            let _ = sender.send(());
        }
    }

    /// Returns true if this signal has been finished, or is detached.
    pub fn is_finished(&self) -> bool {
        match &self.tx {
            None => true,
            Some(slot) => slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_is_idempotent() {
        let (done, mut rx) = Done::channel();
        let other = done.clone();
        assert!(!done.is_finished());

        done.finish();
        other.finish();
        done.finish();

        assert!(done.is_finished());
        assert!(other.is_finished());
        assert_eq!(rx.try_recv(), Ok(()));
    }

    #[test]
    fn test_dropping_all_clones_releases_the_wait() {
        let (done, mut rx) = Done::channel();
        let other = done.clone();
        drop(done);
        assert!(rx.try_recv().is_err());
        assert!(!other.is_finished());
        drop(other);
        assert!(matches!(
            rx.try_recv(),
            Err(oneshot::error::TryRecvError::Closed)
        ));
    }

    #[test]
    fn test_finish_after_receiver_gone_is_noop() {
        let (done, rx) = Done::channel();
        drop(rx);
        done.finish();
        done.finish();
        assert!(done.is_finished());
    }

    #[test]
    fn test_detached_is_always_finished() {
        let done = Done::detached();
        assert!(done.is_finished());
        done.finish();
    }
}

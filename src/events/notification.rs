//! # Notifications and their completion signal.
//!
//! A [`Notification`] is one emission waiting in (or travelling through) an
//! emitter's queue. Its `complete` callback runs exactly once, after every
//! listener in its dispatch cycle finished and, when the emitter has link
//! targets, after every target finished its propagated copy.
//!
//! [`Completion`] is the caller-facing half: a future that resolves once the
//! callback ran. Dropping it is fine; the notification still completes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

/// Callback fired once a notification has completed.
pub(crate) type OnComplete = Box<dyn FnOnce() + Send + 'static>;

/// One emission queued on an emitter.
pub(crate) struct Notification<T> {
    pub(crate) event: Arc<str>,
    pub(crate) data: Arc<T>,
    pub(crate) complete: OnComplete,
}

/// Resolves once a notification (and all of its link fan-out) has completed.
///
/// Also resolves if the runtime drops the notification before completing it
/// (e.g. during runtime shutdown).
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<()>,
}

impl Completion {
    /// Wraps `then` so that the returned future resolves right after it ran.
    pub(crate) fn after<F>(then: F) -> (OnComplete, Completion)
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let complete: OnComplete = Box::new(move || {
            then();
            let _ = tx.send(());
        });
        (complete, Completion { rx })
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.rx).poll(cx).map(|_| ())
    }
}

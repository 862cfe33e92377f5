//! # Dispatch cycle - delivering one notification.
//!
//! ```text
//! dispatch(notification)
//!   ├─► snapshot = live subscriptions of the event (taken once, at cycle start)
//!   ├─► empty?  → complete(), done
//!   ├─► for each subscription in snapshot:
//!   │     ├─ fire(): Last → retire from the live list   Spent → skip
//!   │     ├─ payload = clone (event or subscription flag) | shared Arc
//!   │     ├─ Block::Off        → invoke(listener, payload, detached Done)
//!   │     └─ Block::Indefinite → invoke(..., Done) + wait(done)
//!   │        Block::Timeout(d) → invoke(..., Done) + wait(done | timer d)
//!   ├─► join all waits
//!   └─► complete()   (exactly once)
//! ```
//!
//! ## Rules
//! - Listeners added or removed during the cycle only affect later cycles.
//! - A panicking listener is logged and counted as finished; its siblings and
//!   the completion are unaffected.
//! - On timeout the listener keeps running; its later `finish()` is a no-op.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, join_all};
use tokio::sync::oneshot;

use super::emitter::{Emitter, Payload};
use crate::events::{Notification, OnComplete};
use crate::subscribers::{Block, Done, Firing, ListenerRef, Subscription, panic_message};

impl<T: Payload> Emitter<T> {
    /// Runs one notification to completion.
    pub(crate) async fn dispatch(&self, notification: Notification<T>) {
        let Notification {
            event,
            data,
            complete,
        } = notification;

        let (snapshot, clone_all) = {
            let st = self.lock();
            match st.registry.get(&event) {
                Ok(cfg) => (cfg.table.snapshot(), cfg.spec.clones()),
                Err(_) => (Vec::new(), false),
            }
        };
        tracing::debug!(
            emitter = self.name(),
            event = %event,
            subscribers = snapshot.len(),
            "dispatch cycle"
        );

        let mut waits: Vec<BoxFuture<'static, ()>> = Vec::new();
        for sub in snapshot {
            match sub.fire() {
                Firing::Spent => continue,
                Firing::Last => self.retire(&event, &sub),
                Firing::Again => {}
            }

            let payload = if clone_all || sub.clones() {
                Arc::new(T::clone(&data))
            } else {
                Arc::clone(&data)
            };

            match sub.block() {
                Block::Off => invoke(sub.listener(), payload, Done::detached()),
                block => {
                    let (done, rx) = Done::channel();
                    let wait = settle(rx, block, &event, sub.listener());
                    invoke(sub.listener(), payload, done);
                    waits.push(wait);
                }
            }
        }

        if !waits.is_empty() {
            join_all(waits).await;
        }
        self.complete(&event, complete);
    }

    /// Removes an exhausted subscription from the live list.
    fn retire(&self, event: &str, sub: &Arc<Subscription<T>>) {
        let retired = match self.lock().registry.get_mut(event) {
            Ok(cfg) => cfg.table.retire(sub),
            Err(_) => false,
        };
        if retired {
            tracing::debug!(
                emitter = self.name(),
                event,
                listener = sub.listener().name(),
                "subscription exhausted"
            );
        }
    }

    fn complete(&self, event: &str, complete: OnComplete) {
        if let Err(panic_err) = catch_unwind(AssertUnwindSafe(complete)) {
            tracing::error!(
                emitter = self.name(),
                event,
                info = %panic_message(panic_err.as_ref()),
                "completion callback panicked"
            );
        }
    }
}

/// Calls the listener, isolating panics.
fn invoke<T: 'static>(listener: &ListenerRef<T>, data: Arc<T>, done: Done) {
    let call = AssertUnwindSafe(|| listener.on_event(data, done));
    if let Err(panic_err) = catch_unwind(call) {
        tracing::error!(
            listener = listener.name(),
            info = %panic_message(panic_err.as_ref()),
            "listener panicked"
        );
    }
}

/// Future resolved when a blocking listener is finished.
///
/// The timer (if any) starts here, right before the listener is invoked.
fn settle<T: 'static>(
    rx: oneshot::Receiver<()>,
    block: Block,
    event: &Arc<str>,
    listener: &ListenerRef<T>,
) -> BoxFuture<'static, ()> {
    match block {
        Block::Timeout(limit) => {
            let timer = tokio::time::timeout(limit, rx);
            let event = Arc::clone(event);
            let listener = listener.name().to_owned();
            async move {
                if timer.await.is_err() {
                    tracing::debug!(
                        event = %event,
                        listener = %listener,
                        timeout = ?limit,
                        "blocking listener timed out"
                    );
                }
            }
            .boxed()
        }
        // Dropping every `Done` clone also resolves the receiver.
        _ => async move {
            let _ = rx.await;
        }
        .boxed(),
    }
}

//! # Notification queue - strict FIFO per emitter.
//!
//! ```text
//! submit(event, data, complete)
//!   ├─ event unknown?         → Err(UnknownEvent), nothing queued
//!   ├─ no tokio runtime?      → Err(NoRuntime),    nothing queued
//!   ├─ distribute()           → wrap `complete` with link fan-out (if any links)
//!   └─ enqueue()
//!        ├─ push_back
//!        └─ was idle? → processing = true, spawn drain()
//!
//! drain():
//! loop {
//!   ├─► pop_front (under lock); empty → processing = false, exit
//!   └─► dispatch(notification).await   (completion included)
//! }
//! ```
//!
//! ## Rules
//! - At most one drain task per emitter (guarded by `processing`).
//! - Notifications emitted while a cycle is in flight (including by its own
//!   listeners) queue behind it; they are never interleaved.
//! - `processing` is cleared under the same lock that observed the empty queue,
//!   so a concurrent `enqueue` either sees `processing == true` and is picked up
//!   by this loop, or sees it cleared and spawns a new drain.
//! - A drain task dropped before the queue emptied (runtime shut down) clears
//!   `processing` on drop. Whatever it left queued is picked up by the drain
//!   the next `enqueue` spawns.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::emitter::{Emitter, Payload};
use crate::error::PodiumError;
use crate::events::{Notification, OnComplete};

impl<T: Payload> Emitter<T> {
    /// Validates, wraps for fan-out and queues one notification.
    pub(crate) fn submit(
        &self,
        event: &str,
        data: Arc<T>,
        complete: OnComplete,
    ) -> Result<(), PodiumError> {
        let event = self
            .lock()
            .registry
            .key(event)
            .ok_or_else(|| PodiumError::unknown(event))?;
        let runtime = Handle::try_current().map_err(|_| PodiumError::NoRuntime)?;

        let notification = self.distribute(Notification {
            event,
            data,
            complete,
        });
        self.enqueue(&runtime, notification);
        Ok(())
    }

    fn enqueue(&self, runtime: &Handle, notification: Notification<T>) {
        let event = Arc::clone(&notification.event);
        let idle = {
            let mut st = self.lock();
            st.queue.push_back(notification);
            !std::mem::replace(&mut st.processing, true)
        };
        tracing::trace!(emitter = self.name(), event = %event, "notification queued");

        if idle {
            runtime.spawn(Drain::new(self.clone()).run());
        }
    }
}

/// Owner of an emitter's `processing` flag while its drain task is alive.
///
/// Created before the task is spawned, so a task that is never polled still
/// releases the flag when the runtime drops it.
struct Drain<T> {
    emitter: Emitter<T>,
    idle: bool,
}

impl<T: Payload> Drain<T> {
    fn new(emitter: Emitter<T>) -> Self {
        Self {
            emitter,
            idle: false,
        }
    }

    async fn run(mut self) {
        loop {
            let next = {
                let mut st = self.emitter.lock();
                match st.queue.pop_front() {
                    Some(notification) => notification,
                    None => {
                        st.processing = false;
                        self.idle = true;
                        break;
                    }
                }
            };
            self.emitter.dispatch(next).await;
        }
        tracing::debug!(emitter = self.emitter.name(), "queue drained");
    }
}

impl<T> Drop for Drain<T> {
    fn drop(&mut self) {
        if self.idle {
            return;
        }
        let pending = {
            let mut st = self.emitter.lock();
            st.processing = false;
            st.queue.len()
        };
        tracing::debug!(
            emitter = self.emitter.name(),
            pending,
            "drain task dropped before the queue emptied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::{Block, Done, ListenerFn, SubscribeOptions};
    use crate::testkit::Trail;
    use std::time::Duration;

    #[tokio::test]
    async fn test_reentrant_emit_is_queued_behind() {
        let emitter: Emitter<u32> = Emitter::with_events(["a"]).unwrap();
        let trail = Trail::default();

        let t = trail.clone();
        let handle = emitter.clone();
        emitter
            .on(
                "a",
                ListenerFn::arc("echo", move |n: Arc<u32>, _: Done| {
                    t.push(format!("start {n}"));
                    if *n < 3 {
                        let t = t.clone();
                        let next = *n + 1;
                        handle
                            .emit_then("a", next, move || t.push(format!("done {next}")))
                            .unwrap();
                    }
                    t.push(format!("end {n}"));
                }),
            )
            .unwrap();

        let t = trail.clone();
        let first = emitter.emit_then("a", 1, move || t.push("done 1")).unwrap();
        first.await;
        // Let the nested emissions finish.
        while emitter.lock().processing {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            trail.take(),
            vec![
                "start 1", "end 1", "done 1", "start 2", "end 2", "done 2", "start 3", "end 3",
                "done 3"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_first_completes_first() {
        let emitter: Emitter<u32> = Emitter::with_events(["slow", "fast"]).unwrap();
        let trail = Trail::default();

        emitter
            .on_with(
                "slow",
                SubscribeOptions::new().with_block(Block::Indefinite),
                ListenerFn::arc("slow", |_: Arc<u32>, done: Done| {
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_millis(200)).await;
                        done.finish();
                    });
                }),
            )
            .unwrap();
        emitter
            .on("fast", ListenerFn::arc("fast", |_: Arc<u32>, _: Done| {}))
            .unwrap();

        let t = trail.clone();
        let slow = emitter.emit_then("slow", 1, move || t.push("slow")).unwrap();
        let t = trail.clone();
        let fast = emitter.emit_then("fast", 2, move || t.push("fast")).unwrap();

        fast.await;
        slow.await;
        assert_eq!(trail.take(), vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_processing_flag_clears_when_idle() {
        let emitter: Emitter<u32> = Emitter::with_events(["a"]).unwrap();
        emitter.emit("a", 1).unwrap().await;
        while emitter.lock().processing {
            tokio::task::yield_now().await;
        }
        assert!(emitter.lock().queue.is_empty());

        // A fresh emission after going idle spawns a new drain.
        emitter.emit("a", 2).unwrap().await;
    }

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn test_emitter_outlives_its_runtime() {
        let emitter: Emitter<u32> = Emitter::with_events(["a"]).unwrap();
        let trail = Trail::default();
        let t = trail.clone();
        emitter
            .on("a", ListenerFn::arc("rec", move |n: Arc<u32>, _: Done| t.push(format!("{n}"))))
            .unwrap();

        let first = runtime();
        first.block_on(async { emitter.emit("a", 1).map(drop) }).unwrap();
        drop(first);
        assert!(!emitter.lock().processing);

        let second = runtime();
        second.block_on(async { emitter.emit("a", 2).unwrap().await });
        assert_eq!(trail.take(), vec!["1", "2"]);
        assert!(emitter.lock().queue.is_empty());
    }

    #[test]
    fn test_runtime_dropped_mid_cycle() {
        let emitter: Emitter<u32> = Emitter::with_events(["slow", "a"]).unwrap();
        let parked: Arc<std::sync::Mutex<Vec<Done>>> = Arc::default();
        let p = Arc::clone(&parked);
        emitter
            .on_with(
                "slow",
                SubscribeOptions::new().with_block(Block::Indefinite),
                ListenerFn::arc("park", move |_: Arc<u32>, done: Done| p.lock().unwrap().push(done)),
            )
            .unwrap();
        let trail = Trail::default();
        let t = trail.clone();
        emitter
            .on("a", ListenerFn::arc("rec", move |n: Arc<u32>, _: Done| t.push(format!("{n}"))))
            .unwrap();

        let first = runtime();
        first.block_on(async {
            emitter.emit("slow", 1).unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
        });
        assert_eq!(parked.lock().unwrap().len(), 1);
        assert!(emitter.lock().processing);
        drop(first);
        assert!(!emitter.lock().processing);

        let second = runtime();
        second.block_on(async { emitter.emit("a", 2).unwrap().await });
        assert_eq!(trail.take(), vec!["2"]);
    }
}

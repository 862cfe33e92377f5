//! # Async subscriber trait.
//!
//! [`Subscribe`] is the extension point for listeners whose work is naturally a
//! future (I/O, timers, channels). [`AsyncListener`] adapts one into a
//! [`Listen`] implementation:
//!
//! ```text
//! dispatch ──► AsyncListener::on_event ──► tokio::spawn(sub.on_event(data))
//!                                                 └─► resolved / panicked ──► done.finish()
//! ```
//!
//! Registered with `Block::Off` the future simply runs in the background;
//! registered as blocking, the dispatch cycle waits for the future to resolve
//! (bounded by the timeout, if any; the future itself is never cancelled).
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use podium::{AsyncListener, ListenerRef, Subscribe};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Subscribe<String> for Audit {
//!     async fn on_event(&self, line: Arc<String>) {
//!         // write audit record...
//!         let _ = line;
//!     }
//!
//!     fn name(&self) -> &'static str { "audit" }
//! }
//!
//! let l: ListenerRef<String> = AsyncListener::arc(Audit);
//! assert_eq!(l.name(), "audit");
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;

use super::{Done, Listen, ListenerRef};

/// Contract for asynchronous listeners.
///
/// Implementations should avoid blocking the async runtime (prefer async I/O and
/// cooperative waits). Panics are caught and logged.
#[async_trait]
pub trait Subscribe<T>: Send + Sync + 'static
where
    T: Send + Sync + 'static,
{
    /// Handles a single delivery.
    async fn on_event(&self, data: Arc<T>);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Adapter running a [`Subscribe`] implementation as a spawned task per delivery.
pub struct AsyncListener<S> {
    inner: Arc<S>,
}

impl<S> AsyncListener<S> {
    /// Wraps `sub` and returns it as a shared listener handle.
    pub fn arc<T>(sub: S) -> ListenerRef<T>
    where
        S: Subscribe<T>,
        T: Send + Sync + 'static,
    {
        Arc::new(Self {
            inner: Arc::new(sub),
        })
    }
}

impl<T, S> Listen<T> for AsyncListener<S>
where
    S: Subscribe<T>,
    T: Send + Sync + 'static,
{
    fn on_event(&self, data: Arc<T>, done: Done) {
        let sub = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let fut = sub.on_event(data);
            if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                tracing::error!(
                    listener = sub.name(),
                    info = %super::panic_message(panic_err.as_ref()),
                    "async listener panicked"
                );
            }
            done.finish();
        });
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    struct Slow {
        seen: AtomicU32,
    }

    #[async_trait]
    impl Subscribe<u32> for Slow {
        async fn on_event(&self, data: Arc<u32>) {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.seen.fetch_add(*data, Ordering::SeqCst);
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    struct Exploding;

    #[async_trait]
    impl Subscribe<u32> for Exploding {
        async fn on_event(&self, _data: Arc<u32>) {
            panic!("boom");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_done_finished_when_future_resolves() {
        let l: ListenerRef<u32> = AsyncListener::arc(Slow {
            seen: AtomicU32::new(0),
        });
        let (done, rx) = Done::channel();
        l.on_event(Arc::new(5), done);
        rx.await.expect("finished, not dropped");
        assert_eq!(l.name(), "slow");
    }

    #[tokio::test]
    async fn test_panicking_future_still_finishes() {
        let l: ListenerRef<u32> = AsyncListener::arc(Exploding);
        let (done, rx) = Done::channel();
        l.on_event(Arc::new(1), done);
        assert_eq!(rx.await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocking_async_listener_holds_the_emitter() {
        use crate::{Block, Emitter, SubscribeOptions};

        let emitter: Emitter<u32> = Emitter::with_events(["job", "next"]).unwrap();
        let slow = Arc::new(Slow {
            seen: AtomicU32::new(0),
        });
        emitter
            .on_with(
                "job",
                SubscribeOptions::new().with_block(Block::Indefinite),
                AsyncListener::arc(Shared(Arc::clone(&slow))),
            )
            .unwrap();

        let started = tokio::time::Instant::now();
        emitter.emit("job", 2).unwrap();
        emitter.emit("job", 3).unwrap();
        emitter.emit("next", 0).unwrap().await;

        assert_eq!(slow.seen.load(Ordering::SeqCst), 5);
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    struct Shared(Arc<Slow>);

    #[async_trait]
    impl Subscribe<u32> for Shared {
        async fn on_event(&self, data: Arc<u32>) {
            self.0.on_event(data).await;
        }
    }
}

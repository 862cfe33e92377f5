//! # Link graph - aggregating several emitters into one logical source.
//!
//! `target.register_podium([&source])` records a directed link `source → target`:
//! every notification emitted on `source` is re-emitted on `target` once the
//! source's own listeners finished.
//!
//! ```text
//!  source1 ──┐                        source.emit(ev, data)
//!  source2 ──┼──► target                ├─► local dispatch
//!  source3 ──┘                          ├─► target_1.emit(ev, same Arc) ─┐
//!                                       ├─► target_n.emit(ev, same Arc) ─┤ (concurrently)
//!                                       └─► caller completion ◄──────────┘ all finished
//! ```
//!
//! ## Rules
//! - Linking is idempotent; linking an emitter into itself, or closing a cycle,
//!   is ignored with a warning.
//! - Linking copies the source's known events into the target (and transitively
//!   into everything the target forwards into) without overwriting flags.
//!   Events registered on the source later are propagated the same way.
//! - Targets receive the original payload `Arc`; cloning happens per listener at
//!   every hop.
//! - Past emissions are never replayed.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::emitter::{Emitter, Payload};
use crate::events::{EventSpec, Notification, OnComplete};

impl<T: Payload> Emitter<T> {
    /// Links every emitter in `sources` into this one.
    ///
    /// # Example
    /// ```
    /// use podium::Emitter;
    ///
    /// let worker: Emitter<u32> = Emitter::with_events(["job"]).unwrap();
    /// let supervisor: Emitter<u32> = Emitter::new();
    /// supervisor.register_podium([&worker]);
    /// assert!(supervisor.has_event("job"));
    /// ```
    pub fn register_podium<'a, I>(&self, sources: I) -> &Self
    where
        I: IntoIterator<Item = &'a Emitter<T>>,
    {
        for source in sources {
            if self.forwards_to(source) {
                tracing::warn!(
                    source = source.name(),
                    target = self.name(),
                    "ignoring link that would close a cycle"
                );
                continue;
            }

            let specs = {
                let mut st = source.lock();
                if st.links.iter().any(|t| t.same(self)) {
                    continue;
                }
                st.links.push(self.clone());
                st.registry.specs()
            };
            self.adopt(&specs);
            tracing::debug!(source = source.name(), target = self.name(), "linked");
        }
        self
    }

    /// Alias of [`register_podium`](Self::register_podium).
    pub fn link<'a, I>(&self, sources: I) -> &Self
    where
        I: IntoIterator<Item = &'a Emitter<T>>,
    {
        self.register_podium(sources)
    }

    /// Installs missing declarations here and in everything this emitter forwards into.
    pub(crate) fn adopt(&self, specs: &[EventSpec]) {
        let (added, targets) = {
            let mut st = self.lock();
            let mut added = Vec::new();
            for spec in specs {
                if st.registry.adopt(spec) {
                    added.push(spec.clone());
                }
            }
            let targets = if added.is_empty() {
                Vec::new()
            } else {
                st.links.clone()
            };
            (added, targets)
        };
        for target in targets {
            target.adopt(&added);
        }
    }

    /// True if `other` is this emitter or is reachable through its links.
    fn forwards_to(&self, other: &Emitter<T>) -> bool {
        let mut seen: HashSet<*const ()> = HashSet::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            if node.same(other) {
                return true;
            }
            if !seen.insert(node.id()) {
                continue;
            }
            stack.extend(node.lock().links.iter().cloned());
        }
        false
    }

    /// Wraps the notification's completion with fan-out to link targets.
    ///
    /// Without links the notification is returned untouched.
    pub(crate) fn distribute(&self, notification: Notification<T>) -> Notification<T> {
        if self.lock().links.is_empty() {
            return notification;
        }

        let Notification {
            event,
            data,
            complete,
        } = notification;
        let source = self.clone();
        let fan_event = Arc::clone(&event);
        let fan_data = Arc::clone(&data);

        let fan_out: OnComplete = Box::new(move || {
            let targets = source.lock().links.clone();
            let join = FanIn::new(targets.len(), complete);
            for target in targets {
                let arrival = Arc::clone(&join);
                let on_done: OnComplete = Box::new(move || arrival.arrive());
                if let Err(err) = target.submit(&fan_event, Arc::clone(&fan_data), on_done) {
                    tracing::warn!(
                        source = source.name(),
                        target = target.name(),
                        event = %fan_event,
                        error = %err,
                        "link target rejected notification"
                    );
                    join.arrive();
                }
            }
        });

        Notification {
            event,
            data,
            complete: fan_out,
        }
    }
}

/// Countdown that fires the source's completion after the last target arrived.
struct FanIn {
    pending: AtomicUsize,
    finalize: Mutex<Option<OnComplete>>,
}

impl FanIn {
    fn new(targets: usize, finalize: OnComplete) -> Arc<Self> {
        let join = Arc::new(Self {
            pending: AtomicUsize::new(targets),
            finalize: Mutex::new(Some(finalize)),
        });
        if targets == 0 {
            join.fire();
        }
        join
    }

    fn arrive(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.fire();
        }
    }

    fn fire(&self) {
        let finalize = self
            .finalize
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(finalize) = finalize {
            finalize();
        }
    }
}

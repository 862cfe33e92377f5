//! # Subscription table.
//!
//! One [`SubscriptionTable`] per event keeps the live, insertion-ordered list of
//! registrations. Dispatch never iterates the live list: it takes a
//! [`snapshot`](SubscriptionTable::snapshot) at cycle start, so listeners added
//! or removed while a cycle is in flight only affect later cycles.
//!
//! ## Fire counts
//! ```text
//! count = Some(2):  fire() → Again   fire() → Last (retired from live list)   fire() → Spent
//! count = None:     fire() → Again   (forever)
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::listener::same_listener;
use super::{Block, ListenerRef, SubscribeOptions};

/// Outcome of consuming one delivery from a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Firing {
    /// Deliver; the subscription stays.
    Again,
    /// Deliver; this was the last allowed delivery.
    Last,
    /// Do not deliver; the count was already used up.
    Spent,
}

/// One listener registration.
pub(crate) struct Subscription<T> {
    listener: ListenerRef<T>,
    remaining: Option<AtomicU32>,
    block: Block,
    clone: bool,
}

impl<T> Subscription<T> {
    pub(crate) fn new(listener: ListenerRef<T>, options: SubscribeOptions) -> Self {
        Self {
            listener,
            remaining: options.count.map(AtomicU32::new),
            block: options.block,
            clone: options.clone,
        }
    }

    /// Consumes one delivery from the fire count (if any).
    pub(crate) fn fire(&self) -> Firing {
        let Some(remaining) = &self.remaining else {
            return Firing::Again;
        };
        match remaining.fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1)) {
            Ok(1) => Firing::Last,
            Ok(_) => Firing::Again,
            Err(_) => Firing::Spent,
        }
    }

    #[inline]
    pub(crate) fn listener(&self) -> &ListenerRef<T> {
        &self.listener
    }

    #[inline]
    pub(crate) fn block(&self) -> Block {
        self.block
    }

    #[inline]
    pub(crate) fn clones(&self) -> bool {
        self.clone
    }
}

/// Live subscriptions of one event, in registration order.
pub(crate) struct SubscriptionTable<T> {
    subs: Vec<Arc<Subscription<T>>>,
}

impl<T> SubscriptionTable<T> {
    pub(crate) fn new() -> Self {
        Self { subs: Vec::new() }
    }

    pub(crate) fn push(&mut self, sub: Subscription<T>) {
        self.subs.push(Arc::new(sub));
    }

    /// Copy of the current list, immune to later mutation.
    pub(crate) fn snapshot(&self) -> Vec<Arc<Subscription<T>>> {
        self.subs.clone()
    }

    /// Removes every subscription registered with `listener`; returns how many.
    pub(crate) fn remove_listener(&mut self, listener: &ListenerRef<T>) -> usize {
        let before = self.subs.len();
        self.subs.retain(|s| !same_listener(&s.listener, listener));
        before - self.subs.len()
    }

    /// Removes exactly this subscription; returns false if it was already gone.
    pub(crate) fn retire(&mut self, sub: &Arc<Subscription<T>>) -> bool {
        match self.subs.iter().position(|s| Arc::ptr_eq(s, sub)) {
            Some(idx) => {
                self.subs.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.subs.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.subs.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }
}

//! # Listener abstraction.
//!
//! [`Listen`] is what an emitter invokes for every delivery. The invocation is
//! synchronous; a listener that needs to keep working afterwards keeps (a clone
//! of) its [`Done`] and finishes it later. Whether the cycle actually waits for
//! that depends on the subscription's [`Block`](crate::Block) option.
//!
//! [`ListenerFn`] adapts a closure; [`ListenerRef`] is the shared handle that is
//! registered with `on` and later passed back to `remove_listener`. Listener
//! identity is the identity of that `Arc`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use podium::{Done, ListenerFn, ListenerRef};
//!
//! let l: ListenerRef<u32> = ListenerFn::arc("printer", |n: Arc<u32>, done: Done| {
//!     println!("got {n}");
//!     done.finish();
//! });
//! assert_eq!(l.name(), "printer");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use super::Done;

/// Receiver of event payloads.
///
/// Called from the emitter's dispatch task. Implementations should return quickly;
/// long work belongs in a spawned task that finishes `done` when it is over.
pub trait Listen<T>: Send + Sync + 'static {
    /// Handles one delivery.
    fn on_event(&self, data: Arc<T>, done: Done);

    /// Human-readable name (for logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Shared listener handle (`Arc<dyn Listen<T>>`).
pub type ListenerRef<T> = Arc<dyn Listen<T>>;

/// Returns true if both handles point at the same listener.
#[inline]
pub(crate) fn same_listener<T>(a: &ListenerRef<T>, b: &ListenerRef<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Closure-backed listener.
#[derive(Debug)]
pub struct ListenerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ListenerFn<F> {
    /// Creates a new closure-backed listener.
    ///
    /// Prefer [`ListenerFn::arc`] when you immediately need a [`ListenerRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the listener and returns it as a shared handle.
    pub fn arc<T>(name: impl Into<Cow<'static, str>>, f: F) -> ListenerRef<T>
    where
        F: Fn(Arc<T>, Done) + Send + Sync + 'static,
        T: 'static,
    {
        Arc::new(Self::new(name, f))
    }
}

impl<T, F> Listen<T> for ListenerFn<F>
where
    F: Fn(Arc<T>, Done) + Send + Sync + 'static,
    T: 'static,
{
    fn on_event(&self, data: Arc<T>, done: Done) {
        (self.f)(data, done)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

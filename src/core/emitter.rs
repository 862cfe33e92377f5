//! # Emitter - registry, queue and links of one event source.
//!
//! [`Emitter`] is a cheap, cloneable handle (`Arc` inside) to the state of one
//! event source:
//!
//! ```text
//! Emitter ──► Inner { config, state: Mutex<State> }
//!                                 ├─ registry   : name → EventConfig { spec, SubscriptionTable }
//!                                 ├─ queue      : VecDeque<Notification>  (FIFO)
//!                                 ├─ processing : drain task in flight
//!                                 └─ links      : emitters this one forwards into
//! ```
//!
//! ## Rules
//! - Every operation naming an event fails with `UnknownEvent` if the name is not registered.
//! - Failed operations leave registry and queue untouched.
//! - The state lock is never held while user code (listeners, callbacks) runs.
//!
//! Queueing lives in `queue.rs`, the per-notification cycle in `dispatch.rs` and
//! linking in `link.rs`; this file holds the public registration/listener API.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::builder::EmitterBuilder;
use super::config::Config;
use super::registry::Registry;
use crate::error::PodiumError;
use crate::events::{Completion, EventSpec, Notification, Registration};
use crate::subscribers::{ListenerRef, SubscribeOptions, Subscription};

/// Bound shared by every payload type: cloneable (for `clone` delivery) and shareable across tasks.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T> Payload for T where T: Clone + Send + Sync + 'static {}

/// Handle to one event source.
///
/// Cloning the handle does not create a new emitter; both handles drive the same
/// registry and queue.
pub struct Emitter<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    config: Config,
    state: Mutex<State<T>>,
}

/// Mutable engine state, guarded by one lock per emitter.
pub(crate) struct State<T> {
    pub(crate) registry: Registry<T>,
    pub(crate) queue: VecDeque<Notification<T>>,
    pub(crate) processing: bool,
    pub(crate) links: Vec<Emitter<T>>,
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("name", &self.inner.config.name)
            .finish_non_exhaustive()
    }
}

impl<T: Payload> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Emitter<T> {
    /// Returns the configured emitter name (used in logs).
    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    /// Returns the emitter configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// True if both handles refer to the same emitter.
    #[inline]
    pub(crate) fn same(&self, other: &Emitter<T>) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Address of the shared state, stable for the emitter's lifetime.
    #[inline]
    pub(crate) fn id(&self) -> *const () {
        Arc::as_ptr(&self.inner).cast()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Payload> Emitter<T> {
    /// Creates an emitter with no events and the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an emitter with no events.
    pub fn with_config(config: Config) -> Self {
        let queue = VecDeque::with_capacity(config.queue_capacity_clamped());
        Self {
            inner: Arc::new(Inner {
                config,
                state: Mutex::new(State {
                    registry: Registry::new(),
                    queue,
                    processing: false,
                    links: Vec::new(),
                }),
            }),
        }
    }

    /// Creates an emitter and registers the initial events / source emitters.
    ///
    /// # Example
    /// ```
    /// use podium::Emitter;
    ///
    /// let emitter: Emitter<u32> = Emitter::with_events(["a", "b"]).unwrap();
    /// assert_eq!(emitter.event_names(), vec!["a", "b"]);
    /// ```
    pub fn with_events<I>(events: I) -> Result<Self, PodiumError>
    where
        I: IntoIterator,
        I::Item: Into<Registration<T>>,
    {
        let emitter = Self::new();
        emitter.register_event(events)?;
        Ok(emitter)
    }

    /// Returns a builder for an emitter with a custom configuration.
    pub fn builder() -> EmitterBuilder<T> {
        EmitterBuilder::new(Config::default())
    }

    /// Registers events and/or links source emitters.
    ///
    /// Plain declarations are validated as a batch first: an empty name
    /// (`MissingEventName`) or a name already known or repeated
    /// (`DuplicateEvent`) aborts the whole call without registering anything.
    /// Newly registered events are also installed on every emitter this one
    /// forwards into. Emitter entries are linked as sources, see
    /// [`register_podium`](Self::register_podium).
    pub fn register_event<I>(&self, events: I) -> Result<&Self, PodiumError>
    where
        I: IntoIterator,
        I::Item: Into<Registration<T>>,
    {
        let mut specs: Vec<EventSpec> = Vec::new();
        let mut sources: Vec<Emitter<T>> = Vec::new();
        for entry in events {
            match entry.into() {
                Registration::Event(spec) => specs.push(spec),
                Registration::Podium(source) => sources.push(source),
            }
        }

        if !specs.is_empty() {
            let targets = {
                let mut st = self.lock();
                st.registry.validate(&specs)?;
                for spec in &specs {
                    st.registry.adopt(spec);
                }
                st.links.clone()
            };
            for target in targets {
                target.adopt(&specs);
            }
        }

        self.register_podium(&sources);
        Ok(self)
    }

    /// Emits `data` on `event`.
    ///
    /// The returned [`Completion`] resolves once every listener finished (and, for
    /// linked emitters, every target finished its copy). Dropping it is allowed.
    pub fn emit(&self, event: &str, data: T) -> Result<Completion, PodiumError> {
        self.emit_arc(event, Arc::new(data))
    }

    /// Emits an already shared payload. Non-cloning listeners receive this very `Arc`.
    pub fn emit_arc(&self, event: &str, data: Arc<T>) -> Result<Completion, PodiumError> {
        self.emit_shared(event, data, || {})
    }

    /// Emits `data` and runs `then` once the notification completed.
    ///
    /// Without links, `then` runs before the next queued notification of this
    /// emitter is dispatched. With links it runs after the last target finished.
    pub fn emit_then<F>(&self, event: &str, data: T, then: F) -> Result<Completion, PodiumError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.emit_shared(event, Arc::new(data), then)
    }

    fn emit_shared<F>(&self, event: &str, data: Arc<T>, then: F) -> Result<Completion, PodiumError>
    where
        F: FnOnce() + Send + 'static,
    {
        let (complete, completion) = Completion::after(then);
        self.submit(event, data, complete)?;
        Ok(completion)
    }

    /// Subscribes a non-blocking, unlimited listener.
    pub fn on(&self, event: &str, listener: ListenerRef<T>) -> Result<&Self, PodiumError> {
        self.on_with(event, SubscribeOptions::default(), listener)
    }

    /// Alias of [`on`](Self::on).
    pub fn add_listener(&self, event: &str, listener: ListenerRef<T>) -> Result<&Self, PodiumError> {
        self.on(event, listener)
    }

    /// Subscribes a listener with explicit options.
    ///
    /// Options are validated here (`count` must be greater than zero).
    pub fn on_with(
        &self,
        event: &str,
        options: SubscribeOptions,
        listener: ListenerRef<T>,
    ) -> Result<&Self, PodiumError> {
        let mut st = self.lock();
        let cfg = st.registry.get_mut(event)?;
        options.validate(event)?;
        cfg.table.push(Subscription::new(listener, options));
        Ok(self)
    }

    /// Subscribes a listener that fires once.
    pub fn once(&self, event: &str, listener: ListenerRef<T>) -> Result<&Self, PodiumError> {
        self.once_with(event, SubscribeOptions::default(), listener)
    }

    /// Subscribes a listener that fires once; any `count` in `options` is replaced by 1.
    pub fn once_with(
        &self,
        event: &str,
        options: SubscribeOptions,
        listener: ListenerRef<T>,
    ) -> Result<&Self, PodiumError> {
        self.on_with(event, options.with_count(1), listener)
    }

    /// Removes every subscription of `listener` (by identity) from `event`.
    pub fn remove_listener(&self, event: &str, listener: &ListenerRef<T>) -> Result<&Self, PodiumError> {
        let mut st = self.lock();
        st.registry.get_mut(event)?.table.remove_listener(listener);
        Ok(self)
    }

    /// Removes all subscriptions from `event`.
    pub fn remove_all_listeners(&self, event: &str) -> Result<&Self, PodiumError> {
        let mut st = self.lock();
        st.registry.get_mut(event)?.table.clear();
        Ok(self)
    }

    /// True if `event` has at least one active subscription.
    pub fn has_listeners(&self, event: &str) -> Result<bool, PodiumError> {
        Ok(!self.lock().registry.get(event)?.table.is_empty())
    }

    /// Number of active subscriptions on `event`.
    pub fn listener_count(&self, event: &str) -> Result<usize, PodiumError> {
        Ok(self.lock().registry.get(event)?.table.len())
    }

    /// True if `event` is registered on this emitter.
    pub fn has_event(&self, event: &str) -> bool {
        self.lock().registry.contains(event)
    }

    /// Sorted names of all registered events.
    pub fn event_names(&self) -> Vec<String> {
        self.lock().registry.names()
    }
}

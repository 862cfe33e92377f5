//! # Registration entries.
//!
//! `register_event` accepts a mix of plain declarations and peer emitters.
//! A peer emitter entry links it as a **source** of the registering emitter,
//! exactly like `register_podium`.

use crate::core::Emitter;

use super::EventSpec;

/// One entry passed to [`Emitter::register_event`].
pub enum Registration<T> {
    /// Declare a new event on this emitter.
    Event(EventSpec),
    /// Link a peer emitter as a source of this emitter.
    Podium(Emitter<T>),
}

impl<T> From<EventSpec> for Registration<T> {
    fn from(spec: EventSpec) -> Self {
        Registration::Event(spec)
    }
}

impl<T> From<&str> for Registration<T> {
    fn from(name: &str) -> Self {
        Registration::Event(EventSpec::new(name))
    }
}

impl<T> From<String> for Registration<T> {
    fn from(name: String) -> Self {
        Registration::Event(EventSpec::new(name))
    }
}

impl<T> From<Emitter<T>> for Registration<T> {
    fn from(emitter: Emitter<T>) -> Self {
        Registration::Podium(emitter)
    }
}

impl<T> From<&Emitter<T>> for Registration<T> {
    fn from(emitter: &Emitter<T>) -> Self {
        Registration::Podium(emitter.clone())
    }
}

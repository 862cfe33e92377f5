//! # Composition capability for host types.
//!
//! Types that *own* an emitter implement [`HasEmitter`] and get the common
//! calls forwarded to it, instead of wrapping every method by hand.
//!
//! ## Example
//! ```rust
//! use podium::{Completion, Emitter, HasEmitter, PodiumError};
//!
//! struct Thermometer {
//!     events: Emitter<i32>,
//! }
//!
//! impl HasEmitter<i32> for Thermometer {
//!     fn emitter(&self) -> &Emitter<i32> {
//!         &self.events
//!     }
//! }
//!
//! impl Thermometer {
//!     fn reading(&self, celsius: i32) -> Result<Completion, PodiumError> {
//!         self.emit("temperature", celsius)
//!     }
//! }
//!
//! let t = Thermometer { events: Emitter::with_events(["temperature"]).unwrap() };
//! assert!(!t.has_listeners("temperature").unwrap());
//! ```

use crate::core::{Emitter, Payload};
use crate::error::PodiumError;
use crate::events::Completion;
use crate::subscribers::{ListenerRef, SubscribeOptions};

/// Capability of a type that owns an [`Emitter`].
pub trait HasEmitter<T: Payload> {
    /// The owned emitter.
    fn emitter(&self) -> &Emitter<T>;

    /// Forwards to [`Emitter::emit`].
    fn emit(&self, event: &str, data: T) -> Result<Completion, PodiumError> {
        self.emitter().emit(event, data)
    }

    /// Forwards to [`Emitter::emit_then`].
    fn emit_then<F>(&self, event: &str, data: T, then: F) -> Result<Completion, PodiumError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.emitter().emit_then(event, data, then)
    }

    /// Forwards to [`Emitter::on`].
    fn on(&self, event: &str, listener: ListenerRef<T>) -> Result<(), PodiumError> {
        self.emitter().on(event, listener).map(|_| ())
    }

    /// Forwards to [`Emitter::on_with`].
    fn on_with(
        &self,
        event: &str,
        options: SubscribeOptions,
        listener: ListenerRef<T>,
    ) -> Result<(), PodiumError> {
        self.emitter().on_with(event, options, listener).map(|_| ())
    }

    /// Forwards to [`Emitter::once`].
    fn once(&self, event: &str, listener: ListenerRef<T>) -> Result<(), PodiumError> {
        self.emitter().once(event, listener).map(|_| ())
    }

    /// Forwards to [`Emitter::has_listeners`].
    fn has_listeners(&self, event: &str) -> Result<bool, PodiumError> {
        self.emitter().has_listeners(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscribers::{Block, Done, ListenerFn};
    use crate::testkit::Trail;
    use std::sync::Arc;

    struct Sensor {
        kind: &'static str,
        events: Emitter<i32>,
    }

    impl Sensor {
        fn new(kind: &'static str) -> Self {
            Self {
                kind,
                events: Emitter::with_events([kind]).unwrap(),
            }
        }

        fn reading(&self, value: i32) -> Result<Completion, PodiumError> {
            self.emit(self.kind, value)
        }
    }

    impl HasEmitter<i32> for Sensor {
        fn emitter(&self) -> &Emitter<i32> {
            &self.events
        }
    }

    fn expect(trail: &Trail, want: i32) -> ListenerRef<i32> {
        let trail = trail.clone();
        ListenerFn::arc("expect", move |v: Arc<i32>, done: Done| {
            assert_eq!(*v, want);
            trail.push(format!("{v}"));
            done.finish();
        })
    }

    #[tokio::test]
    async fn test_host_types_forward_to_their_emitter() {
        let thermometer = Sensor::new("temperature");
        let hydrometer = Sensor::new("gravity");
        let trail = Trail::default();

        thermometer
            .on_with("temperature", SubscribeOptions::new().with_block(Block::millis(10)), expect(&trail, 72))
            .unwrap();
        hydrometer
            .on_with("gravity", SubscribeOptions::new().with_block(Block::millis(10)), expect(&trail, 7))
            .unwrap();

        thermometer.reading(72).unwrap().await;
        hydrometer.reading(7).unwrap().await;
        assert_eq!(trail.take(), vec!["72", "7"]);
        assert!(thermometer.has_listeners("temperature").unwrap());
        assert!(hydrometer.emit("temperature", 1).is_err());
    }

    #[tokio::test]
    async fn test_supervisor_aggregates_sensors() {
        let thermometer = Sensor::new("temperature");
        let hydrometer = Sensor::new("gravity");
        let station: Emitter<i32> = Emitter::new();
        station.register_podium([thermometer.emitter(), hydrometer.emitter()]);

        let trail = Trail::default();
        let t = trail.clone();
        station
            .once("gravity", ListenerFn::arc("station", move |v: Arc<i32>, _: Done| t.push(format!("g{v}"))))
            .unwrap();

        hydrometer.reading(7).unwrap().await;
        hydrometer.reading(8).unwrap().await;
        assert_eq!(trail.take(), vec!["g7"]);
    }
}

//! # Example: linked_sensors
//!
//! Aggregates two sensors into one station emitter.
//!
//! Shows how to:
//! - Give host types the emitter API with [`HasEmitter`].
//! - Link sources into a target with [`Emitter::register_podium`].
//! - Await a reading until the station (a link target) processed it.
//!
//! ## Flow
//! ```text
//! Thermometer.reading() ──► emitter("temperature") ──┐
//!                                                    ├──► station ──► "[station] ..."
//! Hydrometer.reading()  ──► emitter("gravity")     ──┘
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example linked_sensors
//! ```

use std::sync::Arc;

use podium::{Completion, Done, Emitter, HasEmitter, ListenerFn, PodiumError};

/// A sensor that emits one kind of reading.
struct Sensor {
    kind: &'static str,
    events: Emitter<f64>,
}

impl Sensor {
    fn new(kind: &'static str) -> Result<Self, PodiumError> {
        let events = Emitter::builder()
            .with_name(kind)
            .with_events([kind])
            .build()?;
        Ok(Self { kind, events })
    }

    fn reading(&self, value: f64) -> Result<Completion, PodiumError> {
        self.emit(self.kind, value)
    }
}

impl HasEmitter<f64> for Sensor {
    fn emitter(&self) -> &Emitter<f64> {
        &self.events
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let thermometer = Sensor::new("temperature")?;
    let hydrometer = Sensor::new("gravity")?;

    let station: Emitter<f64> = Emitter::builder()
        .with_name("station")
        .with_podiums([thermometer.emitter(), hydrometer.emitter()])
        .build()?;
    println!("[station] knows {:?}", station.event_names());

    // Local listener: only sees the thermometer.
    thermometer.on(
        "temperature",
        ListenerFn::arc("display", |c: Arc<f64>, _: Done| println!("[thermometer] {c:.1} C")),
    )?;

    station.on(
        "temperature",
        ListenerFn::arc("log-temp", |c: Arc<f64>, _: Done| println!("[station] temperature {c:.1}")),
    )?;
    station.once(
        "gravity",
        ListenerFn::arc("first-gravity", |g: Arc<f64>, _: Done| println!("[station] first gravity {g:.3}")),
    )?;

    thermometer.reading(21.5)?.await;
    hydrometer.reading(1.048)?.await;
    hydrometer.reading(1.012)?.await;
    thermometer.reading(22.0)?.await;

    println!("[station] gravity listeners left: {}", station.listener_count("gravity")?);
    Ok(())
}

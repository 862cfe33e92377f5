//! # podium
//!
//! **Podium** is an in-process notification engine for Rust.
//!
//! An [`Emitter`] owns a set of declared events. Listeners subscribe to those
//! events, optionally asking the emitter to *wait* for them before the next
//! notification is delivered. Emitters can be linked so that every
//! notification of a source is forwarded to its targets, and the source only
//! considers it complete once every target finished with it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   emit("temperature", 72)          emit("gravity", 7)
//!            │                               │
//!            ▼                               ▼
//! ┌──────────────────────┐        ┌──────────────────────┐
//! │ Emitter (thermometer)│        │ Emitter (hydrometer) │
//! │  - Registry          │        │  - Registry          │
//! │  - FIFO queue        │        │  - FIFO queue        │
//! │  - drain task        │        │  - drain task        │
//! └──────┬───────────┬───┘        └───┬───────────┬──────┘
//!        │ dispatch  │ link           │ link      │ dispatch
//!        ▼           └───────┐ ┌──────┘           ▼
//!   listeners                ▼ ▼              listeners
//!                 ┌──────────────────────┐
//!                 │  Emitter (station)   │
//!                 │  sees both events    │
//!                 └──────────┬───────────┘
//!                            ▼
//!                        listeners
//! ```
//!
//! ### Delivery cycle
//! ```text
//! dispatch(notification)
//!   ├─► snapshot subscriptions of the event (registration order)
//!   ├─► for each subscription:
//!   │     ├─ spent (count reached)  ─► skip
//!   │     ├─ last firing            ─► retire from the live table
//!   │     ├─ payload = shared Arc or fresh clone (event/listener `clone` flag)
//!   │     ├─ invoke listener (panics are caught and logged)
//!   │     └─ Block::Indefinite / Timeout ─► collect wait on Done
//!   ├─► join all waits
//!   └─► completion callback (then next queued notification)
//! ```
//!
//! ## Features
//! | Area              | Description                                                      | Key types / traits                         |
//! |-------------------|------------------------------------------------------------------|--------------------------------------------|
//! | **Emitters**      | Declare events, emit payloads, await completion.                 | [`Emitter`], [`Completion`]                |
//! | **Listeners**     | Closures, custom listeners and async subscribers.                | [`Listen`], [`ListenerFn`], [`Subscribe`]  |
//! | **Blocking**      | Hold the queue until a listener signals it is done.              | [`Block`], [`Done`], [`SubscribeOptions`]  |
//! | **Linking**       | Forward notifications from source emitters to a target emitter.  | [`Emitter::register_podium`]               |
//! | **Composition**   | Give host types the emitter API.                                 | [`HasEmitter`]                             |
//! | **Errors**        | Typed precondition errors.                                       | [`PodiumError`]                            |
//! | **Configuration** | Emitter name and queue sizing.                                   | [`Config`], [`EmitterBuilder`]             |
//!
//! ## Optional features
//! - `logging`: exports [`LogListener`], a listener that logs every payload through `tracing`.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use podium::{Block, Done, Emitter, ListenerFn, SubscribeOptions};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let thermometer: Emitter<i32> = Emitter::builder()
//!         .with_name("thermometer")
//!         .with_events(["temperature"])
//!         .build()?;
//!
//!     // Hold the queue until the reading was stored.
//!     thermometer.on_with(
//!         "temperature",
//!         SubscribeOptions::new().with_block(Block::millis(100)),
//!         ListenerFn::arc("store", |celsius: Arc<i32>, done: Done| {
//!             println!("stored {celsius}");
//!             done.finish();
//!         }),
//!     )?;
//!
//!     thermometer.emit("temperature", 21)?.await;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod host;
mod subscribers;

#[cfg(test)]
mod testkit;

// ---- Public re-exports ----

pub use core::{Config, Emitter, EmitterBuilder, Payload};
pub use error::PodiumError;
pub use events::{Completion, EventSpec, Registration};
pub use host::HasEmitter;
pub use subscribers::{AsyncListener, Block, Done, Listen, ListenerFn, ListenerRef, Subscribe, SubscribeOptions};

// Optional: a listener that logs every payload.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogListener;

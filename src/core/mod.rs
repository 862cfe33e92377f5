//! Engine core: emitters, queueing, dispatch and linking.
//!
//! The public API from this module is [`Emitter`] (plus its [`Config`] and
//! [`EmitterBuilder`]).
//!
//! Internal modules:
//! - [`registry`]: known events and their subscription tables;
//! - [`queue`]: per-emitter FIFO and the drain loop;
//! - [`dispatch`]: one notification's delivery cycle;
//! - [`link`]: source → target links and completion fan-out;
//! - [`builder`]: emitter construction with configuration.
//!
//! ```text
//! emit ──► submit ──► distribute (links?) ──► enqueue ──► drain ──► dispatch ──► complete
//!                                                                                  │
//!                                       fan-out to link targets (recursive) ◄──────┘
//! ```

mod builder;
mod config;
mod dispatch;
mod emitter;
mod link;
mod queue;
mod registry;

pub use builder::EmitterBuilder;
pub use config::Config;
pub use emitter::{Emitter, Payload};

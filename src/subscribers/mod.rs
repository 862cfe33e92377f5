//! Listener side of the engine.
//!
//! ## Contents
//! - [`Listen`], [`ListenerFn`], [`ListenerRef`] synchronous listeners
//! - [`Subscribe`], [`AsyncListener`] async listeners run as spawned tasks
//! - [`Done`] one-shot finished signal for blocking subscriptions
//! - [`SubscribeOptions`], [`Block`] per-registration options
//! - `SubscriptionTable` the live, ordered registrations of one event
//!
//! ## Implementing a custom listener
//! ```no_run
//! use std::sync::Arc;
//! use podium::{Done, Listen};
//!
//! struct Counter;
//!
//! impl Listen<u64> for Counter {
//!     fn on_event(&self, data: Arc<u64>, done: Done) {
//!         let _ = data;
//!         done.finish();
//!     }
//! }
//! ```

mod done;
mod listener;
#[cfg(feature = "logging")]
mod log;
mod options;
mod subscribe;
mod subscription;

pub use done::Done;
pub use listener::{Listen, ListenerFn, ListenerRef};
#[cfg(feature = "logging")]
pub use log::LogListener;
pub use options::{Block, SubscribeOptions};
pub use subscribe::{AsyncListener, Subscribe};
pub(crate) use subscription::{Firing, Subscription, SubscriptionTable};

/// Extracts a printable message from a caught panic payload.
pub(crate) fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

//! Event declarations and in-flight notifications.
//!
//! This module groups the **data model** of one emission: what an event is
//! declared as, how it is registered, and the notification that carries it
//! through the queue.
//!
//! ## Contents
//! - [`EventSpec`] event name plus declared flags (`clone`)
//! - [`Registration`] one entry of `register_event` (a declaration or a peer emitter)
//! - [`Completion`] future resolved once a notification has fully completed
//!
//! ## Quick reference
//! ```text
//! emit(event, data) ──► Notification { event, data: Arc<T>, complete }
//!                          └─► queue ──► dispatch ──► complete() ──► Completion resolves
//! ```

mod notification;
mod registration;
mod spec;

pub(crate) use notification::{Notification, OnComplete};
pub use notification::Completion;
pub use registration::Registration;
pub use spec::EventSpec;

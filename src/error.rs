//! Error types used by the podium engine.
//!
//! Every variant of [`PodiumError`] is a precondition violation detected
//! synchronously at the call that caused it. The engine never retries and never
//! mutates registries or queues before returning one of these.
//!
//! Helper methods (`as_label`, `event`) are provided for logs/metrics.

use std::sync::Arc;
use thiserror::Error;

/// # Errors produced by the notification engine.
///
/// Failures inside listeners are not part of this taxonomy: a panicking listener is
/// isolated and logged, it never surfaces as a `PodiumError`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PodiumError {
    /// The event name is not registered on this emitter.
    #[error("unknown event {event}")]
    UnknownEvent {
        /// The offending event name.
        event: Arc<str>,
    },

    /// The event name is already registered on this emitter (or repeated inside one batch).
    #[error("event {event} exists")]
    DuplicateEvent {
        /// The offending event name.
        event: Arc<str>,
    },

    /// A subscription option carries an invalid value.
    #[error("invalid {option} option for {event}: {reason}")]
    InvalidOption {
        /// Event the listener was being registered for.
        event: Arc<str>,
        /// Name of the rejected option.
        option: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },

    /// An event registration carried an empty name.
    #[error("missing event name")]
    MissingEventName,

    /// `emit` was called outside of a tokio runtime, so nothing could drive the queue.
    #[error("no tokio runtime available to dispatch notifications")]
    NoRuntime,
}

impl PodiumError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use podium::PodiumError;
    ///
    /// let err = PodiumError::UnknownEvent { event: "tick".into() };
    /// assert_eq!(err.as_label(), "podium_unknown_event");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            PodiumError::UnknownEvent { .. } => "podium_unknown_event",
            PodiumError::DuplicateEvent { .. } => "podium_duplicate_event",
            PodiumError::InvalidOption { .. } => "podium_invalid_option",
            PodiumError::MissingEventName => "podium_missing_event_name",
            PodiumError::NoRuntime => "podium_no_runtime",
        }
    }

    /// Returns the event name involved in the error, if any.
    pub fn event(&self) -> Option<&str> {
        match self {
            PodiumError::UnknownEvent { event }
            | PodiumError::DuplicateEvent { event }
            | PodiumError::InvalidOption { event, .. } => Some(event),
            PodiumError::MissingEventName | PodiumError::NoRuntime => None,
        }
    }

    pub(crate) fn unknown(event: &str) -> Self {
        PodiumError::UnknownEvent {
            event: Arc::from(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(PodiumError::MissingEventName.as_label(), "podium_missing_event_name");
        assert_eq!(PodiumError::NoRuntime.as_label(), "podium_no_runtime");
        assert_eq!(
            PodiumError::DuplicateEvent { event: "a".into() }.as_label(),
            "podium_duplicate_event"
        );
    }

    #[test]
    fn test_display_names_the_event() {
        let err = PodiumError::unknown("temperature");
        assert_eq!(err.to_string(), "unknown event temperature");
        assert_eq!(err.event(), Some("temperature"));

        let err = PodiumError::InvalidOption {
            event: "a".into(),
            option: "count",
            reason: "must be greater than zero",
        };
        assert_eq!(
            err.to_string(),
            "invalid count option for a: must be greater than zero"
        );
        assert_eq!(PodiumError::MissingEventName.event(), None);
    }
}

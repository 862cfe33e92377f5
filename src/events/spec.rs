//! # Event declaration.
//!
//! An [`EventSpec`] names one event and carries its declared behavior. Today the
//! only flag is `clone`: when set, every listener receives its own copy of the
//! payload instead of the shared `Arc`.
//!
//! ## Example
//! ```rust
//! use podium::EventSpec;
//!
//! let spec = EventSpec::new("reading").with_clone(true);
//! assert_eq!(spec.name(), "reading");
//! assert!(spec.clones());
//! ```

use std::sync::Arc;

/// Name and flags of one event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventSpec {
    name: Arc<str>,
    clone: bool,
}

impl EventSpec {
    /// Declares an event with default flags (payload shared, not cloned).
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            clone: false,
        }
    }

    /// Sets whether payloads are cloned for every listener by default.
    #[inline]
    pub fn with_clone(mut self, clone: bool) -> Self {
        self.clone = clone;
        self
    }

    /// Returns the event name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if payloads are cloned for every listener.
    #[inline]
    pub fn clones(&self) -> bool {
        self.clone
    }

    #[inline]
    pub(crate) fn key(&self) -> &Arc<str> {
        &self.name
    }
}

impl From<&str> for EventSpec {
    fn from(name: &str) -> Self {
        EventSpec::new(name)
    }
}

impl From<String> for EventSpec {
    fn from(name: String) -> Self {
        EventSpec::new(name)
    }
}

impl From<Arc<str>> for EventSpec {
    fn from(name: Arc<str>) -> Self {
        EventSpec::new(name)
    }
}

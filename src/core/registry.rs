//! # Event registry - per-emitter map of known events.
//!
//! Maps every known event name to its [`EventConfig`]: the declared flags and
//! the live [`SubscriptionTable`].
//!
//! ## Rules
//! - One name maps to one config for the lifetime of the emitter; there is no
//!   redefinition path.
//! - Explicit registration of an existing name is an error ([`validate`](Registry::validate)).
//! - Names arriving through links are **adopted**: inserted if absent, never
//!   overwriting existing flags.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::PodiumError;
use crate::events::EventSpec;
use crate::subscribers::SubscriptionTable;

/// Flags and subscribers of one event.
pub(crate) struct EventConfig<T> {
    pub(crate) spec: EventSpec,
    pub(crate) table: SubscriptionTable<T>,
}

/// Known events of one emitter.
pub(crate) struct Registry<T> {
    events: HashMap<Arc<str>, EventConfig<T>>,
}

impl<T> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            events: HashMap::new(),
        }
    }

    /// Checks a batch of new declarations without touching the registry.
    ///
    /// Fails on an empty name, a name already known, or a name repeated inside the batch.
    pub(crate) fn validate(&self, specs: &[EventSpec]) -> Result<(), PodiumError> {
        for (idx, spec) in specs.iter().enumerate() {
            if spec.name().is_empty() {
                return Err(PodiumError::MissingEventName);
            }
            let repeated = specs[..idx].iter().any(|s| s.name() == spec.name());
            if repeated || self.events.contains_key(spec.name()) {
                return Err(PodiumError::DuplicateEvent {
                    event: Arc::clone(spec.key()),
                });
            }
        }
        Ok(())
    }

    /// Inserts a declaration if the name is unknown; returns true if it was inserted.
    pub(crate) fn adopt(&mut self, spec: &EventSpec) -> bool {
        if self.events.contains_key(spec.name()) {
            return false;
        }
        self.events.insert(
            Arc::clone(spec.key()),
            EventConfig {
                spec: spec.clone(),
                table: SubscriptionTable::new(),
            },
        );
        true
    }

    pub(crate) fn contains(&self, event: &str) -> bool {
        self.events.contains_key(event)
    }

    pub(crate) fn get(&self, event: &str) -> Result<&EventConfig<T>, PodiumError> {
        self.events
            .get(event)
            .ok_or_else(|| PodiumError::unknown(event))
    }

    pub(crate) fn get_mut(&mut self, event: &str) -> Result<&mut EventConfig<T>, PodiumError> {
        self.events
            .get_mut(event)
            .ok_or_else(|| PodiumError::unknown(event))
    }

    /// Returns the shared name of a known event.
    pub(crate) fn key(&self, event: &str) -> Option<Arc<str>> {
        self.events.get_key_value(event).map(|(k, _)| Arc::clone(k))
    }

    /// All declarations, in no particular order.
    pub(crate) fn specs(&self) -> Vec<EventSpec> {
        self.events.values().map(|cfg| cfg.spec.clone()).collect()
    }

    /// Sorted list of known event names.
    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().map(|k| k.to_string()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(names: &[&str]) -> Vec<EventSpec> {
        names.iter().map(|n| EventSpec::new(*n)).collect()
    }

    #[test]
    fn test_validate_then_adopt() {
        let mut reg: Registry<u32> = Registry::new();
        let batch = specs(&["a", "b"]);
        reg.validate(&batch).unwrap();
        for s in &batch {
            assert!(reg.adopt(s));
        }
        assert_eq!(reg.names(), vec!["a", "b"]);
        assert!(reg.contains("a"));
        assert!(!reg.contains("c"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg: Registry<u32> = Registry::new();
        reg.adopt(&EventSpec::new("a"));

        let err = reg.validate(&specs(&["b", "a"])).unwrap_err();
        assert_eq!(err, PodiumError::DuplicateEvent { event: "a".into() });
    }

    #[test]
    fn test_duplicate_inside_batch_rejected() {
        let reg: Registry<u32> = Registry::new();
        let err = reg.validate(&specs(&["x", "x"])).unwrap_err();
        assert_eq!(err.as_label(), "podium_duplicate_event");
    }

    #[test]
    fn test_missing_name_rejected() {
        let reg: Registry<u32> = Registry::new();
        assert_eq!(
            reg.validate(&specs(&["ok", ""])).unwrap_err(),
            PodiumError::MissingEventName
        );
    }

    #[test]
    fn test_adopt_keeps_existing_flags() {
        let mut reg: Registry<u32> = Registry::new();
        reg.adopt(&EventSpec::new("a").with_clone(true));
        assert!(!reg.adopt(&EventSpec::new("a")));
        assert!(reg.get("a").unwrap().spec.clones());
    }

    #[test]
    fn test_unknown_event() {
        let mut reg: Registry<u32> = Registry::new();
        assert_eq!(reg.get("nope").err(), Some(PodiumError::unknown("nope")));
        assert!(reg.get_mut("nope").is_err());
        assert!(reg.key("nope").is_none());
    }
}

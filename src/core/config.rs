//! # Emitter configuration.
//!
//! Provides [`Config`], the per-emitter settings used by
//! [`EmitterBuilder`](crate::EmitterBuilder) and [`Emitter::with_config`](crate::Emitter::with_config).
//!
//! There is no environment or file configuration: everything is in-memory.

use std::borrow::Cow;

/// Per-emitter configuration.
///
/// ## Field semantics
/// - `name`: label attached to every log record of this emitter (`emitter = ...`)
/// - `queue_capacity`: notifications pre-allocated in the queue (min 1; clamped)
#[derive(Clone, Debug)]
pub struct Config {
    /// Label used in logs.
    pub name: Cow<'static, str>,

    /// Initial capacity of the notification queue.
    ///
    /// The queue grows past it as needed; this only avoids early reallocations
    /// for emitters that are known to see bursts.
    pub queue_capacity: usize,
}

impl Config {
    /// Default configuration with a custom name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `name = "podium"`
    /// - `queue_capacity = 16`
    fn default() -> Self {
        Self {
            name: Cow::Borrowed("podium"),
            queue_capacity: 16,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_keeps_defaults() {
        let cfg = Config::named("sensors");
        assert_eq!(cfg.name, "sensors");
        assert_eq!(cfg.queue_capacity, 16);
    }

    #[test]
    fn test_capacity_clamped() {
        let cfg = Config {
            queue_capacity: 0,
            ..Config::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
    }
}

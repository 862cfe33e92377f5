//! # Per-subscription options.
//!
//! [`SubscribeOptions`] are validated when a listener is registered, never at
//! dispatch time.
//!
//! | Option  | Meaning                                                         | Default |
//! |---------|-----------------------------------------------------------------|---------|
//! | `count` | fire at most `n` times, then the subscription removes itself    | `None`  |
//! | `block` | wait for the listener's [`Done`](crate::Done) before finishing  | `Off`   |
//! | `clone` | give this listener its own copy of the payload                  | `false` |

use std::sync::Arc;
use std::time::Duration;

use crate::error::PodiumError;

/// Whether a dispatch cycle waits for a listener to signal it is done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Block {
    /// Fire-and-forget: the listener is finished as soon as it returns.
    #[default]
    Off,
    /// Wait until the listener finishes its [`Done`](crate::Done), however long it takes.
    ///
    /// Dropping every clone of the `Done` without calling `finish()` also counts
    /// as finished and releases the queue.
    Indefinite,
    /// Wait for the listener, but no longer than the given duration.
    Timeout(Duration),
}

impl Block {
    /// Shorthand for `Block::Timeout(Duration::from_millis(ms))`.
    #[inline]
    pub fn millis(ms: u64) -> Self {
        Block::Timeout(Duration::from_millis(ms))
    }

    /// Returns true unless this is [`Block::Off`].
    #[inline]
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Block::Off)
    }
}

/// Options accepted by `on_with` / `once_with`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Remaining number of deliveries; `None` = unlimited. Must be greater than zero.
    pub count: Option<u32>,
    /// Blocking mode.
    pub block: Block,
    /// Clone the payload for this listener even if the event does not.
    pub clone: bool,
}

impl SubscribeOptions {
    /// Default options: unlimited, non-blocking, shared payload.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    #[inline]
    pub fn with_block(mut self, block: Block) -> Self {
        self.block = block;
        self
    }

    #[inline]
    pub fn with_clone(mut self, clone: bool) -> Self {
        self.clone = clone;
        self
    }

    /// Rejects values that can never be honored.
    pub(crate) fn validate(&self, event: &str) -> Result<(), PodiumError> {
        if self.count == Some(0) {
            return Err(PodiumError::InvalidOption {
                event: Arc::from(event),
                option: "count",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}

//! # LogListener - delivery printer
//!
//! A minimal listener that logs every delivered payload through `tracing`.
//! Handy to see what flows through a linked emitter.
//!
//! ## Example output
//! ```text
//! INFO podium::subscribers::log: delivered listener="audit" payload=72
//! ```

use std::fmt::Debug;
use std::sync::Arc;

use super::{Done, Listen};

/// Payload logger listener.
#[derive(Debug, Clone)]
pub struct LogListener {
    label: &'static str,
}

impl LogListener {
    /// Construct a new [`LogListener`] reporting under `label`.
    #[must_use]
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl Default for LogListener {
    fn default() -> Self {
        Self::new("log")
    }
}

impl<T> Listen<T> for LogListener
where
    T: Debug + Send + Sync + 'static,
{
    fn on_event(&self, data: Arc<T>, done: Done) {
        tracing::info!(listener = self.label, payload = ?data, "delivered");
        done.finish();
    }

    fn name(&self) -> &str {
        self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finishes_every_delivery() {
        let l = LogListener::new("audit");
        let (done, mut rx) = Done::channel();
        Listen::<u32>::on_event(&l, Arc::new(72), done);
        assert!(rx.try_recv().is_ok());
        assert_eq!(Listen::<u32>::name(&l), "audit");
    }
}

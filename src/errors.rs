// Observable error slot.
// Holds the most recent user-facing failure message; the UI subscribes and clears it.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::warn;

/// A user-facing failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorMessage {
    pub msg: String,
}

/// Capability handed to the API client for reporting failures.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, msg: String);
}

/// Single-value error slot. Writes overwrite; clones share the same slot.
#[derive(Debug, Clone)]
pub struct ErrorSlot {
    tx: Arc<watch::Sender<Option<ErrorMessage>>>,
}

impl Default for ErrorSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorSlot {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// The current error, if any.
    pub fn current(&self) -> Option<ErrorMessage> {
        self.tx.borrow().clone()
    }

    pub fn clear(&self) {
        self.tx.send_replace(None);
    }

    /// Watch for changes made after this call.
    pub fn subscribe(&self) -> watch::Receiver<Option<ErrorMessage>> {
        self.tx.subscribe()
    }
}

impl ErrorReporter for ErrorSlot {
    fn report(&self, msg: String) {
        warn!(%msg, "error reported");
        self.tx.send_replace(Some(ErrorMessage { msg }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_overwrites_and_clear_empties() {
        let slot = ErrorSlot::new();
        assert_eq!(slot.current(), None);

        slot.report("first".to_string());
        slot.report("second".to_string());
        assert_eq!(
            slot.current(),
            Some(ErrorMessage {
                msg: "second".to_string()
            })
        );

        slot.clear();
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let slot = ErrorSlot::new();
        let other = slot.clone();

        other.report("Could not add repo foo/bar".to_string());
        assert_eq!(slot.current().unwrap().msg, "Could not add repo foo/bar");
    }

    #[test]
    fn test_subscribers_observe_changes() {
        let slot = ErrorSlot::new();
        let mut rx = slot.subscribe();
        assert!(!rx.has_changed().unwrap());

        slot.report("boom".to_string());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().clone().unwrap().msg, "boom");

        slot.clear();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_separate_slots_do_not_interfere() {
        let a = ErrorSlot::new();
        let b = ErrorSlot::new();
        a.report("only a".to_string());
        assert!(b.current().is_none());
    }
}

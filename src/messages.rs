//! Process-wide status message log.
//!
//! An append-only buffer of short status lines shown to the user. One log is
//! created at startup and cloned into every collaborator that reports
//! progress; clones share the same buffer. Entries are only ever removed all
//! at once via [`MessageLog::clear`].

use std::sync::Arc;

use tokio::sync::watch;

/// Shared, observable list of status messages in append order.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: Arc<watch::Sender<Vec<String>>>,
}

impl MessageLog {
    /// Create an empty log.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self {
            entries: Arc::new(tx),
        }
    }

    /// Append a message.
    pub fn add(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "message logged");
        self.entries.send_modify(|entries| entries.push(message));
    }

    /// Remove every message.
    pub fn clear(&self) {
        self.entries.send_modify(Vec::clear);
    }

    /// Snapshot of the current messages.
    pub fn messages(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Watch the log; the receiver is notified after every append or clear.
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.entries.subscribe()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

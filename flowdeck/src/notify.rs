//! Notification bus
//!
//! Toast rendering is owned by the UI; the sync controller only emits
//! (message, severity) events into this bus. Subscribers come and go
//! freely, and emitting with no subscribers is not an error.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use shared::{Notification, Severity};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 64;

/// Handle for emitting user-visible notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
    next_id: Arc<AtomicU64>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Subscribe to notification events.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Emit a notification.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            message: message.into(),
            severity,
        };
        // Fire-and-forget: a send error just means nobody is listening.
        let _ = self.tx.send(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, Severity::Error);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(message, Severity::Info);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

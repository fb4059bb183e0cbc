//! Session-related domain events.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default capacity of the session event bus.
const EVENT_BUS_CAPACITY: usize = 64;

/// Events related to the local session lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// A session was stored in the vault.
    SignedIn {
        /// The user ID from the stored record.
        user_id: String,
    },
    /// The session was cleared and the shell should navigate away.
    LoggedOut {
        /// Why the session ended.
        reason: String,
        /// Route the shell should navigate to.
        redirect_to: String,
    },
    /// The session reached its expiry instant.
    Expired {
        /// The user ID of the expired session, if a record was present.
        user_id: Option<String>,
    },
}

/// Broadcast bus for [`SessionEvent`]s.
///
/// Senders never block; events published with no live subscribers are
/// dropped, which is acceptable for UI-facing notifications.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Create a new event bus.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(EVENT_BUS_CAPACITY);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: SessionEvent) {
        // A send error only means nobody is listening right now.
        let _ = self.tx.send(event);
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

//! Vault event types and event bus.
//!
//! Aggregates tag-relevant vault events into a single broadcast channel.
//! The host's file-creation feed is bridged onto this bus; the controller
//! subscribes and applies the parent folder's resolved tags to each new
//! file. Consumers that fall behind receive a `Lagged` error and miss
//! events, which is acceptable for this stream.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Domain events on the vault event bus.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum VaultEvent {
    /// A new file appeared in the vault.
    FileCreated { path: String, parent: String },
    /// A folder's direct tag set was edited.
    FolderTagsChanged {
        path: String,
        added: Vec<String>,
        removed: Vec<String>,
    },
}

impl VaultEvent {
    /// Namespaced event type name (e.g., `"file.created"`).
    pub fn event_type(&self) -> &'static str {
        match self {
            VaultEvent::FileCreated { .. } => "file.created",
            VaultEvent::FolderTagsChanged { .. } => "folder.tags_changed",
        }
    }

    /// Vault path this event relates to.
    pub fn path(&self) -> &str {
        match self {
            VaultEvent::FileCreated { path, .. } => path,
            VaultEvent::FolderTagsChanged { path, .. } => path,
        }
    }
}

/// Envelope carrying event identity and timing around a [`VaultEvent`].
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Namespaced event type (e.g., `"file.created"`).
    pub event_type: String,
    /// When the event occurred (UTC).
    pub occurred_at: DateTime<Utc>,
    /// Domain-specific event data.
    pub payload: VaultEvent,
}

impl EventEnvelope {
    pub fn new(event: VaultEvent) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event.event_type().to_string(),
            occurred_at: Utc::now(),
            payload: event,
        }
    }
}

/// Broadcast-based event bus for distributing vault events.
pub struct VaultEventBus {
    tx: broadcast::Sender<EventEnvelope>,
}

impl VaultEventBus {
    /// Create a new event bus with the given buffer capacity.
    ///
    /// Recommended: [`crate::defaults::EVENT_BUS_CAPACITY`] for production,
    /// 32 for tests.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers.
    ///
    /// If there are no active subscribers, the event is silently dropped.
    pub fn emit(&self, event: VaultEvent) {
        let envelope = EventEnvelope::new(event);
        tracing::debug!(
            event_type = %envelope.event_type,
            event_id = %envelope.event_id,
            subscriber_count = self.tx.receiver_count(),
            "VaultEventBus emit"
        );
        let _ = self.tx.send(envelope);
    }

    /// Subscribe to receive enveloped events. Each subscriber gets its own
    /// independent stream.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.tx.subscribe()
    }

    /// Returns the number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

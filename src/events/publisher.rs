use crate::constants::DEFAULT_EVENT_CAPACITY;
use serde_json::Value;
use tokio::sync::broadcast;

use super::types::LifecycleEvent;

/// In-process publisher for configuration lifecycle events.
///
/// The UI host subscribes to refresh tables and banners when the engine or
/// session changes something it renders. Publishing with no subscribers is
/// fine: the engine does not care whether anyone is listening.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event that has been published
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub name: String,
    pub context: Value,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event with the given name and JSON context
    pub async fn publish(
        &self,
        event_name: impl Into<String>,
        context: Value,
    ) -> Result<(), PublishError> {
        let event = PublishedEvent {
            name: event_name.into(),
            context,
            published_at: chrono::Utc::now(),
        };

        match self.sender.send(event) {
            Ok(_) => Ok(()),
            // No subscribers; acceptable for fire-and-forget lifecycle events
            Err(broadcast::error::SendError(_)) => Ok(()),
        }
    }

    /// Publish a typed lifecycle event under its canonical event name
    pub async fn publish_lifecycle(&self, event: &LifecycleEvent) -> Result<(), PublishError> {
        let context = serde_json::to_value(event)?;
        self.publish(event.event_name(), context).await
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Error types for event publishing
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Event channel is closed")]
    ChannelClosed,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

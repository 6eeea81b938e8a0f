//! Event dispatcher: attribute filter, decode, handler routing.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::domain::{DomainError, EVENT_TYPE_KEY, STATUS_UPDATED_EVENT, StatusChangeMessage};
use crate::ports::ReceivedMessage;

/// Result of inspecting a message's `EventType` transport attribute.
///
/// The three branches are explicit so each can be tested independently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTypeMatch {
    /// Attribute absent.
    Missing,
    /// Attribute present but carries another event type.
    Mismatched(String),
    /// Attribute equals the expected literal.
    Matched,
}

/// Inspect the `EventType` attribute of a received message.
pub fn match_event_type(message: &ReceivedMessage) -> EventTypeMatch {
    match message.attributes.get(EVENT_TYPE_KEY) {
        None => EventTypeMatch::Missing,
        Some(attribute) if attribute.value == STATUS_UPDATED_EVENT => EventTypeMatch::Matched,
        Some(attribute) => EventTypeMatch::Mismatched(attribute.value.clone()),
    }
}

/// Terminal failure while processing one message.
///
/// The consumer loop logs these and deletes the message anyway, so every
/// message gets exactly one processing attempt.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("failed to decode message {message_id}")]
    Decode {
        message_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("handler failed for message {message_id}")]
    Handler {
        message_id: String,
        #[source]
        source: DomainError,
    },
}

/// Business handler for a decoded status-change message.
///
/// Seam between transport-level filtering and business intent; tests plug in
/// counting fakes here.
#[async_trait]
pub trait StatusChangeHandler: Send + Sync {
    async fn handle(&self, message: StatusChangeMessage) -> Result<(), DomainError>;
}

/// Routes received messages to the registered handler.
///
/// Filter decisions (missing or mismatched event type) are informational and
/// return `Ok`; only decode and handler failures surface as errors, and the
/// dispatcher never touches the queue itself.
pub struct EventDispatcher {
    handler: Arc<dyn StatusChangeHandler>,
}

impl EventDispatcher {
    pub fn new(handler: Arc<dyn StatusChangeHandler>) -> Self {
        Self { handler }
    }

    pub async fn dispatch(&self, message: &ReceivedMessage) -> Result<(), ProcessingError> {
        match match_event_type(message) {
            EventTypeMatch::Missing => {
                info!(message_id = %message.id, "event type attribute not found, skipping");
                Ok(())
            }
            EventTypeMatch::Mismatched(other) => {
                info!(
                    message_id = %message.id,
                    event_type = %other,
                    "different event type, skipping"
                );
                Ok(())
            }
            EventTypeMatch::Matched => {
                let decoded: StatusChangeMessage = serde_json::from_str(&message.body)
                    .map_err(|source| ProcessingError::Decode {
                        message_id: message.id.clone(),
                        source,
                    })?;

                self.handler
                    .handle(decoded)
                    .await
                    .map_err(|source| ProcessingError::Handler {
                        message_id: message.id.clone(),
                        source,
                    })
            }
        }
    }
}

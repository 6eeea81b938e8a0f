//! Queue transport port (durable, at-least-once message queue).
//!
//! Minimum surface the pipeline needs from a managed queue service:
//! `send`, `receive` (long poll), `delete`. The transport may redeliver a
//! message that was received but not deleted; ordering is not guaranteed.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::TransportError;

/// Typed transport attribute (`{type, value}` pair, SQS style).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAttributeValue {
    pub data_type: String,
    pub value: String,
}

impl MessageAttributeValue {
    /// A `String`-typed attribute.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: "String".to_string(),
            value: value.into(),
        }
    }
}

/// One delivered message instance.
///
/// The receipt handle identifies this delivery (not the message) for
/// deletion; all transport attributes are always included.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub id: String,
    pub body: String,
    pub receipt_handle: String,
    pub attributes: HashMap<String, MessageAttributeValue>,
}

/// Queue transport port.
///
/// Shared by the publisher (writer) and the consumer (reader/deleter); the
/// transport itself guarantees atomic delivery/deletion per message, so no
/// locking is needed on this side of the seam.
#[async_trait]
pub trait QueueTransport: Send + Sync {
    /// Enqueue one message, returning its transport-assigned id.
    async fn send(
        &self,
        destination: &str,
        body: String,
        attributes: HashMap<String, MessageAttributeValue>,
    ) -> Result<String, TransportError>;

    /// Receive up to `max_messages`, long-polling up to `wait`.
    ///
    /// Returns an empty batch when the wait elapses with nothing available.
    async fn receive(
        &self,
        destination: &str,
        max_messages: usize,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, TransportError>;

    /// Remove a delivered message by its receipt handle.
    async fn delete(&self, destination: &str, receipt_handle: &str)
    -> Result<(), TransportError>;
}

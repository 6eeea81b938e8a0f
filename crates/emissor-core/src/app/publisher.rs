//! Status-change publisher.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    DomainError, EVENT_TYPE_KEY, Proposal, STATUS_UPDATED_EVENT, StatusChangeMessage,
};
use crate::ports::{MessageAttributeValue, QueueTransport};

/// Publishes one durable status-change message per call.
///
/// No batching and no retry: transport failures propagate unchanged to the
/// caller.
pub struct StatusChangePublisher {
    queue: Arc<dyn QueueTransport>,
    queue_url: String,
}

impl StatusChangePublisher {
    pub fn new(queue: Arc<dyn QueueTransport>, queue_url: impl Into<String>) -> Self {
        Self {
            queue,
            queue_url: queue_url.into(),
        }
    }

    /// Serialize a snapshot of the proposal and enqueue it with the
    /// `EventType` attribute set.
    pub async fn publish(&self, proposal: &Proposal) -> Result<(), DomainError> {
        if self.queue_url.is_empty() {
            return Err(DomainError::invalid_argument(
                "queue_url",
                "destination queue URL is not set",
            ));
        }

        let message = StatusChangeMessage::from_proposal(proposal);
        let body = serde_json::to_string(&message).map_err(DomainError::Encode)?;

        let mut attributes = HashMap::new();
        attributes.insert(
            EVENT_TYPE_KEY.to_string(),
            MessageAttributeValue::string(STATUS_UPDATED_EVENT),
        );

        let message_id = self.queue.send(&self.queue_url, body, attributes).await?;
        debug!(
            message_id = %message_id,
            proposal_id = %proposal.id(),
            status = %proposal.status(),
            "status change published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::InMemoryQueue;
    use rust_decimal::Decimal;
    use std::time::Duration;

    const QUEUE_URL: &str = "fila-propostas";

    fn proposal() -> Proposal {
        Proposal::new("Ana", "123.456.789-00", Decimal::from(500)).unwrap()
    }

    #[tokio::test]
    async fn publish_and_decode_round_trips() {
        let queue = Arc::new(InMemoryQueue::new());
        let publisher = StatusChangePublisher::new(queue.clone(), QUEUE_URL);
        let proposal = proposal();

        publisher.publish(&proposal).await.unwrap();

        let batch = queue
            .receive(QUEUE_URL, 10, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(batch.len(), 1);

        let decoded: StatusChangeMessage = serde_json::from_str(&batch[0].body).unwrap();
        assert_eq!(decoded.proposta_id, proposal.id());
        assert_eq!(decoded.status, "EmAnalise");
        assert_eq!(decoded.nome, "Ana");
        assert_eq!(decoded.cpf, "123.456.789-00");
        assert_eq!(decoded.valor_seguro, Decimal::from(500));
    }

    #[tokio::test]
    async fn publish_sets_event_type_attribute() {
        let queue = Arc::new(InMemoryQueue::new());
        let publisher = StatusChangePublisher::new(queue.clone(), QUEUE_URL);

        publisher.publish(&proposal()).await.unwrap();

        let batch = queue
            .receive(QUEUE_URL, 1, Duration::from_secs(1))
            .await
            .unwrap();
        let attribute = batch[0].attributes.get(EVENT_TYPE_KEY).unwrap();
        assert_eq!(attribute.data_type, "String");
        assert_eq!(attribute.value, STATUS_UPDATED_EVENT);
    }

    #[tokio::test]
    async fn empty_queue_url_is_rejected() {
        let queue = Arc::new(InMemoryQueue::new());
        let publisher = StatusChangePublisher::new(queue, "");

        let err = publisher.publish(&proposal()).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidArgument { field: "queue_url", .. }
        ));
    }
}

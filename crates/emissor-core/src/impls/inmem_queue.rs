//! In-memory queue transport.
//!
//! Models the receive/delete half of a managed queue: received messages move
//! to an in-flight map keyed by receipt handle and stay there until deleted.
//! No visibility timeout is simulated, so an undeleted message is not
//! redelivered; good enough for development and tests.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;
use uuid::Uuid;

use crate::domain::TransportError;
use crate::ports::{MessageAttributeValue, QueueTransport, ReceivedMessage};

#[derive(Debug, Clone)]
struct StoredMessage {
    id: String,
    body: String,
    attributes: HashMap<String, MessageAttributeValue>,
}

#[derive(Default)]
struct QueueState {
    /// Pending messages per destination.
    queues: HashMap<String, VecDeque<StoredMessage>>,

    /// Delivered but not yet deleted, keyed by receipt handle.
    in_flight: HashMap<String, StoredMessage>,
}

/// In-memory queue transport.
pub struct InMemoryQueue {
    state: Mutex<QueueState>,
    notify: Notify,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            notify: Notify::new(),
        }
    }

    /// Pending + in-flight message count, for tests that wait for drain.
    #[cfg(test)]
    pub(crate) async fn depth(&self, destination: &str) -> usize {
        let state = self.state.lock().await;
        let pending = state.queues.get(destination).map_or(0, VecDeque::len);
        pending + state.in_flight.len()
    }
}

impl Default for InMemoryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueueTransport for InMemoryQueue {
    async fn send(
        &self,
        destination: &str,
        body: String,
        attributes: HashMap<String, MessageAttributeValue>,
    ) -> Result<String, TransportError> {
        let id = Uuid::new_v4().to_string();
        {
            let mut state = self.state.lock().await;
            state
                .queues
                .entry(destination.to_string())
                .or_default()
                .push_back(StoredMessage {
                    id: id.clone(),
                    body,
                    attributes,
                });
        }
        // notify_one stores a permit, so a send racing a receive is not lost
        self.notify.notify_one();
        Ok(id)
    }

    async fn receive(
        &self,
        destination: &str,
        max_messages: usize,
        wait: Duration,
    ) -> Result<Vec<ReceivedMessage>, TransportError> {
        let deadline = Instant::now() + wait;
        loop {
            {
                let mut state = self.state.lock().await;
                let batch: Vec<StoredMessage> = state
                    .queues
                    .get_mut(destination)
                    .map(|queue| {
                        let take = max_messages.min(queue.len());
                        queue.drain(..take).collect()
                    })
                    .unwrap_or_default();

                if !batch.is_empty() {
                    let mut received = Vec::with_capacity(batch.len());
                    for message in batch {
                        let receipt_handle = Uuid::new_v4().to_string();
                        received.push(ReceivedMessage {
                            id: message.id.clone(),
                            body: message.body.clone(),
                            receipt_handle: receipt_handle.clone(),
                            attributes: message.attributes.clone(),
                        });
                        state.in_flight.insert(receipt_handle, message);
                    }
                    return Ok(received);
                }
            }

            if Instant::now() >= deadline {
                return Ok(Vec::new());
            }
            tokio::select! {
                _ = self.notify.notified() => {}
                _ = tokio::time::sleep_until(deadline) => return Ok(Vec::new()),
            }
        }
    }

    async fn delete(
        &self,
        _destination: &str,
        receipt_handle: &str,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().await;
        // Deleting an unknown receipt handle is a no-op, like the real service.
        state.in_flight.remove(receipt_handle);
        Ok(())
    }
}

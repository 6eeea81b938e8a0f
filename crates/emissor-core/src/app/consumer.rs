//! Message consumer loop.
//!
//! Long-running poll loop: receive a batch, dispatch each message, delete it
//! regardless of the processing outcome. Processing failures are logged and
//! the message is discarded, so each message gets at most one processing
//! attempt even though the transport delivers at least once. The only retry
//! path is a fixed backoff when `receive` itself fails.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::dispatcher::EventDispatcher;
use crate::ports::QueueTransport;

/// Polling parameters for the consumer loop.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub queue_url: String,

    /// Upper bound per `receive` batch.
    pub max_messages: usize,

    /// Long-poll wait per `receive`.
    pub wait: Duration,

    /// Pause after a transport-level `receive` failure.
    pub error_backoff: Duration,
}

impl ConsumerConfig {
    pub fn new(queue_url: impl Into<String>) -> Self {
        Self {
            queue_url: queue_url.into(),
            max_messages: 10,
            wait: Duration::from_secs(20),
            error_backoff: Duration::from_secs(5),
        }
    }
}

/// The consumer half of the status-change pipeline.
pub struct MessageConsumer {
    queue: Arc<dyn QueueTransport>,
    dispatcher: EventDispatcher,
    config: ConsumerConfig,
}

impl MessageConsumer {
    pub fn new(
        queue: Arc<dyn QueueTransport>,
        dispatcher: EventDispatcher,
        config: ConsumerConfig,
    ) -> Self {
        Self {
            queue,
            dispatcher,
            config,
        }
    }

    /// Spawn the loop as a background task.
    pub fn spawn(self) -> ConsumerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(async move {
            self.run(shutdown_rx).await;
        });
        ConsumerHandle { shutdown_tx, join }
    }

    async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(queue_url = %self.config.queue_url, "starting proposal message consumer");

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            // receive blocks up to the long-poll wait, so race it against
            // shutdown
            let received = tokio::select! {
                _ = shutdown_rx.changed() => continue,
                received = self.queue.receive(
                    &self.config.queue_url,
                    self.config.max_messages,
                    self.config.wait,
                ) => received,
            };

            let messages = match received {
                Ok(messages) => messages,
                Err(err) => {
                    error!(error = %err, "failed to receive messages from queue");
                    tokio::select! {
                        _ = shutdown_rx.changed() => {}
                        _ = tokio::time::sleep(self.config.error_backoff) => {}
                    }
                    continue;
                }
            };

            for message in messages {
                if let Err(err) = self.dispatcher.dispatch(&message).await {
                    error!(message_id = %message.id, error = %err, "message processing failed");
                }

                // Delete after exactly one attempt, whatever the outcome.
                if let Err(err) = self
                    .queue
                    .delete(&self.config.queue_url, &message.receipt_handle)
                    .await
                {
                    error!(message_id = %message.id, error = %err, "failed to delete message");
                }
            }
        }

        info!("proposal message consumer stopped");
    }
}

/// Handle to a spawned consumer.
pub struct ConsumerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl ConsumerHandle {
    /// Request cooperative shutdown. In-flight work finishes; nothing is
    /// rolled back.
    pub fn request_shutdown(&self) {
        // ignore send error: the loop may already have exited
        let _ = self.shutdown_tx.send(true);
    }

    /// Shutdown and wait for the loop to stop.
    pub async fn shutdown_and_join(self) {
        self.request_shutdown();
        let _ = self.join.await;
    }
}

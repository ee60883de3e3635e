//! The queue consumer loop: polls for work, decodes, dispatches to the
//! delivery state machine, and deletes or leaves messages per its outcome.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use pipeline_models::NotificationRequestMessage;
use pipeline_queue::{Delivery, Queue};

use crate::config::WorkerConfig;
use crate::metrics;
use crate::processor::{process_message, StepOutcome, WorkerContext};

pub struct Executor {
    config: WorkerConfig,
    queue: Queue<NotificationRequestMessage>,
    ctx: Arc<WorkerContext>,
    consumer_name: String,
}

impl Executor {
    pub fn new(config: WorkerConfig, queue: Queue<NotificationRequestMessage>, ctx: Arc<WorkerContext>) -> Self {
        Self {
            config,
            queue,
            ctx,
            consumer_name: format!("notification-worker-{}", Uuid::new_v4()),
        }
    }

    pub async fn run(&self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        self.queue.init().await.expect("failed to initialize queue consumer group");

        let mut claim_interval = tokio::time::interval(self.config.claim_interval);
        claim_interval.tick().await;

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("shutdown signal received, stopping executor");
                        break;
                    }
                }
                _ = claim_interval.tick() => {
                    self.claim_stale().await;
                }
                result = self.queue.receive(&self.consumer_name, self.config.poll_count, self.config.poll_block) => {
                    match result {
                        Ok(deliveries) => self.handle_deliveries(deliveries).await,
                        Err(e) => {
                            error!("failed to receive from queue: {e}");
                            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                        }
                    }
                }
            }
        }
    }

    async fn claim_stale(&self) {
        match self.queue.claim_stale(&self.consumer_name, self.config.poll_count).await {
            Ok(deliveries) if !deliveries.is_empty() => {
                info!("reclaimed {} stale message(s)", deliveries.len());
                self.handle_deliveries(deliveries).await;
            }
            Ok(_) => {}
            Err(e) => warn!("failed to claim stale messages: {e}"),
        }
    }

    async fn handle_deliveries(&self, deliveries: Vec<Delivery<NotificationRequestMessage>>) {
        for delivery in deliveries {
            match delivery {
                Delivery::Undecodable { message_id, raw_error } => {
                    warn!("dropping undecodable message {message_id}: {raw_error}");
                    metrics::record_undecodable();
                    if let Err(e) = self.queue.delete(&message_id).await {
                        error!("failed to delete undecodable message {message_id}: {e}");
                    }
                }
                Delivery::Message { message_id, payload } => {
                    match process_message(&self.ctx, payload).await {
                        Ok(StepOutcome::Terminal) => {
                            if let Err(e) = self.queue.delete(&message_id).await {
                                error!("failed to delete message {message_id}: {e}");
                            }
                        }
                        Err(e) => {
                            warn!("message {message_id} left for redelivery: {e}");
                        }
                    }
                }
            }
        }
    }
}

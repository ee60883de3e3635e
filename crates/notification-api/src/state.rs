//! Application state.

use std::sync::Arc;

use pipeline_models::NotificationRequestMessage;
use pipeline_queue::{Queue, QueueConfig};

use crate::config::ServiceConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub queue: Arc<Queue<NotificationRequestMessage>>,
}

impl AppState {
    pub async fn new(config: ServiceConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let queue_config = QueueConfig::from_env(
            "NOTIFICATION_QUEUE_STREAM",
            "notification-requests",
            "NOTIFICATION_QUEUE_GROUP",
            "notification-workers",
        );
        let queue = Queue::new(queue_config)?;
        queue.init().await?;

        Ok(Self {
            config,
            queue: Arc::new(queue),
        })
    }
}

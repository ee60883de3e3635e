//! Application state.

use std::sync::Arc;

use pipeline_docstore::{FirestoreClient, VideoJobRepository};
use pipeline_queue::{Queue, QueueConfig};
use pipeline_storage::ObjectStoreClient;

use pipeline_models::VideoProcessingMessage;

use crate::config::ApiConfig;
use crate::token_client::TokenClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub storage: Arc<ObjectStoreClient>,
    pub jobs: Arc<VideoJobRepository>,
    pub queue: Arc<Queue<VideoProcessingMessage>>,
    pub token_client: Arc<TokenClient>,
}

impl AppState {
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let storage = ObjectStoreClient::from_env().await?;
        let firestore = FirestoreClient::from_env().await?;
        let jobs = VideoJobRepository::new(firestore);

        let queue_config = QueueConfig::from_env(
            "VIDEO_QUEUE_STREAM",
            "video-processing",
            "VIDEO_QUEUE_GROUP",
            "video-workers",
        );
        let queue = Queue::new(queue_config)?;
        queue.init().await?;

        let token_client = TokenClient::new(config.credential_service_url.clone());

        Ok(Self {
            config,
            storage: Arc::new(storage),
            jobs: Arc::new(jobs),
            queue: Arc::new(queue),
            token_client: Arc::new(token_client),
        })
    }
}

//! Application state.

use std::sync::Arc;

use pipeline_docstore::{FirestoreClient, UserRepository};

use crate::config::ServiceConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: ServiceConfig,
    pub users: Arc<UserRepository>,
}

impl AppState {
    pub async fn new(config: ServiceConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let firestore = FirestoreClient::from_env().await?;
        let users = UserRepository::new(firestore);

        Ok(Self {
            config,
            users: Arc::new(users),
        })
    }
}

//! Notification worker binary.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipeline_docstore::{FirestoreClient, NotificationRepository};
use pipeline_queue::{Queue, QueueConfig};

use notification_worker::{Executor, HttpEmailRelay, WorkerConfig, WorkerContext};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive("notification_worker=info".parse().unwrap()))
        .init();

    info!("starting notification-worker");

    let config = WorkerConfig::from_env();

    let firestore = FirestoreClient::from_env().await.unwrap_or_else(|e| {
        error!("failed to create document store client: {e}");
        std::process::exit(1);
    });
    let notifications = NotificationRepository::new(firestore);

    let queue_config = QueueConfig::from_env(
        "NOTIFICATION_QUEUE_STREAM",
        "notification-requests",
        "NOTIFICATION_QUEUE_GROUP",
        "notification-workers",
    );
    let queue = Queue::new(queue_config).unwrap_or_else(|e| {
        error!("failed to create queue client: {e}");
        std::process::exit(1);
    });

    let ctx = Arc::new(WorkerContext {
        notifications: Arc::new(notifications),
        relay: Arc::new(HttpEmailRelay::new(config.email_relay_url.clone())),
    });

    tokio::spawn(notification_worker::metrics::serve(config.metrics_port));

    let executor = Executor::new(config, queue, ctx);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal");
        shutdown_tx.send(true).ok();
    });

    executor.run(shutdown_rx).await;

    info!("worker shutdown complete");
}

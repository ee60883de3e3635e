//! Video processing worker binary.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pipeline_docstore::{FirestoreClient, VideoJobRepository};
use pipeline_queue::{Queue, QueueConfig};
use pipeline_storage::ObjectStoreClient;

use video_worker::{Executor, NotifyClient, WorkerConfig, WorkerContext};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("failed to install rustls crypto provider");

    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(EnvFilter::from_default_env().add_directive("video_worker=info".parse().unwrap()))
        .init();

    info!("starting video-worker");

    let config = WorkerConfig::from_env();

    let storage = ObjectStoreClient::from_env().await.unwrap_or_else(|e| {
        error!("failed to create object store client: {e}");
        std::process::exit(1);
    });
    let firestore = FirestoreClient::from_env().await.unwrap_or_else(|e| {
        error!("failed to create document store client: {e}");
        std::process::exit(1);
    });
    let jobs = VideoJobRepository::new(firestore);

    let queue_config = QueueConfig::from_env(
        "VIDEO_QUEUE_STREAM",
        "video-processing",
        "VIDEO_QUEUE_GROUP",
        "video-workers",
    );
    let queue = Queue::new(queue_config).unwrap_or_else(|e| {
        error!("failed to create queue client: {e}");
        std::process::exit(1);
    });

    let ctx = Arc::new(WorkerContext {
        storage: Arc::new(storage),
        jobs: Arc::new(jobs),
        notify: Arc::new(NotifyClient::new(config.notification_service_url.clone())),
        work_dir: std::path::PathBuf::from(&config.work_dir),
    });
    tokio::fs::create_dir_all(&ctx.work_dir).await.ok();

    tokio::spawn(video_worker::metrics::serve(config.metrics_port));

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

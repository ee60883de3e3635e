//! Worker configuration.

use std::time::Duration;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// How many messages to request per poll.
    pub poll_count: usize,
    /// Long-poll block duration per receive call.
    pub poll_block: Duration,
    /// How often the stale-message claim sweep runs.
    pub claim_interval: Duration,
    /// Scratch directory for frame extraction.
    pub work_dir: String,
    /// Base URL of the notification service.
    pub notification_service_url: String,
    pub metrics_port: u16,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_count: 10,
            poll_block: Duration::from_secs(20),
            claim_interval: Duration::from_secs(60),
            work_dir: "/tmp/video-worker".to_string(),
            notification_service_url: "http://localhost:8082".to_string(),
            metrics_port: 9091,
        }
    }
}

impl WorkerConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            poll_count: std::env::var("WORKER_POLL_COUNT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.poll_count),
            poll_block: Duration::from_secs(
                std::env::var("WORKER_POLL_BLOCK_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(20),
            ),
            claim_interval: Duration::from_secs(
                std::env::var("WORKER_CLAIM_INTERVAL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            work_dir: std::env::var("WORKER_WORK_DIR").unwrap_or(default.work_dir),
            notification_service_url: std::env::var("MS_NOTIFY_URL").unwrap_or(default.notification_service_url),
            metrics_port: std::env::var("METRICS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.metrics_port),
        }
    }
}

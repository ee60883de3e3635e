//! Worker configuration.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub poll_count: usize,
    pub poll_block: Duration,
    pub claim_interval: Duration,
    /// Base URL of the email relay (out of scope per the design: any HTTP
    /// transactional-email provider can sit behind this).
    pub email_relay_url: String,
    pub metrics_port: u16,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_count: 10,
            poll_block: Duration::from_secs(20),
            claim_interval: Duration::from_secs(60),
            email_relay_url: "http://localhost:8083".to_string(),
            metrics_port: 9092,
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
            email_relay_url: std::env::var("EMAIL_RELAY_URL").unwrap_or(default.email_relay_url),
            metrics_port: std::env::var("METRICS_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.metrics_port),
        }
    }
}

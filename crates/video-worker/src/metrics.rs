//! Prometheus metrics for the video processing worker.

use axum::routing::get;
use axum::Router;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

mod names {
    pub const STEPS_TOTAL: &str = "video_worker_steps_total";
    pub const MESSAGES_UNDECODABLE: &str = "video_worker_messages_undecodable_total";
}

pub fn record_step(step: &str) {
    counter!(names::STEPS_TOTAL, "step" => step.to_string()).increment(1);
}

pub fn record_undecodable() {
    counter!(names::MESSAGES_UNDECODABLE).increment(1);
}

/// Installs the process-wide recorder and serves `/metrics` on its own
/// listener — the worker has no other HTTP surface.
pub async fn serve(port: u16) {
    let handle: PrometheusHandle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install prometheus recorder");

    let app = Router::new().route("/metrics", get(move || async move { handle.render() }));
    let addr = format!("0.0.0.0:{port}");

    match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => {
            info!("worker metrics listening on {addr}");
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("metrics server error: {e}");
            }
        }
        Err(e) => tracing::error!("failed to bind metrics listener on {addr}: {e}"),
    }
}

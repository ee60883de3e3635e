//! Prometheus metrics for the notification worker.

use axum::routing::get;
use axum::Router;
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

mod names {
    pub const DELIVERIES_TOTAL: &str = "notification_worker_deliveries_total";
    pub const MESSAGES_UNDECODABLE: &str = "notification_worker_messages_undecodable_total";
}

pub fn record_delivery(delivered: bool) {
    let outcome = if delivered { "success" } else { "failure" }.to_string();
    counter!(names::DELIVERIES_TOTAL, "outcome" => outcome).increment(1);
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

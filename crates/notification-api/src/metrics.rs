//! Prometheus metrics for the notification service ingress.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install prometheus recorder")
}

mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "notification_api_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "notification_api_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "notification_api_http_requests_in_flight";
    pub const NOTIFICATIONS_ACCEPTED_TOTAL: &str = "notification_api_notifications_accepted_total";
}

pub fn record_accepted() {
    counter!(names::NOTIFICATIONS_ACCEPTED_TOTAL).increment(1);
}

/// Metrics middleware: in-flight gauge, request counter, duration histogram.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);
    let response = next.run(request).await;
    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16().to_string();
    let duration = start.elapsed().as_secs_f64();

    let labels = [("method", method), ("path", path), ("status", status)];
    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration);

    response
}

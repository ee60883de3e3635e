//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::config::MAX_UPLOAD_BYTES;
use crate::handlers::{download, health, list, upload};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let video_routes = Router::new()
        .route("/video/upload", axum::routing::post(upload))
        .route("/video/list", get(list))
        .route("/video/download", get(download))
        .route("/video/health", get(health))
        // Deliberately above MAX_UPLOAD_BYTES: a real multipart body carrying
        // a file of exactly that size is itself larger once boundary/header
        // framing is counted. Set any tighter and axum's own body-limit
        // rejection fires before upload()'s oversize check ever runs,
        // swallowing the spec-mandated "file exceeds maximum size" message.
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024));

    let health_routes = Router::new().route("/health", get(health));

    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(video_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

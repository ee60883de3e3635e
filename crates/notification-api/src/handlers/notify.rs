//! Notification ingress handler: validates, enqueues, returns immediately.
//! No durable row is written here — the worker is the sole writer of the
//! delivery outcome.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use pipeline_models::NotificationRequestMessage;

use crate::error::{ServiceError, ServiceResult};
use crate::metrics::record_accepted;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NotificationRequest {
    pub subject: String,
    pub to: Vec<String>,
    pub html: String,
}

#[derive(Serialize)]
pub struct NotifyResponse {
    pub message: &'static str,
}

pub async fn notify(
    State(state): State<AppState>,
    Json(req): Json<NotificationRequest>,
) -> ServiceResult<(StatusCode, Json<NotifyResponse>)> {
    if req.subject.trim().is_empty() || req.to.is_empty() || req.html.trim().is_empty() {
        return Err(ServiceError::invalid_input("subject, to, and html are required"));
    }

    let message = NotificationRequestMessage {
        subject: req.subject,
        to: req.to,
        html: req.html,
    };

    let idempotency_key = Uuid::new_v4().to_string();
    state.queue.enqueue(&message, &idempotency_key).await.map_err(|e| {
        warn!("failed to enqueue notification request: {e}");
        ServiceError::Queue(e)
    })?;

    record_accepted();
    Ok((
        StatusCode::ACCEPTED,
        Json(NotifyResponse {
            message: "Notification request accepted",
        }),
    ))
}

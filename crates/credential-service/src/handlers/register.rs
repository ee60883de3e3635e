//! Registration handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pipeline_models::{User, UserSummary};
use serde::Deserialize;

use crate::error::{ServiceError, ServiceResult};
use crate::metrics;
use crate::password::hash_password;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ServiceResult<(StatusCode, Json<UserSummary>)> {
    if req.email.trim().is_empty() || req.password.is_empty() || req.name.trim().is_empty() {
        metrics::record_register("invalid-input");
        return Err(ServiceError::invalid_input("email, password, and name are required"));
    }

    if state.users.find_by_email(&req.email).await?.is_some() {
        metrics::record_register("email-conflict");
        return Err(ServiceError::EmailConflict);
    }

    let password_hash = hash_password(req.password)
        .await
        .map_err(ServiceError::Internal)?;

    let user = User::new(req.email, password_hash, req.name);
    state.users.create(&user).await?;

    metrics::record_register("created");
    Ok((StatusCode::CREATED, Json(user.public_summary())))
}

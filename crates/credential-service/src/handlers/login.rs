//! Login handler.

use axum::extract::State;
use axum::Json;
use pipeline_models::UserSummary;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};
use crate::metrics;
use crate::password::{verify_dummy, verify_password};
use crate::state::AppState;
use crate::token::issue;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub user: UserSummary,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ServiceResult<Json<LoginResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        metrics::record_login("invalid-input");
        return Err(ServiceError::invalid_input("email and password are required"));
    }

    let found = state.users.find_by_email(&req.email).await?;

    // Always pay the Argon2 cost, whether or not the user exists, so the two
    // failure cases are indistinguishable in both response and timing.
    let verified = match &found {
        Some(user) => verify_password(req.password, user.password_hash.clone()).await,
        None => {
            verify_dummy(req.password).await;
            false
        }
    };

    let user = match (found, verified) {
        (Some(user), true) => user,
        _ => {
            metrics::record_login("invalid-credentials");
            return Err(ServiceError::InvalidCredentials);
        }
    };

    let issued = issue(&user.id, &user.email, &state.config.jwt_secret, state.config.jwt_expiration_hours)
        .map_err(ServiceError::Internal)?;

    metrics::record_login("success");
    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
        user: user.public_summary(),
    }))
}

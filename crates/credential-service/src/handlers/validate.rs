//! Token validation handler. Never touches the user store — the token is
//! self-contained.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::token::verify;

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Always returns 200; any parse/signature/expiry failure is reported as
/// `{valid:false}`, never as an error response.
pub async fn validate(State(state): State<AppState>, Json(req): Json<ValidateRequest>) -> Json<ValidateResponse> {
    match verify(&req.token, &state.config.jwt_secret) {
        Some(claims) => Json(ValidateResponse {
            valid: true,
            user_id: Some(claims.user_id),
            email: Some(claims.email),
        }),
        None => Json(ValidateResponse {
            valid: false,
            user_id: None,
            email: None,
        }),
    }
}

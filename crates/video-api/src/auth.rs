//! Bearer-token extraction and validation as an Axum extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;
use crate::token_client::AuthenticatedUser;

#[derive(Serialize)]
struct UnauthorizedBody {
    message: &'static str,
}

fn unauthorized() -> (StatusCode, Json<UnauthorizedBody>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(UnauthorizedBody {
            message: "unauthorized",
        }),
    )
}

/// Extracts and validates the `Authorization: Bearer <token>` header,
/// injecting `user_id`/`email` into the handler. Any failure mode —
/// missing header, malformed header, or a token the credential service
/// rejects — surfaces as a generic 401.
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, Json<UnauthorizedBody>);

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(unauthorized)?;

        let token = header.strip_prefix("Bearer ").ok_or_else(unauthorized)?;
        if token.is_empty() {
            return Err(unauthorized());
        }

        state.token_client.validate(token).await.ok_or_else(unauthorized)
    }
}

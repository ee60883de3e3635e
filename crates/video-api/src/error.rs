//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("storage error: {0}")]
    Storage(#[from] pipeline_storage::StorageError),

    #[error("document store error: {0}")]
    Docstore(#[from] pipeline_docstore::FirestoreError),

    #[error("queue error: {0}")]
    Queue(#[from] pipeline_queue::QueueError),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Storage(_) | ApiError::Docstore(_) | ApiError::Queue(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Never leak driver-level detail to the caller; the cause stays in logs.
        let message = match &self {
            ApiError::Unauthorized(_) => "unauthorized".to_string(),
            ApiError::BadRequest(m) | ApiError::NotFound(m) => m.clone(),
            ApiError::Internal(_) | ApiError::Storage(_) | ApiError::Docstore(_) | ApiError::Queue(_) => {
                tracing::error!("{}", self);
                "internal error".to_string()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

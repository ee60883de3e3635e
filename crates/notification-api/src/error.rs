//! Service error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("queue error: {0}")]
    Queue(#[from] pipeline_queue::QueueError),
}

impl ServiceError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::Internal(_) | ServiceError::Queue(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            ServiceError::InvalidInput(m) => m.clone(),
            ServiceError::Internal(_) | ServiceError::Queue(_) => {
                tracing::error!("{}", self);
                "internal error".to_string()
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}

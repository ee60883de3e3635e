//! Download handler: presigned URL for a completed job's processed archive.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use pipeline_models::VideoStatus;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::token_client::AuthenticatedUser;

const DOWNLOAD_URL_TTL: Duration = Duration::from_secs(900);

#[derive(Deserialize)]
pub struct DownloadQuery {
    id: String,
}

#[derive(Serialize)]
pub struct DownloadResponse {
    pub presigned_url: String,
    pub video_id: String,
    pub file_name: String,
    pub expires_in: u64,
}

/// A missing job is a 404; a job owned by someone else is a 401, not a 403,
/// so a caller can't distinguish "not yours" from "doesn't exist" by probing
/// ids.
pub async fn download(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Json<DownloadResponse>> {
    let job = state
        .jobs
        .find_by_id(&query.id)
        .await?
        .ok_or_else(|| ApiError::not_found("video not found"))?;

    if !job.is_owned_by(&user.user_id) {
        return Err(ApiError::unauthorized("unauthorized"));
    }

    if job.status != VideoStatus::Completed {
        return Err(ApiError::bad_request(format!(
            "video is not ready for download (status: {})",
            job.status
        )));
    }

    let processed_key = job
        .processed_object_key
        .as_ref()
        .ok_or_else(|| ApiError::internal("completed job missing processed_object_key"))?;

    let presigned_url = state.storage.presign_get(processed_key, DOWNLOAD_URL_TTL).await?;

    Ok(Json(DownloadResponse {
        presigned_url,
        video_id: job.id,
        file_name: format!("{}.zip", job.original_name),
        expires_in: DOWNLOAD_URL_TTL.as_secs(),
    }))
}

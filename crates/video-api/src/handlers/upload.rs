//! Upload handler: the raw-object + job-row + queue-message transaction.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

use pipeline_models::{VideoJob, VideoProcessingMessage};

use crate::config::{ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES};
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_upload;
use crate::state::AppState;
use crate::token_client::AuthenticatedUser;

#[derive(Serialize)]
pub struct UploadResponse {
    pub video_id: String,
    pub original_name: String,
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn upload(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> ApiResult<(axum::http::StatusCode, Json<UploadResponse>)> {
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("video") {
            continue;
        }
        filename = field.file_name().map(|s| s.to_string());
        content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read upload body: {e}")))?;

        if data.len() > MAX_UPLOAD_BYTES {
            record_upload("rejected_oversize");
            return Err(ApiError::bad_request(format!(
                "file exceeds maximum size of {} MB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        bytes = Some(data.to_vec());
    }

    let original_name = filename.ok_or_else(|| ApiError::bad_request("missing `video` field"))?;
    let bytes = bytes.ok_or_else(|| ApiError::bad_request("missing `video` field"))?;

    if !has_allowed_extension(&original_name) {
        record_upload("rejected_format");
        return Err(ApiError::bad_request(format!(
            "unsupported file extension; allowed: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    let raw_object_key = format!("raw/{}/{}", user.user_id, original_name);
    let file_size = bytes.len() as i64;
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    // 1. Write the raw object. Nothing is persisted yet on failure.
    state
        .storage
        .upload_bytes(bytes, &raw_object_key, &content_type)
        .await
        .map_err(|e| {
            error!("failed to upload raw object {raw_object_key}: {e}");
            ApiError::internal("failed to store upload")
        })?;

    // 2. Insert the job row. On failure, compensate by deleting the object
    // we just wrote — a row-less object is harmless, a row with no backing
    // object is not.
    let job = VideoJob::new(
        user.user_id.clone(),
        user.email.clone(),
        original_name.clone(),
        raw_object_key.clone(),
        file_size,
    );
    if let Err(e) = state.jobs.create(&job).await {
        error!("failed to persist job row for {}: {e}", job.id);
        if let Err(cleanup_err) = state.storage.delete_object(&raw_object_key).await {
            error!("failed to compensate raw object {raw_object_key}: {cleanup_err}");
        }
        record_upload("failed");
        return Err(ApiError::internal("failed to create job"));
    }

    // 3. Publish the processing message. On failure the row and object are
    // left in place — the job is observable as `pending` and can be
    // re-enqueued by operator action.
    let message = VideoProcessingMessage {
        video_id: job.id.clone(),
        user_id: job.user_id.clone(),
        user_email: job.user_email.clone(),
        raw_object_key: job.raw_object_key.clone(),
    };
    if let Err(e) = state.queue.enqueue(&message, &job.id).await {
        warn!("failed to enqueue processing message for {}: {e}", job.id);
        record_upload("failed");
        return Err(ApiError::internal("failed to enqueue processing job"));
    }

    record_upload("accepted");
    Ok((
        axum::http::StatusCode::CREATED,
        Json(UploadResponse {
            video_id: job.id,
            original_name: job.original_name,
            status: "pending",
            message: "upload accepted",
        }),
    ))
}

fn has_allowed_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_extensions_case_insensitively() {
        assert!(has_allowed_extension("clip.MP4"));
        assert!(has_allowed_extension("clip.webm"));
    }

    #[test]
    fn rejects_unknown_extensions() {
        assert!(!has_allowed_extension("report.pdf"));
        assert!(!has_allowed_extension("no-extension"));
    }
}

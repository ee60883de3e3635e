//! List handler: every job owned by the caller, newest first.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::token_client::AuthenticatedUser;

#[derive(Serialize)]
pub struct VideoSummary {
    pub id: String,
    pub original_name: String,
    pub status: &'static str,
    pub progress_percent: u8,
    pub file_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub videos: Vec<VideoSummary>,
}

/// Other users' jobs are never visible: the repository query is already
/// scoped to `user.user_id`, so there is no post-hoc filtering to get wrong.
pub async fn list(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<Json<ListResponse>> {
    let jobs = state.jobs.list_for_user(&user.user_id).await?;

    let videos = jobs
        .into_iter()
        .map(|job| VideoSummary {
            id: job.id,
            original_name: job.original_name,
            status: job.status.as_str(),
            progress_percent: job.progress_percent,
            file_size: job.file_size,
            error_message: job.error_message,
            created_at: job.created_at,
            updated_at: job.updated_at,
        })
        .collect();

    Ok(Json(ListResponse { videos }))
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoStatus::Pending => "pending",
            VideoStatus::Processing => "processing",
            VideoStatus::Completed => "completed",
            VideoStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoStatus::Completed | VideoStatus::Failed)
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A video processing job record, owned for its entire lifetime by the user
/// who created it (`user_id` never changes after [`VideoJob::new`]).
///
/// Invariants enforced by the mutator methods, not by field access alone:
/// - `progress_percent` only moves forward
/// - `status == Completed` implies `processed_object_key.is_some()` and
///   `progress_percent == 100`
/// - `status == Failed` implies `error_message.is_some()`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoJob {
    pub id: String,
    pub user_id: String,
    pub user_email: String,
    pub original_name: String,
    pub raw_object_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_object_key: Option<String>,
    pub status: VideoStatus,
    pub progress_percent: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub file_size: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoJob {
    pub fn new(
        user_id: String,
        user_email: String,
        original_name: String,
        raw_object_key: String,
        file_size: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            user_email,
            original_name,
            raw_object_key,
            processed_object_key: None,
            status: VideoStatus::Pending,
            progress_percent: 0,
            error_message: None,
            file_size,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advances progress within the `Processing` status. Never lets progress
    /// move backwards; a no-op if `percent` is not greater than the current
    /// value.
    pub fn advance(&mut self, percent: u8) {
        if percent > self.progress_percent {
            self.progress_percent = percent;
        }
        self.status = VideoStatus::Processing;
        self.updated_at = Utc::now();
    }

    pub fn complete(&mut self, processed_object_key: String) {
        self.processed_object_key = Some(processed_object_key);
        self.status = VideoStatus::Completed;
        self.progress_percent = 100;
        self.error_message = None;
        self.updated_at = Utc::now();
    }

    pub fn fail(&mut self, error_message: impl Into<String>) {
        self.status = VideoStatus::Failed;
        self.error_message = Some(error_message.into());
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> VideoJob {
        VideoJob::new(
            "user-1".to_string(),
            "user@example.com".to_string(),
            "clip.mp4".to_string(),
            "raw/user-1/clip.mp4".to_string(),
            1024,
        )
    }

    #[test]
    fn new_job_starts_pending_at_zero() {
        let j = job();
        assert_eq!(j.status, VideoStatus::Pending);
        assert_eq!(j.progress_percent, 0);
        assert!(j.processed_object_key.is_none());
        assert!(j.error_message.is_none());
    }

    #[test]
    fn advance_never_moves_progress_backwards() {
        let mut j = job();
        j.advance(60);
        assert_eq!(j.progress_percent, 60);
        j.advance(30);
        assert_eq!(j.progress_percent, 60, "progress must be non-decreasing");
        j.advance(80);
        assert_eq!(j.progress_percent, 80);
    }

    #[test]
    fn complete_implies_terminal_consistency() {
        let mut j = job();
        j.advance(80);
        j.complete("processed/user-1/abc.zip".to_string());
        assert_eq!(j.status, VideoStatus::Completed);
        assert_eq!(j.progress_percent, 100);
        assert!(j.processed_object_key.is_some());
        assert!(j.error_message.is_none());
    }

    #[test]
    fn fail_implies_nonempty_error_message() {
        let mut j = job();
        j.fail("download timed out");
        assert_eq!(j.status, VideoStatus::Failed);
        assert_eq!(j.error_message.as_deref(), Some("download timed out"));
    }

    #[test]
    fn ownership_is_immutable_after_creation() {
        let j = job();
        assert!(j.is_owned_by("user-1"));
        assert!(!j.is_owned_by("user-2"));
    }
}

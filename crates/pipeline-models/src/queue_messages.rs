use serde::{Deserialize, Serialize};

/// Enqueued by the video service ingress after the raw upload has landed in
/// object storage and the job row has been persisted. Consumed by the video
/// worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoProcessingMessage {
    pub video_id: String,
    pub user_id: String,
    pub user_email: String,
    pub raw_object_key: String,
}

/// Enqueued by the notification service ingress. The sender identity is not
/// part of the message; the worker stamps it on delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequestMessage {
    pub subject: String,
    pub to: Vec<String>,
    pub html: String,
}

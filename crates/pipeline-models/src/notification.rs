use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const NOTIFICATION_SENDER: &str = "cks.hackathon.noreply@gmail.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationStatus {
    Success,
    Failure,
}

/// A delivery log row written by the notification worker after it has
/// attempted to relay a message, never before. `from` is always
/// [`NOTIFICATION_SENDER`]; the queue message itself never carries a sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRecord {
    pub id: String,
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub html: String,
    pub status: NotificationStatus,
}

impl NotificationRecord {
    pub fn new(subject: String, to: Vec<String>, html: String, status: NotificationStatus) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            subject,
            from: NOTIFICATION_SENDER.to_string(),
            to,
            html,
            status,
        }
    }
}

//! Shared data models for the video processing pipeline.
//!
//! These types are the wire/storage contract shared by the credential
//! service, the video service and its worker, and the notification service
//! and its worker. Nothing here talks to a network or a store directly.

pub mod notification;
pub mod queue_messages;
pub mod token;
pub mod user;
pub mod video_job;

pub use notification::{NotificationRecord, NotificationStatus, NOTIFICATION_SENDER};
pub use queue_messages::{NotificationRequestMessage, VideoProcessingMessage};
pub use token::TokenClaims;
pub use user::{User, UserSummary};
pub use video_job::{VideoJob, VideoStatus};

//! The notification delivery state machine. Much shorter than the video
//! worker's: there is no job row to advance, only a delivery outcome to
//! attempt and record.

use std::sync::Arc;

use tracing::{error, info};

use pipeline_docstore::NotificationRepository;
use pipeline_models::{NotificationRecord, NotificationRequestMessage, NotificationStatus};

use crate::error::WorkerResult;
use crate::metrics;
use crate::relay::EmailRelay;

pub struct WorkerContext {
    pub notifications: Arc<NotificationRepository>,
    pub relay: Arc<dyn EmailRelay>,
}

/// What the executor should do with the queue message after
/// [`process_message`] returns.
pub enum StepOutcome {
    /// The delivery log row was written (success or failure outcome); the
    /// message is safe to delete.
    Terminal,
}

/// A returned `Err` means the delivery log could not be persisted — the
/// message must NOT be deleted, so the broker redelivers it and the
/// attempt (and log write) is retried.
pub async fn process_message(
    ctx: &WorkerContext,
    message: NotificationRequestMessage,
) -> WorkerResult<StepOutcome> {
    let delivered = ctx
        .relay
        .send(
            pipeline_models::NOTIFICATION_SENDER,
            &message.to,
            &message.subject,
            &message.html,
        )
        .await;

    let status = if delivered {
        NotificationStatus::Success
    } else {
        NotificationStatus::Failure
    };

    let record = NotificationRecord::new(message.subject, message.to, message.html, status);

    ctx.notifications.create(&record).await?;
    metrics::record_delivery(delivered);

    if delivered {
        info!("notification {} delivered", record.id);
    } else {
        error!("notification {} relay failed; recorded as FAILURE", record.id);
    }

    Ok(StepOutcome::Terminal)
}

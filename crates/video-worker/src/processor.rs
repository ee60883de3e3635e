//! The processing state machine: one dequeued [`VideoProcessingMessage`]
//! advances a job from `pending` through `processing` to `completed` or
//! `failed`, with durable progress updates after each step.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use pipeline_docstore::VideoJobRepository;
use pipeline_models::VideoProcessingMessage;
use pipeline_storage::ObjectStoreClient;
use video_media::{build_archive, extract_frames, ArchiveMetadata};

use crate::error::{WorkerError, WorkerResult};
use crate::metrics;
use crate::notify_client::NotifyClient;

pub struct WorkerContext {
    pub storage: Arc<ObjectStoreClient>,
    pub jobs: Arc<VideoJobRepository>,
    pub notify: Arc<NotifyClient>,
    pub work_dir: PathBuf,
}

/// What the executor should do with the queue message after [`process_message`]
/// returns.
pub enum StepOutcome {
    /// Terminal state reached (success or a handled, row-recorded failure).
    /// The message is safe to delete.
    Terminal,
}

/// Processes one message through the full pipeline.
///
/// A returned `Err` means the message must NOT be deleted — either the job
/// row could not be located (an orphan, per §4.3) or a durable update failed.
/// Both cases rely on broker redelivery to drive the retry.
pub async fn process_message(
    ctx: &WorkerContext,
    message: VideoProcessingMessage,
) -> WorkerResult<StepOutcome> {
    let mut job = ctx
        .jobs
        .find_by_id(&message.video_id)
        .await?
        .ok_or_else(|| WorkerError::JobNotFound(message.video_id.clone()))?;

    // Mark started.
    job.advance(10);
    ctx.jobs.update(&job).await?;
    metrics::record_step("mark_started");

    // Download raw object.
    let raw_bytes = match ctx.storage.download_bytes(&message.raw_object_key).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return Ok(fail_job(ctx, &mut job, format!("failed to download source video: {e}")).await);
        }
    };
    job.advance(30);
    ctx.jobs.update(&job).await?;
    metrics::record_step("download");

    // Extract frames + assemble archive. Frame extraction degrades
    // gracefully: if ffmpeg is unavailable the archive is still produced,
    // just without a frames/ directory (spec's permitted degraded mode).
    let frame_dir = ctx.work_dir.join(&job.id);
    let frame_count = match prepare_frames(&raw_bytes, &frame_dir).await {
        Ok(count) => count,
        Err(e) => {
            warn!("frame extraction unavailable for job {}: {e}; continuing in degraded mode", job.id);
            0
        }
    };
    job.advance(60);
    ctx.jobs.update(&job).await?;

    let meta = ArchiveMetadata {
        original_name: &job.original_name,
        processed_at: Utc::now(),
        original_size_bytes: job.file_size,
        frame_count,
    };
    let frame_dir_arg = if frame_count > 0 { Some(frame_dir.as_path()) } else { None };
    let archive_bytes = match build_archive(&raw_bytes, &job.original_name, frame_dir_arg, &meta) {
        Ok(bytes) => bytes,
        Err(e) => {
            cleanup_frame_dir(&frame_dir).await;
            return Ok(fail_job(ctx, &mut job, format!("failed to assemble archive: {e}")).await);
        }
    };
    cleanup_frame_dir(&frame_dir).await;
    job.advance(80);
    ctx.jobs.update(&job).await?;
    metrics::record_step("archive_assembled");

    // Upload derived archive. The key is stable, so retries are idempotent.
    let processed_key = format!("processed/{}/{}.zip", job.user_id, job.id);
    if let Err(e) = ctx.storage.upload_bytes(archive_bytes, &processed_key, "application/zip").await {
        return Ok(fail_job(ctx, &mut job, format!("failed to upload archive: {e}")).await);
    }

    job.complete(processed_key);
    ctx.jobs.update(&job).await?;
    metrics::record_step("completed");

    // Best-effort notification; duplicates from redelivery are acceptable.
    ctx.notify.notify_completed(&job.user_email, &job.original_name).await;

    info!("job {} completed", job.id);
    Ok(StepOutcome::Terminal)
}

/// Attempts frame extraction; `Ok(0)` with no frame directory populated is
/// the degraded path, not a failure on its own.
async fn prepare_frames(raw_bytes: &[u8], frame_dir: &PathBuf) -> WorkerResult<u32> {
    tokio::fs::create_dir_all(frame_dir).await?;
    let input_path = frame_dir.join("source");
    tokio::fs::write(&input_path, raw_bytes).await?;

    match extract_frames(&input_path, frame_dir).await {
        Ok(count) => {
            tokio::fs::remove_file(&input_path).await.ok();
            Ok(count)
        }
        Err(e) => {
            tokio::fs::remove_file(&input_path).await.ok();
            Err(e.into())
        }
    }
}

async fn cleanup_frame_dir(frame_dir: &PathBuf) {
    tokio::fs::remove_dir_all(frame_dir).await.ok();
}

/// Records a terminal failure on the job row and fires a best-effort
/// notification. The update itself is attempted but not required to
/// succeed for the message to be deleted — per §4.3 only the "mark started"
/// and "mark completed" durable writes gate redelivery.
async fn fail_job(
    ctx: &WorkerContext,
    job: &mut pipeline_models::VideoJob,
    error_message: String,
) -> StepOutcome {
    error!("job {} failed: {}", job.id, error_message);
    job.fail(error_message.clone());
    if let Err(e) = ctx.jobs.update(job).await {
        error!("failed to persist failed status for job {}: {e}", job.id);
    }
    metrics::record_step("failed");
    ctx.notify.notify_failed(&job.user_email, &job.original_name, &error_message).await;
    StepOutcome::Terminal
}

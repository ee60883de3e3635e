//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    /// The job row referenced by a dequeued message does not exist. Treated
    /// as a transient orphan per the processing state machine: the message
    /// is left for redelivery rather than deleted.
    #[error("job {0} not found")]
    JobNotFound(String),

    #[error("storage error: {0}")]
    Storage(#[from] pipeline_storage::StorageError),

    #[error("document store error: {0}")]
    Docstore(#[from] pipeline_docstore::FirestoreError),

    #[error("media error: {0}")]
    Media(#[from] video_media::MediaError),

    #[error("queue error: {0}")]
    Queue(#[from] pipeline_queue::QueueError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

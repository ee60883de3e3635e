//! Worker error types.

use thiserror::Error;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("document store error: {0}")]
    Docstore(#[from] pipeline_docstore::FirestoreError),

    #[error("queue error: {0}")]
    Queue(#[from] pipeline_queue::QueueError),
}

//! Video processing worker: the background consumer of the video queue.
//!
//! Implements the state machine described by the processing pipeline —
//! download, frame-extract, archive, upload, notify — with at-least-once
//! delivery semantics (visibility timeout + delete-on-terminal-outcome).

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod notify_client;
pub mod processor;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use executor::Executor;
pub use notify_client::NotifyClient;
pub use processor::WorkerContext;

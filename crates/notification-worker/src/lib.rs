//! Notification worker: the background consumer of the notification queue.
//!
//! Decodes a request, attempts delivery through a [`relay::EmailRelay`],
//! and writes the outcome as the authoritative delivery log row. A relay
//! failure does not fail the step — only a failed log write does.

pub mod config;
pub mod error;
pub mod executor;
pub mod metrics;
pub mod processor;
pub mod relay;

pub use config::WorkerConfig;
pub use error::{WorkerError, WorkerResult};
pub use executor::Executor;
pub use processor::WorkerContext;
pub use relay::{EmailRelay, HttpEmailRelay};

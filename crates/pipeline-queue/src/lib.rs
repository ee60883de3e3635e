//! Redis Streams queue broker.
//!
//! A thin generic wrapper around consumer-group streams: enqueue with
//! dedup, long-poll receive, stale-message reclaim, and explicit delete on
//! terminal outcomes. No dead-letter queue: a message that cannot be
//! decoded is deleted (see [`queue::Delivery::Undecodable`]); a message
//! whose handler fails for any other reason is left alone so the broker
//! redelivers it after the visibility timeout.

pub mod error;
pub mod queue;

pub use error::{QueueError, QueueResult};
pub use queue::{Delivery, Queue, QueueConfig};

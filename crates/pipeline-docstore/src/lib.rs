//! Document store client (Firestore REST API) for the video pipeline.
//!
//! - `client` - document store REST client (get/create/update/delete/query)
//! - `token_cache` - thread-safe access token caching with refresh margin
//! - `retry` - retry policy with exponential backoff
//! - `repos` - typed repositories for users, video jobs, and notification logs
//! - `types` - document value types and Rust conversions

pub mod client;
pub mod error;
pub mod repos;
pub mod retry;
pub mod token_cache;
pub mod types;

pub use client::{FirestoreClient, FirestoreConfig};
pub use error::{FirestoreError, FirestoreResult};
pub use repos::{NotificationRepository, UserRepository, VideoJobRepository};
pub use retry::RetryConfig;
pub use types::{Document, FromFirestoreValue, ToFirestoreValue, Value};


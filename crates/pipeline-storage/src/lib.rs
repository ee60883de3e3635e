//! S3-compatible object storage client.
//!
//! This crate provides upload/download of raw and processed video objects,
//! presigned GET URLs for client downloads, and object deletion used to
//! compensate a failed metadata write after a successful upload.

pub mod client;
pub mod error;

pub use client::{ObjectStoreClient, ObjectStoreConfig};
pub use error::{StorageError, StorageResult};

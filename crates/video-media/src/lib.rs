//! Frame extraction and derived-archive assembly for the video processing worker.
//!
//! - `command` - ffmpeg invocation (one still frame per second of source video)
//! - `archive` - ZIP assembly: original file, frames, metadata, README

pub mod archive;
pub mod command;
pub mod error;

pub use archive::{build_archive, ArchiveMetadata};
pub use command::{check_ffmpeg, extract_frames};
pub use error::{MediaError, MediaResult};

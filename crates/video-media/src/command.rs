//! ffmpeg invocation: one still frame per second of source video.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{MediaError, MediaResult};

/// Hard ceiling on a single ffmpeg invocation. A stalled/hung process is
/// killed and reported as [`MediaError::Timeout`] rather than blocking the
/// worker task forever.
const FFMPEG_TIMEOUT_SECS: u64 = 120;

/// Check that `ffmpeg` is reachable on PATH.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}

/// Extract one frame per second of `input` into `output_dir`, named
/// `frame_0001.jpg`, `frame_0002.jpg`, ... Returns the number of frames
/// written. `output_dir` must already exist.
pub async fn extract_frames(input: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> MediaResult<u32> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }
    check_ffmpeg()?;

    let pattern = output_dir.join("frame_%04d.jpg");
    let args = [
        "-y".to_string(),
        "-v".to_string(),
        "error".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
        "-vf".to_string(),
        "fps=1".to_string(),
        pattern.to_string_lossy().to_string(),
    ];

    debug!("running ffmpeg {}", args.join(" "));

    let mut child = Command::new("ffmpeg")
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stderr = child.stderr.take().expect("stderr not captured");

    let status = match tokio::time::timeout(Duration::from_secs(FFMPEG_TIMEOUT_SECS), child.wait()).await {
        Ok(result) => result?,
        Err(_) => {
            warn!("ffmpeg timed out after {FFMPEG_TIMEOUT_SECS}s, killing process");
            let _ = child.kill().await;
            return Err(MediaError::Timeout(FFMPEG_TIMEOUT_SECS));
        }
    };

    if !status.success() {
        let mut stderr_buf = String::new();
        stderr.read_to_string(&mut stderr_buf).await.ok();
        return Err(MediaError::ffmpeg_failed("frame extraction failed", Some(stderr_buf), status.code()));
    }

    count_frames(output_dir).await
}

async fn count_frames(output_dir: &Path) -> MediaResult<u32> {
    let mut entries = tokio::fs::read_dir(output_dir).await?;
    let mut count = 0u32;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("frame_") && name.ends_with(".jpg") {
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let result = extract_frames(dir.path().join("nope.mp4"), dir.path()).await;
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}

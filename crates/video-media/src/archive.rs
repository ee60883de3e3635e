//! Derived-archive assembly: original file, extracted frames, and
//! human/machine-readable metadata, packed into a single ZIP.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::MediaResult;

/// Facts recorded in `metadata.txt` / `README.txt` inside the archive.
pub struct ArchiveMetadata<'a> {
    pub original_name: &'a str,
    pub processed_at: DateTime<Utc>,
    pub original_size_bytes: i64,
    pub frame_count: u32,
}

impl ArchiveMetadata<'_> {
    fn metadata_txt(&self) -> String {
        format!(
            "original_filename={}\nprocessed_at={}\noriginal_size_bytes={}\nframe_count={}\n",
            self.original_name,
            self.processed_at.to_rfc3339(),
            self.original_size_bytes,
            self.frame_count,
        )
    }

    fn readme_txt(&self) -> String {
        format!(
            "This archive was generated from \"{}\".\n\
             Processed at: {}\n\
             Original file size: {} bytes\n\
             Extracted frames: {}\n",
            self.original_name,
            self.processed_at.to_rfc3339(),
            self.original_size_bytes,
            self.frame_count,
        )
    }
}

/// Build the derived archive in memory: the original file unmodified at the
/// top level, `frames/frame_%04d.jpg` (may be empty in degraded mode),
/// `metadata.txt`, and `README.txt`.
pub fn build_archive(
    original_bytes: &[u8],
    original_name: &str,
    frame_dir: Option<&Path>,
    meta: &ArchiveMetadata<'_>,
) -> MediaResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let cursor = std::io::Cursor::new(&mut buf);
        let mut writer = ZipWriter::new(cursor);
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        writer.start_file(original_name, options)?;
        writer.write_all(original_bytes)?;

        if let Some(dir) = frame_dir {
            let mut frame_names: Vec<String> = std::fs::read_dir(dir)?
                .filter_map(|e| e.ok())
                .filter_map(|e| {
                    let name = e.file_name().to_string_lossy().to_string();
                    (name.starts_with("frame_") && name.ends_with(".jpg")).then_some(name)
                })
                .collect();
            frame_names.sort();

            for name in &frame_names {
                let bytes = std::fs::read(dir.join(name))?;
                writer.start_file(format!("frames/{name}"), options)?;
                writer.write_all(&bytes)?;
            }
        }

        writer.start_file("metadata.txt", options)?;
        writer.write_all(meta.metadata_txt().as_bytes())?;

        writer.start_file("README.txt", options)?;
        writer.write_all(meta.readme_txt().as_bytes())?;

        writer.finish()?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read as _;

    #[test]
    fn archive_contains_expected_entries_in_degraded_mode() {
        let meta = ArchiveMetadata {
            original_name: "clip.mp4",
            processed_at: Utc::now(),
            original_size_bytes: 4,
            frame_count: 0,
        };

        let bytes = build_archive(b"data", "clip.mp4", None, &meta).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();

        assert!(names.contains(&"clip.mp4".to_string()));
        assert!(names.contains(&"metadata.txt".to_string()));
        assert!(names.contains(&"README.txt".to_string()));
        assert!(!names.iter().any(|n| n.starts_with("frames/")));

        let mut original = archive.by_name("clip.mp4").unwrap();
        let mut contents = Vec::new();
        original.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"data");
    }

    #[test]
    fn archive_includes_frames_when_present() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("frame_0001.jpg"), b"jpg-bytes").unwrap();
        std::fs::write(dir.path().join("frame_0002.jpg"), b"jpg-bytes-2").unwrap();

        let meta = ArchiveMetadata {
            original_name: "clip.mp4",
            processed_at: Utc::now(),
            original_size_bytes: 4,
            frame_count: 2,
        };

        let bytes = build_archive(b"data", "clip.mp4", Some(dir.path()), &meta).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();

        assert!(archive.by_name("frames/frame_0001.jpg").is_ok());
        assert!(archive.by_name("frames/frame_0002.jpg").is_ok());
    }
}

// src/capture/still.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{CancelToken, Frame, FrameSource};

/// A picture picked from disk, served as if it were a live source.
#[derive(Debug, Clone)]
pub struct StillImageSource {
    path: PathBuf,
}

impl StillImageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}

impl FrameSource for StillImageSource {
    fn grab(&mut self, _cancel: &CancelToken) -> Result<Option<Frame>> {
        let data = fs::read(&self.path)
            .with_context(|| format!("Failed to read image: {}", self.path.display()))?;
        if data.is_empty() {
            return Ok(None);
        }
        Ok(Some(Frame { mime: mime_for(&self.path), data }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_file_with_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.PNG");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let frame = StillImageSource::new(&path).grab(&CancelToken::new()).unwrap().unwrap();
        assert_eq!(frame.mime, "image/png");
        assert_eq!(frame.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_file_is_no_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.jpg");
        fs::write(&path, b"").unwrap();

        assert!(StillImageSource::new(&path).grab(&CancelToken::new()).unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(StillImageSource::new("/no/such/image.jpg").grab(&CancelToken::new()).is_err());
    }
}

// src/file/export.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::analysis::GenderResult;
use crate::report::{file_name, ReportFormat};

/// Renders `result` in `format` and writes it into `dir`, returning the
/// path of the new file.
pub fn save_report(
    dir: &Path,
    format: ReportFormat,
    result: &GenderResult,
    generated: &DateTime<Local>,
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;

    let body = format.render(result, generated)?;
    let path = dir.join(file_name(format, generated));
    fs::write(&path, body)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    tracing::info!(path = %path.display(), format = format.extension(), "Saved report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{generated, with_frames};

    #[test]
    fn test_writes_all_three_formats() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");

        for format in ReportFormat::ALL {
            let path = save_report(&out, format, &with_frames(), &generated()).unwrap();
            assert_eq!(path.extension().and_then(|e| e.to_str()), Some(format.extension()));
            let content = fs::read_to_string(&path).unwrap();
            assert!(content.contains("MALE"));
        }
        assert_eq!(fs::read_dir(&out).unwrap().count(), 3);
    }
}

// src/report/delimited.rs
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use csv::Writer;

use super::display_timestamp;
use crate::analysis::result::percent;
use crate::analysis::GenderResult;

/// Summary section, then (if frames exist) a blank line and a per-frame
/// section with its own header.
pub fn render(result: &GenderResult, generated: &DateTime<Local>) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Analysis Type", "Result", "Confidence", "Timestamp"])?;
    writer.write_record([
        "Gender Analysis".to_string(),
        result.display_gender(),
        result.display_confidence(),
        display_timestamp(generated),
    ])?;
    let mut out = finish(writer)?;

    if let Some(frames) = result.frames() {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(["Frame Number", "Detected Gender", "Confidence"])?;
        for (idx, frame) in frames.iter().enumerate() {
            writer.write_record([
                (idx + 1).to_string(),
                frame.gender.clone(),
                percent(frame.confidence),
            ])?;
        }
        out.push('\n');
        out.push_str(&finish(writer)?);
    }

    Ok(out)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not UTF-8")
}

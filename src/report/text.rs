// src/report/text.rs
use std::fmt::Write;

use chrono::{DateTime, Local};

use super::{display_timestamp, ANALYSIS_METHOD, PRIVACY_NOTE};
use crate::analysis::result::percent;
use crate::analysis::GenderResult;

const RULE_WIDTH: usize = 60;

pub fn render(result: &GenderResult, generated: &DateTime<Local>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // writeln! into a String cannot fail
    let _ = writeln!(out, "GENDER ANALYSIS REPORT");
    let _ = writeln!(out, "Generated: {}", display_timestamp(generated));
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out);
    let _ = writeln!(out, "ANALYSIS RESULTS");
    let _ = writeln!(out, "----------------");
    let _ = writeln!(out, "Detected Gender: {}", result.display_gender());
    let _ = writeln!(out, "Confidence Level: {}", result.display_confidence());
    let _ = writeln!(out);
    let _ = writeln!(out, "DETAILED BREAKDOWN");
    let _ = writeln!(out, "------------------");

    match result.frames() {
        Some(frames) => {
            for (idx, frame) in frames.iter().enumerate() {
                let _ = writeln!(out, "Frame {}: {} ({})", idx + 1, frame.gender, percent(frame.confidence));
            }
        }
        None => {
            let _ = writeln!(out, "No frame data available");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Analysis Method: {}", ANALYSIS_METHOD);
    let _ = writeln!(out, "Privacy: {}", PRIVACY_NOTE);
    let _ = writeln!(out, "{}", rule);

    out
}

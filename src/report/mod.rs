// src/report/mod.rs
//! Report exporters for gender analysis results.
//!
//! Each exporter is a pure function of the result and the generation time.
//! A missing per-frame breakdown drops that section; nothing here fails on
//! absent fields.

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::analysis::GenderResult;

pub mod delimited;
pub mod spreadsheet;
pub mod text;

pub const REPORT_TITLE: &str = "Gender Analysis Report";
pub const ANALYSIS_METHOD: &str = "AI-Powered Facial Recognition";
pub const PRIVACY_NOTE: &str = "All data processed securely and not stored";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Csv,
    Excel,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Text, ReportFormat::Excel, ReportFormat::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Csv => "csv",
            ReportFormat::Excel => "xls",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportFormat::Text => "Download Text",
            ReportFormat::Csv => "Download CSV",
            ReportFormat::Excel => "Download Excel",
        }
    }

    pub fn render(&self, result: &GenderResult, generated: &DateTime<Local>) -> Result<String> {
        match self {
            ReportFormat::Text => Ok(text::render(result, generated)),
            ReportFormat::Csv => delimited::render(result, generated),
            ReportFormat::Excel => Ok(spreadsheet::render(result, generated)),
        }
    }
}

/// Human readable generation time printed inside the reports.
pub fn display_timestamp(generated: &DateTime<Local>) -> String {
    generated.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `gender_analysis_report_<timestamp>.<ext>`
pub fn file_name(format: ReportFormat, generated: &DateTime<Local>) -> String {
    format!(
        "gender_analysis_report_{}.{}",
        generated.format("%Y%m%d_%H%M%S_%3f"),
        format.extension()
    )
}

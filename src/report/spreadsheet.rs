// src/report/spreadsheet.rs
//! HTML table with Excel worksheet metadata; spreadsheet apps open it as a
//! workbook with a single named sheet.

use chrono::{DateTime, Local};

use super::{display_timestamp, ANALYSIS_METHOD, PRIVACY_NOTE, REPORT_TITLE};
use crate::analysis::result::percent;
use crate::analysis::GenderResult;

const WORKSHEET_NAME: &str = "Gender Analysis";

const STYLE: &str = "\
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #000; padding: 8px; text-align: left; }
th { background-color: #5A5A5A; color: white; font-weight: bold; }
.header { background-color: #f0f0f0; font-weight: bold; }";

pub fn render(result: &GenderResult, generated: &DateTime<Local>) -> String {
    let mut html = String::new();

    html.push_str("<html xmlns:x=\"urn:schemas-microsoft-com:office:excel\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<xml>\n<x:ExcelWorkbook>\n<x:ExcelWorksheets>\n<x:ExcelWorksheet>\n");
    html.push_str(&format!("<x:Name>{}</x:Name>\n", WORKSHEET_NAME));
    html.push_str("<x:WorksheetOptions><x:DisplayGridlines/></x:WorksheetOptions>\n");
    html.push_str("</x:ExcelWorksheet>\n</x:ExcelWorksheets>\n</x:ExcelWorkbook>\n</xml>\n");
    html.push_str(&format!("<style>\n{}\n</style>\n</head>\n<body>\n", STYLE));

    html.push_str(&format!("<h2>{}</h2>\n", REPORT_TITLE));
    html.push_str(&format!(
        "<p><strong>Generated:</strong> {}</p>\n",
        escape(&display_timestamp(generated))
    ));

    // Summary
    html.push_str("<h3>Summary</h3>\n<table>\n");
    summary_row(&mut html, "Detected Gender", &result.display_gender());
    summary_row(&mut html, "Confidence Level", &result.display_confidence());
    summary_row(&mut html, "Analysis Method", ANALYSIS_METHOD);
    html.push_str("</table>\n");

    if let Some(frames) = result.frames() {
        html.push_str("<h3>Frame-by-Frame Analysis</h3>\n<table>\n<thead>\n");
        html.push_str("<tr><th>Frame Number</th><th>Detected Gender</th><th>Confidence</th></tr>\n");
        html.push_str("</thead>\n<tbody>\n");
        for (idx, frame) in frames.iter().enumerate() {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                idx + 1,
                escape(&frame.gender),
                percent(frame.confidence)
            ));
        }
        html.push_str("</tbody>\n</table>\n");
    }

    html.push_str(&format!("<br/>\n<p><em>Privacy Note: {}</em></p>\n", PRIVACY_NOTE));
    html.push_str("</body>\n</html>\n");
    html
}

fn summary_row(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<tr><td class=\"header\">{}</td><td>{}</td></tr>\n",
        label,
        escape(value)
    ));
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::{generated, with_frames, without_frames};

    #[test]
    fn test_worksheet_metadata_and_summary() {
        let html = render(&with_frames(), &generated());
        assert!(html.contains("<x:Name>Gender Analysis</x:Name>"));
        assert!(html.contains("<td class=\"header\">Detected Gender</td><td>MALE</td>"));
        assert!(html.contains("<td class=\"header\">Confidence Level</td><td>87.3%</td>"));
        assert!(html.contains("<tr><td>2</td><td>female</td><td>51.2%</td></tr>"));
    }

    #[test]
    fn test_without_frames_omits_breakdown_table() {
        let html = render(&without_frames(), &generated());
        assert!(!html.contains("Frame-by-Frame Analysis"));
        assert!(!html.contains("<thead>"));
        assert!(html.contains("<td>Uncertain</td>"));
    }

    #[test]
    fn test_backend_text_is_escaped() {
        let mut result = with_frames();
        if let Some(frames) = result.frame_genders.as_mut() {
            frames[0].gender = "<script>".to_string();
        }
        let html = render(&result, &generated());
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}

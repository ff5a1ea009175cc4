//! CSV export
//!
//! Every field is double-quoted, embedded quotes are doubled and lines are
//! joined with `\n` (no trailing newline). Header order is the key order of
//! the first record; later records are read through those keys, so missing
//! values become empty fields. Output depends only on the input.

use crate::types::{header_keys, AnalysisRecord};

pub const CSV_FILE_NAME: &str = "patent_analysis_results.csv";
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Downloadable CSV artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub mime_type: &'static str,
    pub content: String,
}

/// Quote a single field
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn encode_line(fields: impl Iterator<Item = String>) -> String {
    fields.map(|f| quote_field(&f)).collect::<Vec<_>>().join(",")
}

/// Encode records as CSV text; `None` when there is nothing to export
pub fn encode_csv(records: &[AnalysisRecord]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let headers = header_keys(records);
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(encode_line(headers.iter().map(|h| h.to_string())));
    for record in records {
        lines.push(encode_line(headers.iter().map(|h| record.text(h))));
    }

    Some(lines.join("\n"))
}

pub fn build_csv_export(records: &[AnalysisRecord]) -> Option<CsvExport> {
    encode_csv(records).map(|content| CsvExport {
        file_name: CSV_FILE_NAME,
        mime_type: CSV_MIME_TYPE,
        content,
    })
}

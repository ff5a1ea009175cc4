//! Excel export (shared library)
//!
//! Single "Results" worksheet: bold header row taken from the first record,
//! numbers and booleans as typed cells, everything else as text.

use crate::types::{header_keys, AnalysisRecord};
use rust_xlsxwriter::*;
use serde_json::Value;

pub const EXCEL_FILE_NAME: &str = "patent_analysis_results.xlsx";
pub const SHEET_NAME: &str = "Results";

const MAX_COL_WIDTH: f64 = 60.0;

/// Generate an .xlsx workbook into a buffer
///
/// Returns `Ok(None)` when there is nothing to export.
pub fn generate_results_xlsx(records: &[AnalysisRecord]) -> Result<Option<Vec<u8>>, String> {
    if records.is_empty() {
        return Ok(None);
    }

    let headers = header_keys(records);
    let mut workbook = Workbook::new();
    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xCCCCCC));
    let text_format = Format::new().set_text_wrap().set_align(FormatAlign::Top);

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| format!("sheet name error: {}", e))?;

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("header write error: {}", e))?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, key) in headers.iter().enumerate() {
            let col16 = col as u16;
            let written = match record.get(key) {
                Some(Value::Number(n)) => match n.as_f64() {
                    Some(f) => worksheet.write_number(row, col16, f).map(|_| ()),
                    None => worksheet.write_string(row, col16, n.to_string()).map(|_| ()),
                },
                Some(Value::Bool(b)) => worksheet.write_boolean(row, col16, *b).map(|_| ()),
                Some(_) => {
                    let text = record.text(key);
                    widths[col] = widths[col].max(text.chars().count());
                    worksheet
                        .write_string_with_format(row, col16, text, &text_format)
                        .map(|_| ())
                }
                None => Ok(()),
            };
            written.map_err(|e| format!("cell write error: {}", e))?;
        }
    }

    for (col, width) in widths.iter().enumerate() {
        let width = (*width as f64 + 2.0).min(MAX_COL_WIDTH);
        worksheet
            .set_column_width(col as u16, width)
            .map_err(|e| format!("column width error: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("freeze panes error: {}", e))?;

    workbook
        .save_to_buffer()
        .map(Some)
        .map_err(|e| format!("workbook save error: {}", e))
}

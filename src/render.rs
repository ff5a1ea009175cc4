//! Terminal rendering of analysis results
//!
//! Patent rows are too wide for a terminal grid, so each record is printed
//! as a block of `header: value` lines.

use patent_analysis_common::view::{results_footer, ResultTable, SummaryRow, SUMMARY_HEADERS};
use patent_analysis_common::ResultView;
use std::fmt::Write;

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

pub fn render_full(table: &ResultTable) -> String {
    let width = label_width(table.headers.iter().map(String::as_str));
    let mut out = String::new();

    for (index, row) in table.rows.iter().enumerate() {
        let _ = writeln!(out, "[{}]", index + 1);
        for (header, cell) in table.headers.iter().zip(row) {
            let _ = writeln!(out, "  {:<width$} : {}", header, cell.text, width = width);
        }
        out.push('\n');
    }
    out
}

pub fn render_summary(rows: &[SummaryRow]) -> String {
    let width = label_width(SUMMARY_HEADERS.iter().copied());
    let mut out = String::new();

    for (index, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "[{}]", index + 1);
        for (header, value) in SUMMARY_HEADERS.iter().zip(row.cells()) {
            let _ = writeln!(out, "  {:<width$} : {}", header, value, width = width);
        }
        out.push('\n');
    }
    out
}

/// Rendered results plus footer; `None` when there is nothing to show
pub fn render_results<F>(
    session: &patent_analysis_common::UploadSession<F>,
    view: ResultView,
) -> Option<String> {
    let body = match view {
        ResultView::Full => render_full(&session.full_table()?),
        ResultView::Summary => render_summary(&session.summary_rows()?),
    };
    Some(format!("{}{}", body, results_footer(session.results().len())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use patent_analysis_common::view::{full_table, summary_rows};
    use patent_analysis_common::AnalysisRecord;

    fn records() -> Vec<AnalysisRecord> {
        vec![
            AnalysisRecord::new()
                .with("relevance_score", 5)
                .with("SUMMARY", "ok")
                .with("reasoning", "r")
                .with("follow_up_recommended", true),
            AnalysisRecord::new().with("relevance_score", 2),
        ]
    }

    #[test]
    fn test_render_summary() {
        let rows = summary_rows(&records()).expect("rows missing");
        let text = render_summary(&rows);
        assert!(text.contains("[1]\n  Score     : 5\n  Summary   : ok\n  Reasoning : r\n  Follow-up : Yes\n"));
        assert!(text.contains("[2]\n  Score     : 2\n  Summary   : \n"));
    }

    #[test]
    fn test_render_full_uses_labels() {
        let table = full_table(&records()).expect("table missing");
        let text = render_full(&table);
        assert!(text.contains("  relevance score       : 5\n"));
        assert!(text.contains("  follow up recommended : true\n"));
    }

    #[test]
    fn test_render_results_empty() {
        let session: patent_analysis_common::UploadSession<()> = Default::default();
        assert!(render_results(&session, ResultView::Full).is_none());
    }
}

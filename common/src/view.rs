//! Result view models
//!
//! Two renderings of the same result list:
//! - full table: every key of the first record, applied uniformly to all rows
//! - summary: the four conventional analysis fields (score, summary,
//!   reasoning, follow-up)
//!
//! Both return `None` for an empty list so callers render nothing at all.

use crate::types::{header_keys, AnalysisRecord};

/// Longest cell text shown before truncation
pub const CELL_PREVIEW_CHARS: usize = 150;

/// Keys read by the summary view, in column order
pub const SUMMARY_KEYS: [&str; 4] = ["relevance_score", "SUMMARY", "reasoning", "follow_up_recommended"];

pub const SUMMARY_HEADERS: [&str; 4] = ["Score", "Summary", "Reasoning", "Follow-up"];

/// Which rendering to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultView {
    #[default]
    Full,
    Summary,
}

impl ResultView {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultView::Full => "full",
            ResultView::Summary => "summary",
        }
    }
}

impl std::str::FromStr for ResultView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" | "all" => Ok(ResultView::Full),
            "summary" => Ok(ResultView::Summary),
            _ => Err(format!("Unknown view: {}. Use full or summary", s)),
        }
    }
}

/// Table cell: display text plus the untruncated value (hover title)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    pub text: String,
    pub full: String,
}

impl TableCell {
    fn new(full: String) -> Self {
        Self { text: preview_text(&full), full }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    pub keys: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<TableCell>>,
}

/// One row of the summary view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub score: String,
    pub summary: String,
    pub reasoning: String,
    pub follow_up: &'static str,
}

impl SummaryRow {
    pub fn from_record(record: &AnalysisRecord) -> Self {
        Self {
            score: record.text("relevance_score"),
            summary: record.text("SUMMARY"),
            reasoning: record.text("reasoning"),
            follow_up: if record.is_truthy("follow_up_recommended") { "Yes" } else { "No" },
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [self.score.as_str(), self.summary.as_str(), self.reasoning.as_str(), self.follow_up]
    }
}

/// `relevance_score` -> `relevance score`
pub fn header_label(key: &str) -> String {
    key.replace('_', " ")
}

/// Truncate to `CELL_PREVIEW_CHARS` characters, marking the cut with `…`
pub fn preview_text(text: &str) -> String {
    if text.chars().count() > CELL_PREVIEW_CHARS {
        let mut cut: String = text.chars().take(CELL_PREVIEW_CHARS).collect();
        cut.push('…');
        cut
    } else {
        text.to_string()
    }
}

pub fn full_table(records: &[AnalysisRecord]) -> Option<ResultTable> {
    if records.is_empty() {
        return None;
    }

    let keys: Vec<String> = header_keys(records).into_iter().map(str::to_string).collect();
    let headers = keys.iter().map(|k| header_label(k)).collect();
    let rows = records
        .iter()
        .map(|record| keys.iter().map(|k| TableCell::new(record.text(k))).collect::<Vec<_>>())
        .collect();

    Some(ResultTable { keys, headers, rows })
}

pub fn summary_rows(records: &[AnalysisRecord]) -> Option<Vec<SummaryRow>> {
    if records.is_empty() {
        return None;
    }
    Some(records.iter().map(SummaryRow::from_record).collect())
}

pub fn results_footer(count: usize) -> String {
    format!("Displaying {} results.", count)
}

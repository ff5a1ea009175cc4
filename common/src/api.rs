//! Backend contract
//!
//! Endpoint paths, multipart field names, response parsing and the
//! failure messages shown inline when a remote call fails. The transport
//! itself lives in the CLI (reqwest) and the web app (fetch).

use crate::error::{Error, Result};
use crate::types::{AnalysisPage, AnalysisRecord, PageMetadata};
use serde::Deserialize;

/// Local development backend
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Environment variable holding the backend base URL
pub const API_BASE_ENV: &str = "PATENT_API_URL";

pub const FIELD_FILE: &str = "file";
pub const FIELD_PROMPT: &str = "custom_prompt";

/// File picker filter hint (not enforced)
pub const ACCEPTED_EXTENSIONS: &[&str] = &["csv", "xlsx"];
pub const ACCEPT_ATTRIBUTE: &str = ".csv,.xlsx";

pub const PING_PATH: &str = "/ping";

/// Analysis backend endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Columns,
    Analyze,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Columns => "/columns",
            Endpoint::Analyze => "/analyze",
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}{}", normalize_base_url(base), self.path())
    }

    /// Detail used when the server gives no message
    pub fn fallback_detail(&self) -> &'static str {
        match self {
            Endpoint::Columns => "Could not load columns.",
            Endpoint::Analyze => "Unknown analysis error.",
        }
    }

    fn failure_prefix(&self) -> &'static str {
        match self {
            Endpoint::Columns => "Failed to load columns: ",
            Endpoint::Analyze => "Analysis failed: ",
        }
    }

    /// Inline error text for a failed call
    ///
    /// `detail` is the response body or the transport error text.
    pub fn failure_message(&self, detail: &str) -> String {
        let detail = detail.trim();
        let detail = if detail.is_empty() { self.fallback_detail() } else { detail };
        format!("{}{}", self.failure_prefix(), detail)
    }
}

/// Trim whitespace and trailing slashes; empty falls back to the default
pub fn normalize_base_url(base: &str) -> String {
    let trimmed = base.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn ping_url(base: &str) -> String {
    format!("{}{}", normalize_base_url(base), PING_PATH)
}

fn extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

pub fn is_accepted_file_name(file_name: &str) -> bool {
    extension(file_name)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// MIME type for the multipart `file` part
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    match extension(file_name).as_deref() {
        Some("csv") => "text/csv",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        _ => "application/octet-stream",
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnsBody {
    Columns { columns: Vec<String> },
    Failure { error: String },
}

/// Parse a 2xx `/columns` body
///
/// The backend reports unsupported formats as `{"error": "..."}` with a
/// success status; that is returned as `Err(message)`.
pub fn parse_columns_response(body: &str) -> Result<std::result::Result<Vec<String>, String>> {
    let parsed: ColumnsBody = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("columns response: {}", e)))?;
    Ok(match parsed {
        ColumnsBody::Columns { columns } => Ok(columns),
        ColumnsBody::Failure { error } => Err(error),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnalyzeBody {
    Records(Vec<AnalysisRecord>),
    Envelope {
        results: Vec<AnalysisRecord>,
        #[serde(default)]
        metadata: Option<PageMetadata>,
    },
}

/// Parse a 2xx `/analyze` body: a bare array or a paginated envelope
pub fn parse_analysis_response(body: &str) -> Result<AnalysisPage> {
    let parsed: AnalyzeBody = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("analysis response: {}", e)))?;
    Ok(match parsed {
        AnalyzeBody::Records(records) => AnalysisPage::from(records),
        AnalyzeBody::Envelope { results, metadata } => AnalysisPage { records: results, metadata },
    })
}

/// Sort direction accepted by `/analyze`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Unknown sort order: {}. Use asc or desc", s)),
        }
    }
}

/// Optional `/analyze` query parameters; unset values use backend defaults
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub search: Option<String>,
}

impl AnalyzeOptions {
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn validate(&self) -> Result<()> {
        if self.page == Some(0) {
            return Err(Error::Parse("page must be >= 1".into()));
        }
        if let Some(size) = self.page_size {
            if size == 0 || size > Self::MAX_PAGE_SIZE {
                return Err(Error::Parse(format!(
                    "page_size must be between 1 and {}",
                    Self::MAX_PAGE_SIZE
                )));
            }
        }
        Ok(())
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size", size.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("sort_by", sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order", order.as_str().to_string()));
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

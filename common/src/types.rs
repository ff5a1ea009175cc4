//! Result record types
//!
//! Types shared by the CLI and the Web (WASM) front end:
//! - AnalysisRecord: one output row of the analysis, keyed by field name
//! - PageMetadata: pagination info when the backend answers with an envelope
//! - AnalysisPage: records plus optional metadata

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One result row returned by `/analyze`.
///
/// Backed by an insertion-ordered JSON object so the key order of the first
/// record can drive column order for rendering and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisRecord(Map<String, Value>);

impl AnalysisRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, keeps insertion order
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display text of a field; missing fields render as an empty string
    pub fn text(&self, key: &str) -> String {
        self.get(key).map(scalar_text).unwrap_or_default()
    }

    /// Truthiness of a field; missing fields are falsy
    pub fn is_truthy(&self, key: &str) -> bool {
        self.get(key).map(is_truthy).unwrap_or(false)
    }
}

impl From<Map<String, Value>> for AnalysisRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AnalysisRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Pagination metadata (`{"results": [...], "metadata": {...}}` envelope)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Parsed `/analyze` response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisPage {
    pub records: Vec<AnalysisRecord>,
    pub metadata: Option<PageMetadata>,
}

impl From<Vec<AnalysisRecord>> for AnalysisPage {
    fn from(records: Vec<AnalysisRecord>) -> Self {
        Self { records, metadata: None }
    }
}

/// Keys of the first record, in that record's order
pub fn header_keys(records: &[AnalysisRecord]) -> Vec<&str> {
    records
        .first()
        .map(|first| first.keys().collect())
        .unwrap_or_default()
}

/// Render a scalar the way it is shown in tables and exports
///
/// Strings are verbatim, integral numbers have no fractional part,
/// null is empty and nested values fall back to compact JSON.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    f.to_string()
                }
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// JavaScript-style truthiness: false, 0, "" and null are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

//! Upload session state machine
//!
//! Holds everything the upload form edits (file, discovered columns, column
//! assignment, prompt, results, status) and the transitions between
//! `Idle → LoadingColumns → Ready/Error → Submitting → Ready/Error`.
//!
//! The session never performs I/O. Actions that need the backend return a
//! request value tagged with a [`RequestToken`]; the caller performs the call
//! and hands the outcome back with the same token. Outcomes carrying any
//! other token are stale and dropped, so a slow response for an old file can
//! never overwrite the state of a newer one.
//!
//! `F` is the platform file handle (`web_sys::File` in the browser, an
//! in-memory upload on the CLI).

use crate::api::{Endpoint, FIELD_PROMPT};
use crate::columns::{auto_select, ColumnField, ColumnSelection, SelectionError};
use crate::export::{build_csv_export, CsvExport};
use crate::prompts::DEFAULT_PROMPT;
use crate::types::{AnalysisPage, AnalysisRecord, PageMetadata};
use crate::validation::{validate_submission, ValidationError};
use crate::view::{full_table, summary_rows, ResultTable, SummaryRow};

/// Session status
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    LoadingColumns,
    Ready,
    Submitting,
    Error(String),
}

impl Status {
    /// A request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, Status::LoadingColumns | Status::Submitting)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies the request a network outcome belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Result of handing a network outcome to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Token no longer current; the session was not touched
    Stale,
}

/// Column discovery call to perform (`POST /columns`)
#[derive(Debug, Clone)]
pub struct ColumnsRequest<F> {
    pub token: RequestToken,
    pub file: F,
}

/// Analysis call to perform (`POST /analyze`)
#[derive(Debug, Clone)]
pub struct AnalyzeRequest<F> {
    pub token: RequestToken,
    pub file: F,
    pub title_col: String,
    pub abstract_col: String,
    pub claims_col: String,
    pub prompt: String,
}

impl<F> AnalyzeRequest<F> {
    /// The four multipart text fields, in send order
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            (ColumnField::Title.form_name(), self.title_col.as_str()),
            (ColumnField::Abstract.form_name(), self.abstract_col.as_str()),
            (ColumnField::Claims.form_name(), self.claims_col.as_str()),
            (FIELD_PROMPT, self.prompt.as_str()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct UploadSession<F> {
    file: Option<F>,
    columns: Vec<String>,
    selection: ColumnSelection,
    prompt: String,
    results: Vec<AnalysisRecord>,
    metadata: Option<PageMetadata>,
    status: Status,
    token: RequestToken,
}

impl<F> Default for UploadSession<F> {
    fn default() -> Self {
        Self::with_prompt(DEFAULT_PROMPT)
    }
}

impl<F> UploadSession<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            file: None,
            columns: Vec::new(),
            selection: ColumnSelection::default(),
            prompt: prompt.into(),
            results: Vec::new(),
            metadata: None,
            status: Status::Idle,
            token: RequestToken::default(),
        }
    }

    // =============================================
    // Accessors
    // =============================================

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn selection(&self) -> &ColumnSelection {
        &self.selection
    }

    pub fn column(&self, field: ColumnField) -> Option<&str> {
        self.selection.get(field)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn results(&self) -> &[AnalysisRecord] {
        &self.results
    }

    pub fn metadata(&self) -> Option<&PageMetadata> {
        self.metadata.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    pub fn is_busy(&self) -> bool {
        self.status.is_busy()
    }

    /// Token of the most recently issued request
    pub fn current_token(&self) -> RequestToken {
        self.token
    }

    /// File picker enabled
    pub fn can_select_file(&self) -> bool {
        !self.is_busy()
    }

    /// Column dropdowns enabled
    pub fn can_edit_columns(&self) -> bool {
        !self.columns.is_empty() && !self.is_busy()
    }

    /// Submit button enabled
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && self.file.is_some() && !self.columns.is_empty()
    }

    /// Dropdown option for `field` disabled because another field holds it
    pub fn is_option_disabled(&self, field: ColumnField, column: &str) -> bool {
        self.selection.assigned_elsewhere(field, column).is_some()
    }

    /// Columns selectable for `field` (not held by the other two fields)
    pub fn available_columns(&self, field: ColumnField) -> Vec<&str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| !self.is_option_disabled(field, c))
            .collect()
    }

    // =============================================
    // Transitions
    // =============================================

    fn reset_file_state(&mut self) {
        self.columns.clear();
        self.selection.clear();
        self.results.clear();
        self.metadata = None;
    }

    /// Replace the file and start column discovery
    ///
    /// Clears columns, selections, results and error regardless of prior
    /// state; any outstanding request becomes stale.
    pub fn select_file(&mut self, file: F) -> ColumnsRequest<F>
    where
        F: Clone,
    {
        self.reset_file_state();
        self.file = Some(file.clone());
        self.token = self.token.next();
        self.status = Status::LoadingColumns;
        ColumnsRequest { token: self.token, file }
    }

    /// Apply the outcome of column discovery
    ///
    /// `Err` carries the server body text or transport error text.
    pub fn columns_loaded(
        &mut self,
        token: RequestToken,
        outcome: Result<Vec<String>, String>,
    ) -> Completion {
        if token != self.token || self.status != Status::LoadingColumns {
            return Completion::Stale;
        }

        match outcome {
            Ok(columns) => {
                let mut unique: Vec<String> = Vec::with_capacity(columns.len());
                for column in columns {
                    if !unique.contains(&column) {
                        unique.push(column);
                    }
                }
                self.selection = auto_select(&unique);
                self.columns = unique;
                self.status = Status::Ready;
            }
            Err(detail) => {
                self.columns.clear();
                self.selection.clear();
                self.status = Status::Error(Endpoint::Columns.failure_message(&detail));
            }
        }
        Completion::Applied
    }

    /// Drop the file and return to `Idle`
    pub fn clear_file(&mut self) {
        self.file = None;
        self.reset_file_state();
        self.token = self.token.next();
        self.status = Status::Idle;
    }

    /// Assign (or unset with `None`) the column for one field
    ///
    /// A column already held by another field is rejected rather than moved.
    pub fn set_column(&mut self, field: ColumnField, value: Option<String>) -> Result<(), SelectionError> {
        if self.is_busy() {
            return Err(SelectionError::Locked);
        }

        if let Some(column) = value.as_deref().filter(|c| !c.is_empty()) {
            if !self.columns.iter().any(|c| c == column) {
                return Err(SelectionError::UnknownColumn(column.to_string()));
            }
            if let Some(assigned_to) = self.selection.assigned_elsewhere(field, column) {
                return Err(SelectionError::AlreadyAssigned {
                    column: column.to_string(),
                    assigned_to,
                });
            }
        }

        self.selection.set(field, value);
        Ok(())
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    /// Validate and start the analysis call
    ///
    /// On a validation failure the message becomes the session error and no
    /// request is produced. On success previous results are cleared before
    /// the request is handed out.
    pub fn submit(&mut self) -> Result<AnalyzeRequest<F>, ValidationError>
    where
        F: Clone,
    {
        if self.is_busy() {
            return Err(ValidationError::Busy);
        }

        if let Err(err) = validate_submission(self.file.is_some(), &self.selection, &self.prompt) {
            self.status = Status::Error(err.to_string());
            return Err(err);
        }

        let (Some(file), Some(title), Some(abstract_col), Some(claims)) = (
            self.file.clone(),
            self.selection.title.clone(),
            self.selection.abstract_col.clone(),
            self.selection.claims.clone(),
        ) else {
            let err = ValidationError::MissingFields;
            self.status = Status::Error(err.to_string());
            return Err(err);
        };

        self.results.clear();
        self.metadata = None;
        self.token = self.token.next();
        self.status = Status::Submitting;

        Ok(AnalyzeRequest {
            token: self.token,
            file,
            title_col: title,
            abstract_col,
            claims_col: claims,
            prompt: self.prompt.clone(),
        })
    }

    /// Apply the outcome of the analysis call
    ///
    /// Failures leave results empty; the earlier results are not restored.
    pub fn analysis_finished(
        &mut self,
        token: RequestToken,
        outcome: Result<AnalysisPage, String>,
    ) -> Completion {
        if token != self.token || self.status != Status::Submitting {
            return Completion::Stale;
        }

        match outcome {
            Ok(page) => {
                self.results = page.records;
                self.metadata = page.metadata;
                self.status = Status::Ready;
            }
            Err(detail) => {
                self.results.clear();
                self.metadata = None;
                self.status = Status::Error(Endpoint::Analyze.failure_message(&detail));
            }
        }
        Completion::Applied
    }

    // =============================================
    // Output
    // =============================================

    /// CSV download; `None` when there are no results
    pub fn export_csv(&self) -> Option<CsvExport> {
        build_csv_export(&self.results)
    }

    pub fn summary_rows(&self) -> Option<Vec<SummaryRow>> {
        summary_rows(&self.results)
    }

    pub fn full_table(&self) -> Option<ResultTable> {
        full_table(&self.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    type Session = UploadSession<&'static str>;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Session with a file and the three standard columns loaded
    fn ready_session() -> Session {
        let mut session = Session::new();
        let request = session.select_file("patents.csv");
        session.columns_loaded(request.token, Ok(cols(&["Title", "Abstract", "Claims"])));
        session
    }

    fn sample_record() -> AnalysisRecord {
        serde_json::from_value(json!({
            "relevance_score": 5,
            "SUMMARY": "ok",
            "reasoning": "r",
            "follow_up_recommended": true
        }))
        .expect("record")
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = Session::new();
        assert_eq!(session.status(), &Status::Idle);
        assert!(session.columns().is_empty());
        assert_eq!(session.prompt(), DEFAULT_PROMPT);
        assert!(!session.can_submit());
        assert!(session.can_select_file());
    }

    #[test]
    fn test_select_file_starts_loading() {
        let mut session = Session::new();
        let request = session.select_file("a.csv");

        assert_eq!(request.file, "a.csv");
        assert_eq!(request.token, session.current_token());
        assert_eq!(session.status(), &Status::LoadingColumns);
        assert!(!session.can_select_file());
        assert!(!session.can_submit());
        assert!(!session.can_edit_columns());
    }

    #[test]
    fn test_columns_loaded_auto_selects() {
        let session = ready_session();
        assert_eq!(session.status(), &Status::Ready);
        assert_eq!(session.column(ColumnField::Title), Some("Title"));
        assert_eq!(session.column(ColumnField::Abstract), Some("Abstract"));
        assert_eq!(session.column(ColumnField::Claims), Some("Claims"));
        assert!(session.can_submit());
    }

    #[test]
    fn test_columns_loaded_dedupes() {
        let mut session = Session::new();
        let request = session.select_file("a.csv");
        session.columns_loaded(request.token, Ok(cols(&["A", "B", "A", "C"])));
        assert_eq!(session.columns(), &["A", "B", "C"]);
    }

    #[test]
    fn test_columns_failure_sets_error() {
        let mut session = Session::new();
        let request = session.select_file("a.txt");
        let completion = session.columns_loaded(request.token, Err("Unsupported file format".into()));

        assert_eq!(completion, Completion::Applied);
        assert_eq!(
            session.error_message(),
            Some("Failed to load columns: Unsupported file format")
        );
        assert!(session.columns().is_empty());
        assert!(!session.can_submit());
    }

    #[test]
    fn test_columns_failure_empty_body_uses_fallback() {
        let mut session = Session::new();
        let request = session.select_file("a.csv");
        session.columns_loaded(request.token, Err(String::new()));
        assert_eq!(
            session.error_message(),
            Some("Failed to load columns: Could not load columns.")
        );
    }

    #[test]
    fn test_stale_columns_response_discarded() {
        let mut session = Session::new();
        let first = session.select_file("old.csv");
        let second = session.select_file("new.csv");

        let stale = session.columns_loaded(first.token, Ok(cols(&["Old"])));
        assert_eq!(stale, Completion::Stale);
        assert!(session.columns().is_empty());
        assert_eq!(session.status(), &Status::LoadingColumns);

        let applied = session.columns_loaded(second.token, Ok(cols(&["Title", "Abstract", "Claims"])));
        assert_eq!(applied, Completion::Applied);
        assert_eq!(session.file(), Some(&"new.csv"));
        assert_eq!(session.columns().len(), 3);
    }

    #[test]
    fn test_response_after_clear_is_stale() {
        let mut session = Session::new();
        let request = session.select_file("a.csv");
        session.clear_file();

        let completion = session.columns_loaded(request.token, Ok(cols(&["Title"])));
        assert_eq!(completion, Completion::Stale);
        assert_eq!(session.status(), &Status::Idle);
        assert!(session.columns().is_empty());
    }

    #[test]
    fn test_select_file_resets_everything() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        session.analysis_finished(request.token, Ok(vec![sample_record()].into()));
        assert_eq!(session.results().len(), 1);

        session.select_file("other.csv");
        assert!(session.columns().is_empty());
        assert_eq!(session.selection(), &ColumnSelection::default());
        assert!(session.results().is_empty());
        assert_eq!(session.error_message(), None);
    }

    #[test]
    fn test_select_file_clears_error() {
        let mut session = Session::new();
        let request = session.select_file("a.csv");
        session.columns_loaded(request.token, Err("boom".into()));
        assert!(session.error_message().is_some());

        session.select_file("b.csv");
        assert_eq!(session.error_message(), None);
    }

    #[test]
    fn test_clear_file() {
        let mut session = ready_session();
        session.clear_file();
        assert_eq!(session.file(), None);
        assert!(session.columns().is_empty());
        assert_eq!(session.selection(), &ColumnSelection::default());
        assert!(session.results().is_empty());
        assert_eq!(session.status(), &Status::Idle);
    }

    #[test]
    fn test_set_column_rejects_assigned() {
        let mut session = ready_session();
        let result = session.set_column(ColumnField::Title, Some("Abstract".into()));

        assert_eq!(
            result,
            Err(SelectionError::AlreadyAssigned {
                column: "Abstract".into(),
                assigned_to: ColumnField::Abstract,
            })
        );
        // nothing overwritten
        assert_eq!(session.column(ColumnField::Title), Some("Title"));
        assert_eq!(session.column(ColumnField::Abstract), Some("Abstract"));
    }

    #[test]
    fn test_set_column_after_unset() {
        let mut session = ready_session();
        session.set_column(ColumnField::Abstract, None).expect("unset failed");
        session
            .set_column(ColumnField::Title, Some("Abstract".into()))
            .expect("set failed");
        assert_eq!(session.column(ColumnField::Title), Some("Abstract"));
    }

    #[test]
    fn test_set_column_unknown() {
        let mut session = ready_session();
        let result = session.set_column(ColumnField::Claims, Some("Nope".into()));
        assert_eq!(result, Err(SelectionError::UnknownColumn("Nope".into())));
    }

    #[test]
    fn test_set_column_locked_while_loading() {
        let mut session = Session::new();
        session.select_file("a.csv");
        assert_eq!(
            session.set_column(ColumnField::Title, None),
            Err(SelectionError::Locked)
        );
    }

    #[test]
    fn test_option_disabled() {
        let session = ready_session();
        assert!(session.is_option_disabled(ColumnField::Title, "Abstract"));
        assert!(session.is_option_disabled(ColumnField::Title, "Claims"));
        assert!(!session.is_option_disabled(ColumnField::Title, "Title"));
        assert_eq!(session.available_columns(ColumnField::Claims), vec!["Claims"]);
    }

    #[test]
    fn test_submit_without_file() {
        let mut session = Session::new();
        let token = session.current_token();
        assert_eq!(session.submit().err(), Some(ValidationError::MissingFields));
        assert_eq!(
            session.error_message(),
            Some("Please ensure all required fields are selected.")
        );
        assert_eq!(session.current_token(), token);
    }

    #[test]
    fn test_submit_blank_prompt() {
        let mut session = ready_session();
        session.set_prompt("   ");
        assert_eq!(session.submit().err(), Some(ValidationError::MissingFields));
        assert_ne!(session.status(), &Status::Submitting);
    }

    #[test]
    fn test_submit_missing_column() {
        let mut session = ready_session();
        session.set_column(ColumnField::Claims, None).expect("unset failed");
        assert_eq!(session.submit().err(), Some(ValidationError::MissingFields));
    }

    #[test]
    fn test_submit_two_column_file() {
        let mut session = Session::new();
        let request = session.select_file("a.csv");
        // two-column file: auto-select leaves claims unset
        session.columns_loaded(request.token, Ok(cols(&["Title", "Abstract"])));
        assert_eq!(session.column(ColumnField::Claims), None);
        assert_eq!(session.submit().err(), Some(ValidationError::MissingFields));
    }

    #[test]
    fn test_validation_failure_keeps_results() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        session.analysis_finished(request.token, Ok(vec![sample_record()].into()));

        session.set_prompt("");
        assert!(session.submit().is_err());
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_submit_builds_request() {
        let mut session = ready_session();
        session.set_prompt("X");
        let request = session.submit().expect("submit failed");

        assert_eq!(session.status(), &Status::Submitting);
        assert_eq!(request.token, session.current_token());
        assert_eq!(request.file, "patents.csv");
        assert_eq!(
            request.form_fields(),
            [
                ("title_col", "Title"),
                ("abstract_col", "Abstract"),
                ("claims_col", "Claims"),
                ("custom_prompt", "X"),
            ]
        );
    }

    #[test]
    fn test_submit_while_submitting_rejected() {
        let mut session = ready_session();
        session.submit().expect("submit failed");
        assert_eq!(session.submit().err(), Some(ValidationError::Busy));
        assert_eq!(session.status(), &Status::Submitting);
    }

    #[test]
    fn test_submit_clears_previous_results() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        session.analysis_finished(request.token, Ok(vec![sample_record()].into()));

        session.submit().expect("submit failed");
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_analysis_success() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        let completion = session.analysis_finished(request.token, Ok(vec![sample_record()].into()));

        assert_eq!(completion, Completion::Applied);
        assert_eq!(session.status(), &Status::Ready);
        let rows = session.summary_rows().expect("rows missing");
        assert_eq!(rows[0].cells(), ["5", "ok", "r", "Yes"]);
    }

    #[test]
    fn test_analysis_failure() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        session.analysis_finished(request.token, Err("server error".into()));

        let message = session.error_message().expect("error missing");
        assert!(message.contains("server error"));
        assert!(session.results().is_empty());
        // form stays usable
        assert!(session.can_submit());
    }

    #[test]
    fn test_stale_analysis_response() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        session.analysis_finished(request.token, Err("first".into()));

        let completion = session.analysis_finished(request.token, Ok(vec![sample_record()].into()));
        assert_eq!(completion, Completion::Stale);
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_export_csv_empty_is_none() {
        assert!(ready_session().export_csv().is_none());
    }

    #[test]
    fn test_export_csv_after_analysis() {
        let mut session = ready_session();
        let request = session.submit().expect("submit failed");
        session.analysis_finished(request.token, Ok(vec![sample_record()].into()));

        let first = session.export_csv().expect("export missing");
        let second = session.export_csv().expect("export missing");
        assert_eq!(first, second);
        assert!(first.content.starts_with("\"relevance_score\""));
    }
}

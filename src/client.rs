//! Analysis backend client
//!
//! Multipart uploads to `/columns` and `/analyze`. Response bodies are read
//! as text and parsed with the shared contract so the CLI and the web app
//! interpret the backend identically.

use crate::error::{PatentError, Result};
use patent_analysis_common::api::{
    self, is_accepted_file_name, mime_for_file_name, parse_analysis_response,
    parse_columns_response, FIELD_FILE,
};
use patent_analysis_common::{AnalysisPage, AnalyzeOptions, AnalyzeRequest, Endpoint};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Spreadsheet held in memory for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    bytes: Arc<[u8]>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: Arc::from(bytes.into()),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PatentError::FileNotFound(path.display().to_string()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        if !is_accepted_file_name(&name) {
            tracing::warn!(file = %name, "expected a .csv or .xlsx file, uploading anyway");
        }

        let bytes = std::fs::read(path)?;
        Ok(Self::new(name, bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn part(&self) -> Result<Part> {
        let part = Part::bytes(self.bytes.to_vec())
            .file_name(self.name.clone())
            .mime_str(mime_for_file_name(&self.name))?;
        Ok(part)
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: api::normalize_base_url(base),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(PatentError::Api { status: status.as_u16(), body })
        }
    }

    /// `POST /columns` with the file as the only multipart field
    pub async fn fetch_columns(&self, file: &UploadFile) -> Result<Vec<String>> {
        let url = Endpoint::Columns.url(&self.base);
        tracing::debug!(%url, file = %file.name, bytes = file.len(), "requesting columns");

        let form = Form::new().part(FIELD_FILE, file.part()?);
        let response = self.http.post(&url).multipart(form).send().await?;
        let body = Self::read_body(response).await?;

        match parse_columns_response(&body)? {
            Ok(columns) => {
                tracing::debug!(count = columns.len(), "columns received");
                Ok(columns)
            }
            Err(message) => Err(PatentError::Api { status: 200, body: message }),
        }
    }

    /// `POST /analyze` with the file, the three column names and the prompt
    pub async fn analyze(
        &self,
        request: &AnalyzeRequest<UploadFile>,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisPage> {
        options.validate()?;

        let url = Endpoint::Analyze.url(&self.base);
        tracing::debug!(%url, token = request.token.value(), "submitting analysis");

        let mut form = Form::new().part(FIELD_FILE, request.file.part()?);
        for (name, value) in request.form_fields() {
            form = form.text(name, value.to_string());
        }

        let mut builder = self.http.post(&url);
        let query = options.query_pairs();
        if !query.is_empty() {
            builder = builder.query(&query);
        }

        let response = builder.multipart(form).send().await?;
        let body = Self::read_body(response).await?;
        let page = parse_analysis_response(&body)?;
        tracing::debug!(records = page.records.len(), "analysis received");
        Ok(page)
    }

    /// `GET /ping`
    pub async fn ping(&self) -> Result<bool> {
        let response = self.http.get(api::ping_url(&self.base)).send().await?;
        let body = Self::read_body(response).await?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        Ok(value.get("status").and_then(|s| s.as_str()) == Some("ok"))
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatentError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response (or an `{"error": ...}` body) from the backend
    #[error("Backend returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Inline error the session ended in (validation or remote failure)
    #[error("{0}")]
    Session(String),

    #[error(transparent)]
    Validation(#[from] patent_analysis_common::ValidationError),

    #[error(transparent)]
    Selection(#[from] patent_analysis_common::SelectionError),

    #[error("Interactive prompt failed: {0}")]
    Dialog(#[from] dialoguer::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel export error: {0}")]
    Excel(String),

    #[error("No results to export")]
    NoResults,

    #[error(transparent)]
    Common(#[from] patent_analysis_common::Error),
}

impl PatentError {
    /// Detail text handed to the session when a remote call fails
    ///
    /// The backend body verbatim for HTTP failures, the transport error text
    /// otherwise.
    pub fn detail(&self) -> String {
        match self {
            PatentError::Api { body, .. } => body.clone(),
            PatentError::Http(e) => e.to_string(),
            PatentError::Common(patent_analysis_common::Error::Parse(msg)) => msg.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatentError>;

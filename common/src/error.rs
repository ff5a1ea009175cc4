//! Error types

use thiserror::Error;

pub use crate::columns::SelectionError;
pub use crate::validation::ValidationError;

/// Shared error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Result alias
pub type Result<T> = std::result::Result<T, Error>;

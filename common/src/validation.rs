//! Submit gate
//!
//! Local checks run before `/analyze` is called. A failure here never
//! reaches the network.

use crate::columns::ColumnSelection;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please ensure all required fields are selected.")]
    MissingFields,

    #[error("Title, Abstract, and Claims columns must be unique.")]
    DuplicateColumns,

    #[error("A request is already in progress.")]
    Busy,
}

/// Check that a submission is complete and consistent
///
/// # Arguments
/// * `has_file` - whether a file is selected
/// * `selection` - current column assignment
/// * `prompt` - prompt text; blank (whitespace only) counts as missing
pub fn validate_submission(
    has_file: bool,
    selection: &ColumnSelection,
    prompt: &str,
) -> Result<(), ValidationError> {
    if !has_file || !selection.is_complete() || prompt.trim().is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if selection.distinct_count() != 3 {
        return Err(ValidationError::DuplicateColumns);
    }

    Ok(())
}

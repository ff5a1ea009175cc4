//! CSV download written to disk

use crate::error::{PatentError, Result};
use patent_analysis_common::{encode_csv, AnalysisRecord};
use std::path::Path;

pub fn write_csv(records: &[AnalysisRecord], output_path: &Path) -> Result<()> {
    let content = encode_csv(records).ok_or(PatentError::NoResults)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, content)?;
    tracing::debug!(path = %output_path.display(), rows = records.len(), "csv written");
    Ok(())
}

//! Excel workbook (single "Results" sheet)

use crate::error::{PatentError, Result};
use patent_analysis_common::export::excel_core::generate_results_xlsx;
use patent_analysis_common::AnalysisRecord;
use std::path::Path;

pub fn write_excel(records: &[AnalysisRecord], output_path: &Path) -> Result<()> {
    let bytes = generate_results_xlsx(records)
        .map_err(PatentError::Excel)?
        .ok_or(PatentError::NoResults)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, bytes)?;
    tracing::debug!(path = %output_path.display(), rows = records.len(), "xlsx written");
    Ok(())
}

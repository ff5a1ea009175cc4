pub mod csv;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::{PatentError, Result};
use patent_analysis_common::export::excel_core::EXCEL_FILE_NAME;
use patent_analysis_common::export::CSV_FILE_NAME;
use patent_analysis_common::AnalysisRecord;
use std::path::{Path, PathBuf};

fn output_path_for_format(output: &Path, default_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(default_name)
    } else {
        output.to_path_buf()
    }
}

fn output_paths_for_both(output: &Path) -> (PathBuf, PathBuf) {
    if output.is_dir() || output.extension().is_none() {
        (output.join(CSV_FILE_NAME), output.join(EXCEL_FILE_NAME))
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("patent_analysis_results");
        (parent.join(format!("{}.csv", stem)), parent.join(format!("{}.xlsx", stem)))
    }
}

/// Write the results in the requested format(s); returns the written paths
pub fn export_results(records: &[AnalysisRecord], format: ExportFormat, output: &Path) -> Result<Vec<PathBuf>> {
    if records.is_empty() {
        return Err(PatentError::NoResults);
    }

    let (csv_path, excel_path) = match format {
        ExportFormat::Csv => (Some(output_path_for_format(output, CSV_FILE_NAME)), None),
        ExportFormat::Excel => (None, Some(output_path_for_format(output, EXCEL_FILE_NAME))),
        ExportFormat::Both => {
            let (csv, excel) = output_paths_for_both(output);
            (Some(csv), Some(excel))
        }
    };

    let mut written = Vec::new();
    if let Some(path) = csv_path {
        println!("- Writing CSV...");
        csv::write_csv(records, &path)?;
        println!("✔ CSV: {}", path.display());
        written.push(path);
    }
    if let Some(path) = excel_path {
        println!("- Writing Excel...");
        excel::write_excel(records, &path)?;
        println!("✔ Excel: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Load results saved by `analyze --output`
pub fn load_results(path: &Path) -> Result<Vec<AnalysisRecord>> {
    if !path.is_file() {
        return Err(PatentError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let page = patent_analysis_common::api::parse_analysis_response(&content)?;
    Ok(page.records)
}

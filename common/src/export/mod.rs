//! Export core modules shared across CLI and WASM wrappers.

pub mod csv_core;

#[cfg(feature = "excel")]
pub mod excel_core;

pub use csv_core::{build_csv_export, encode_csv, CsvExport, CSV_FILE_NAME, CSV_MIME_TYPE};

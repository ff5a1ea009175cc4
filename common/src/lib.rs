//! Patent Analysis Common Library
//!
//! Session model, validation, backend contract and exports shared by the
//! CLI and the Web (WASM) front end.

pub mod types;
pub mod api;
pub mod columns;
pub mod error;
pub mod export;
pub mod prompts;
pub mod session;
pub mod validation;
pub mod view;

pub use types::{AnalysisPage, AnalysisRecord, PageMetadata};
pub use api::{AnalyzeOptions, Endpoint, SortOrder, DEFAULT_API_BASE};
pub use columns::{auto_select, ColumnField, ColumnSelection};
pub use error::{Error, Result, SelectionError, ValidationError};
pub use export::{build_csv_export, encode_csv, CsvExport};
pub use prompts::DEFAULT_PROMPT;
pub use session::{AnalyzeRequest, ColumnsRequest, Completion, RequestToken, Status, UploadSession};
pub use view::{ResultView, ResultTable, SummaryRow};

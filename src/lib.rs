//! Patent analysis CLI
//!
//! Terminal front end for the patent analysis backend: upload a spreadsheet,
//! assign the title/abstract/claims columns, run the analysis and export the
//! results. Form state lives in `patent_analysis_common::UploadSession`.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod render;
pub mod workflow;

use clap::{Parser, Subcommand};
use patent_analysis_common::{ResultView, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "patent-analysis")]
#[command(about = "Upload patent spreadsheets for LLM analysis and export the results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Analysis backend base URL (overrides PATENT_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the columns the backend finds in a spreadsheet
    Columns {
        /// Spreadsheet (.csv or .xlsx)
        #[arg(required = true)]
        file: PathBuf,
    },

    /// Upload a spreadsheet and run the analysis
    Analyze {
        /// Spreadsheet (.csv or .xlsx)
        #[arg(required = true)]
        file: PathBuf,

        /// Title column (auto-selected when omitted)
        #[arg(long)]
        title_col: Option<String>,

        /// Abstract column (auto-selected when omitted)
        #[arg(long)]
        abstract_col: Option<String>,

        /// Claims column (auto-selected when omitted)
        #[arg(long)]
        claims_col: Option<String>,

        /// Analysis prompt
        #[arg(short, long, conflicts_with = "prompt_file")]
        prompt: Option<String>,

        /// Read the analysis prompt from a file
        #[arg(long)]
        prompt_file: Option<PathBuf>,

        /// Pick columns and edit the prompt interactively
        #[arg(short, long)]
        interactive: bool,

        /// Save the raw results as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export directory (CSV/Excel written here)
        #[arg(short, long)]
        export_dir: Option<PathBuf>,

        /// Export format (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Terminal rendering (full/summary)
        #[arg(long, default_value = "full")]
        view: ResultView,

        /// Result page (backend pagination)
        #[arg(long)]
        page: Option<u32>,

        /// Results per page (1-100)
        #[arg(long)]
        page_size: Option<u32>,

        /// Sort key
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction (asc/desc)
        #[arg(long)]
        sort_order: Option<SortOrder>,

        /// Filter results by text
        #[arg(long)]
        search: Option<String>,
    },

    /// Export saved JSON results to CSV/Excel
    Export {
        /// Results JSON file
        #[arg(required = true)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format (csv/excel/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,
    },

    /// Check that the backend is reachable
    Ping,

    /// Show or edit settings
    Config {
        /// Store the backend base URL
        #[arg(long)]
        set_api_url: Option<String>,

        /// Show settings
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Both,
}

impl ExportFormat {
    pub fn includes_csv(&self) -> bool {
        matches!(self, ExportFormat::Csv | ExportFormat::Both)
    }

    pub fn includes_excel(&self) -> bool {
        matches!(self, ExportFormat::Excel | ExportFormat::Both)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, excel, or both", s)),
        }
    }
}

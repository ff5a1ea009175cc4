//! Analysis backend access

pub mod backend;

use patent_analysis_common::api::normalize_base_url;
use patent_analysis_common::DEFAULT_API_BASE;

/// Backend base URL baked in at build time (`PATENT_API_URL`)
pub fn api_base() -> String {
    normalize_base_url(option_env!("PATENT_API_URL").unwrap_or(DEFAULT_API_BASE))
}

use crate::error::{PatentError, Result};
use patent_analysis_common::api::{normalize_base_url, API_BASE_ENV};
use patent_analysis_common::{DEFAULT_API_BASE, DEFAULT_PROMPT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: Option<String>,
    pub default_prompt: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            default_prompt: None,
            // analysis runs one model call per row
            timeout_seconds: 300,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PatentError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("patent-analysis").join("config.json"))
    }

    /// Backend base URL: CLI flag > `PATENT_API_URL` > config file > default
    pub fn api_base(&self, cli_override: Option<&str>) -> String {
        self.resolve_api_base(cli_override, std::env::var(API_BASE_ENV).ok())
    }

    pub fn resolve_api_base(&self, cli_override: Option<&str>, env_value: Option<String>) -> String {
        fn non_blank(s: &str) -> bool {
            !s.trim().is_empty()
        }
        let chosen = cli_override
            .filter(|s| non_blank(s))
            .map(str::to_string)
            .or_else(|| env_value.filter(|s| non_blank(s.as_str())))
            .or_else(|| self.api_base.clone().filter(|s| non_blank(s.as_str())))
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        normalize_base_url(&chosen)
    }

    pub fn prompt(&self) -> &str {
        self.default_prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PROMPT)
    }

    pub fn set_api_base(&mut self, url: String) -> Result<()> {
        self.api_base = Some(normalize_base_url(&url));
        self.save()
    }
}

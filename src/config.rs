//! Runtime configuration
//!
//! Defaults, then an optional JSON file in the user config directory, then
//! `BOOKFINDER_*` environment variables. The API key is never compiled in.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::search::EmptyPagePolicy;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Largest `maxResults` the catalog accepts
pub const MAX_PAGE_SIZE: u32 = 40;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("page_size must be between 1 and {max}, got {0}", max = MAX_PAGE_SIZE)]
    PageSize(u32),
    #[error("timeout_secs must be at least 1")]
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub keep_results_on_empty_page: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            keep_results_on_empty_page: false,
        }
    }
}

impl Config {
    /// Load from the default file location and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/bookfinder/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bookfinder").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Override fields from environment-style lookups
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = lookup("BOOKFINDER_API_KEY").filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup("BOOKFINDER_BASE_URL") {
            self.base_url = url;
        }
        if let Some(value) = lookup("BOOKFINDER_PAGE_SIZE") {
            self.page_size = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "BOOKFINDER_PAGE_SIZE",
                value,
            })?;
        }
        if let Some(value) = lookup("BOOKFINDER_TIMEOUT_SECS") {
            self.timeout_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "BOOKFINDER_TIMEOUT_SECS",
                value,
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSize(self.page_size));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }
        Ok(())
    }

    pub fn empty_page_policy(&self) -> EmptyPagePolicy {
        if self.keep_results_on_empty_page {
            EmptyPagePolicy::KeepResults
        } else {
            EmptyPagePolicy::ClearResults
        }
    }
}

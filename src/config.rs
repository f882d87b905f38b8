//! # Configuration Module
//!
//! This module handles application configuration including loading from TOML files,
//! providing default configurations, and resolving derived settings such as the
//! pages base URL and the persistent storage location.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::services::handoff;

/// Environment variable overriding the configuration file location
pub const CONFIG_PATH_ENV: &str = "TERMINAL_HUB_CONFIG";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
}

/// Application-level settings
///
/// Every field has a default, so a partial `[app]` table is enough.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
    /// Base URL the terminal pages are served under
    pub pages_base_url: String,
    /// Persistent store file; defaults to the user data directory
    pub storage_path: Option<PathBuf>,
    pub log_level: String,
    /// Seconds an inline login error stays visible
    pub notice_timeout_secs: u64,
    /// Origin terminal messages must come from; defaults to the pages origin
    pub allowed_message_origin: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "Terminal Hub".to_string(),
            pages_base_url: "http://localhost:8080/".to_string(),
            storage_path: None,
            log_level: "info".to_string(),
            notice_timeout_secs: 5,
            allowed_message_origin: None,
        }
    }
}

impl AppSettings {
    /// Parsed pages base URL, always ending in `/` so pages resolve beneath it
    pub fn pages_base(&self) -> Result<Url> {
        let mut base = self.pages_base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).with_context(|| format!("invalid pages_base_url '{}'", self.pages_base_url))
    }

    pub fn resolved_storage_path(&self) -> PathBuf {
        self.storage_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("terminal-hub").join("storage.json"))
                .unwrap_or_else(|| PathBuf::from("terminal-hub-storage.json"))
        })
    }

    pub fn message_origin(&self) -> Result<String> {
        match &self.allowed_message_origin {
            Some(origin) => Ok(origin.trim_end_matches('/').to_string()),
            None => Ok(handoff::origin_of(&self.pages_base()?)),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        default_config()
    }
}

/// Location of the configuration file: `$TERMINAL_HUB_CONFIG` or `./config.toml`
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

/// Loads configuration from `path`
///
/// # Returns
///
/// `Ok(None)` if the file doesn't exist, the parsed configuration if it does,
/// and an error if it exists but can't be read or parsed.
pub fn load_config_from(path: &Path) -> Result<Option<AppConfig>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    let config = toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(config))
}

/// Provides default application configuration
pub fn default_config() -> AppConfig {
    AppConfig {
        app: AppSettings::default(),
    }
}

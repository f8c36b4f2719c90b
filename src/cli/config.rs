//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{CategoryId, DEFAULT_COLOR};

/// Environment variable that overrides the configured server URL.
pub const API_URL_ENV: &str = "NOTES_API_URL";

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Notes server base URL
    pub api_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,

    /// Category id assigned to notes created without one. Must exist on the
    /// server.
    pub fallback_category: Option<u64>,

    /// Color given to categories created without one
    pub default_color: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notekeeper/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notekeeper")
            .join("config.toml")
    }

    /// Resolve the server URL.
    ///
    /// Precedence order:
    /// 1. CLI `--api-url` argument
    /// 2. `NOTES_API_URL` environment variable
    /// 3. Config file `api_url` setting
    /// 4. `http://localhost:5000`
    pub fn api_url(&self, cli_url: Option<&str>) -> String {
        self.resolve_api_url(cli_url, std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_url(&self, cli_url: Option<&str>, env_url: Option<String>) -> String {
        cli_url
            .map(str::to_string)
            .or(env_url.filter(|u| !u.trim().is_empty()))
            .or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }

    /// Category used for notes submitted without one.
    pub fn fallback_category(&self) -> CategoryId {
        self.fallback_category
            .filter(|id| *id > 0)
            .map(CategoryId::Id)
            .unwrap_or(CategoryId::FALLBACK)
    }

    /// Color for categories created without one.
    pub fn default_color(&self) -> &str {
        self.default_color.as_deref().unwrap_or(DEFAULT_COLOR)
    }
}

//! Configuration handling for the feedback TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Table the submissions are written to
pub const DEFAULT_TABLE: &str = "manifestacoes";

/// HTTP timeout when none is configured
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Environment variable overriding `store_url`
pub const STORE_URL_ENV: &str = "FEEDBACK_STORE_URL";

/// Environment variable overriding `store_key`
pub const STORE_KEY_ENV: &str = "FEEDBACK_STORE_KEY";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedbackConfig {
    /// Base URL of the hosted database
    pub store_url: Option<String>,
    /// Service key for the hosted database
    pub store_key: Option<String>,
    /// Submissions table name
    pub table: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Show the FAQ panel next to the form
    pub show_faq: Option<bool>,
}

impl FeedbackConfig {
    /// Get the project directories used for config and logs
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("org", "feedback-desk", "feedback-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(
            std::env::var(STORE_URL_ENV).ok(),
            std::env::var(STORE_KEY_ENV).ok(),
        );
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FeedbackConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Non-empty environment values win over the file
    fn apply_overrides(&mut self, url: Option<String>, key: Option<String>) {
        if let Some(url) = url.filter(|v| !v.trim().is_empty()) {
            self.store_url = Some(url);
        }
        if let Some(key) = key.filter(|v| !v.trim().is_empty()) {
            self.store_key = Some(key);
        }
    }

    /// URL and key, when both are set
    pub fn store_credentials(&self) -> Option<(&str, &str)> {
        let url = self.store_url.as_deref().filter(|v| !v.trim().is_empty())?;
        let key = self.store_key.as_deref().filter(|v| !v.trim().is_empty())?;
        Some((url, key))
    }

    pub fn table(&self) -> &str {
        self.table
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TABLE)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn show_faq(&self) -> bool {
        self.show_faq.unwrap_or(true)
    }
}

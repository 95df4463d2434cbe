use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::git::DEFAULT_DIFF_LIMIT;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Provider used when `-p` is not given
    #[serde(default)]
    pub default_provider: Option<String>,

    /// Preferred model per provider name, skips the model menu
    #[serde(default)]
    pub models: HashMap<String, String>,

    /// Byte budget for the staged diff
    #[serde(default = "default_diff_limit")]
    pub diff_limit: usize,

    #[serde(default)]
    pub emoji: bool,

    /// Kill a generation that runs longer than this
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_diff_limit() -> usize {
    DEFAULT_DIFF_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: None,
            models: HashMap::new(),
            diff_limit: DEFAULT_DIFF_LIMIT,
            emoji: false,
            timeout_secs: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", config_path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("git-quill")
            .join("config.toml")
    }

    /// Configured model for a provider, matched ignoring case
    pub fn model_for(&self, provider: &str) -> Option<&str> {
        self.models
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(provider))
            .map(|(_, model)| model.as_str())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }
}

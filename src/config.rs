//! Configuration loading and management for worklog.
//!
//! Settings come from an optional `worklog.toml`; the API credential comes from
//! the command line or the environment and never from the file.

use crate::category::CategoryPolicy;
use crate::report::ReportStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

const CONFIG_FILE_NAME: &str = "worklog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("no API key provided: pass --credential or set OPENAI_API_KEY")]
    MissingCredential,
}

/// LLM settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model identifier (e.g., "gpt-4o-mini")
    pub model: String,
    /// Upper bound on generated tokens per category
    pub max_tokens: u32,
    /// Base URL of an OpenAI-compatible API
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 500,
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 60,
        }
    }
}

impl AgentConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How the worklog is categorised and written
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub policy: CategoryPolicy,
    pub style: ReportStyle,
    /// Also write `{category}_items.txt` listings next to the report
    pub item_listings: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agent: AgentConfig,
    pub report: ReportConfig,
}

impl Config {
    /// Load configuration from the default locations, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from(CONFIG_FILE_NAME);
        if local_config.exists() {
            return Some(local_config);
        }

        let home_config = dirs::home_dir()?
            .join(".config")
            .join("worklog")
            .join(CONFIG_FILE_NAME);
        home_config.exists().then_some(home_config)
    }
}

/// Resolve the API credential: the explicit value wins, then the environment.
pub fn resolve_credential(explicit: Option<&str>) -> Result<String, ConfigError> {
    credential_from(explicit, std::env::var(API_KEY_ENV).ok())
}

fn credential_from(explicit: Option<&str>, env: Option<String>) -> Result<String, ConfigError> {
    explicit
        .map(str::to_string)
        .or(env)
        .filter(|key| !key.trim().is_empty())
        .ok_or(ConfigError::MissingCredential)
}

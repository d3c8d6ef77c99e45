//! Configuration loading and management for edusearch.
//!
//! Loads settings from `edusearch.toml` with environment variable overrides for sensitive data.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default system instruction sent with every summarization request
pub const DEFAULT_PERSONA: &str = "You are a helpful AI assistant, skilled at summarizing information from provided materials and answering user questions.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing OpenAI API key (set OPENAI_API_KEY or [api].openai_key)")]
    MissingApiKey,
    #[error("OpenAI API key has an incorrect format (expected an `sk-` prefix)")]
    InvalidApiKey,
    #[error("search backend URL is not configured (set EDUSEARCH_BASE_URL or [backend].base_url)")]
    MissingBaseUrl,
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Search backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the combined QA and YouTube search service
    pub base_url: String,
    /// Number of results requested per list
    pub k: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// LLM summarization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Chat model identifier
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    /// System instruction for the summarizer
    pub persona: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default location (edusearch.toml in cwd or home)
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("no config file found, using defaults");
                let mut config = Config::default();
                config.apply_env();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.apply_env();
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text without touching the environment
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Override sensitive values from environment variables
    fn apply_env(&mut self) {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
        if let Ok(url) = std::env::var("EDUSEARCH_BASE_URL") {
            self.backend.base_url = url;
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("edusearch.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        let home_config = dirs::home_dir()?
            .join(".config")
            .join("edusearch")
            .join("edusearch.toml");
        home_config.exists().then_some(home_config)
    }

    /// Get the OpenAI API key, checking its presence and format
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        let key = self
            .api
            .openai_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;
        if !key.starts_with("sk-") {
            return Err(ConfigError::InvalidApiKey);
        }
        Ok(key)
    }

    /// Check the settings needed to reach the search backend
    pub fn validate_backend(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        if self.backend.k == 0 {
            return Err(ConfigError::Invalid("k must be greater than 0".to_string()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Check everything a full search-and-summarize run needs
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_backend()?;
        self.api_key()?;
        if self.agent.model.trim().is_empty() {
            return Err(ConfigError::Invalid("agent.model must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            k: 3,
            timeout_secs: 60,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "o4-mini-2025-04-16".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            persona: DEFAULT_PERSONA.to_string(),
            timeout_secs: 120,
        }
    }
}

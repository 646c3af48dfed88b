
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::embeddings::RetryPolicy;
use crate::merge::DEFAULT_CURATED_SOURCE;

pub const DEFAULT_CSV_URL: &str = "https://hebbkx1anhila5yf.public.blob.vercel-storage.com/Untranslatable%20Words%20with%20Sources-Qg29WupfgFGdmHN545eqNO3O0rS39g.csv";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(skip)]
    pub base_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Provider-bound records between rate-limit pauses
    pub batch_size: u32,
    pub batch_pause_ms: u64,
    pub retry_attempts: u32,
    pub backoff_base_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-ada-002".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            batch_size: 10,
            batch_pause_ms: 1000,
            retry_attempts: 3,
            backoff_base_ms: 1000,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// Remote CSV the word list is published as
    pub csv_url: String,
    pub csv_output: PathBuf,
    /// Dataset the self-test checks for compatibility
    pub reference_path: PathBuf,
    /// Source credited to curated words without one
    pub curated_source: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            csv_url: DEFAULT_CSV_URL.to_string(),
            csv_output: PathBuf::from("public/words-data.json"),
            reference_path: PathBuf::from("public/data/words-with-embeddings.json"),
            curated_source: DEFAULT_CURATED_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found or could not be created")]
    DirectoryError,
    #[error("Invalid URL format: {0}")]
    InvalidUrl(String),
    #[error("Invalid batch size: {0} (must be between 1 and 1000)")]
    InvalidBatchSize(u32),
    #[error("Invalid model name: {0} (cannot be empty)")]
    InvalidModel(String),
    #[error("Invalid retry attempts: {0} (must be between 1 and 10)")]
    InvalidRetryAttempts(u32),
    #[error("Invalid timeout: {0} (must be between 1 and 300 seconds)")]
    InvalidTimeout(u64),
    #[error("Invalid API key variable name: {0:?} (cannot be empty)")]
    InvalidApiKeyEnv(String),
    #[error("{var} environment variable not set. Set your API key with: export {var}='your-api-key-here'")]
    MissingApiKey { var: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Default for Config {
    #[inline]
    fn default() -> Self {
        Self {
            embedding: EmbeddingConfig::default(),
            dataset: DatasetConfig::default(),
            base_dir: PathBuf::new(),
        }
    }
}

impl Config {
    /// Default configuration directory, `~/.words-prep`
    #[inline]
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::home_dir()
            .map(|home| home.join(".words-prep"))
            .ok_or(ConfigError::DirectoryError)
    }

    #[inline]
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join("config.toml");

        if !config_path.exists() {
            return Ok(Self {
                base_dir: config_dir.as_ref().to_path_buf(),
                ..Self::default()
            });
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;
        config.base_dir = config_dir.as_ref().to_path_buf();

        config
            .validate()
            .with_context(|| "Configuration validation failed")?;

        Ok(config)
    }

    #[inline]
    pub fn save(&self) -> Result<()> {
        self.validate()
            .context("Configuration validation failed before saving")?;

        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                self.base_dir.display()
            )
        })?;

        let config_path = self.config_file_path();
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    #[inline]
    pub fn config_file_path(&self) -> PathBuf {
        self.base_dir.join("config.toml")
    }

    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.embedding.validate()?;
        self.dataset.validate()?;
        Ok(())
    }
}

impl EmbeddingConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_url()?;

        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidModel(self.model.clone()));
        }

        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::InvalidApiKeyEnv(self.api_key_env.clone()));
        }

        if self.batch_size == 0 || self.batch_size > 1000 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }

        if !(1..=10).contains(&self.retry_attempts) {
            return Err(ConfigError::InvalidRetryAttempts(self.retry_attempts));
        }

        if !(1..=300).contains(&self.timeout_seconds) {
            return Err(ConfigError::InvalidTimeout(self.timeout_seconds));
        }

        Ok(())
    }

    #[inline]
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|_| ConfigError::InvalidUrl(self.base_url.clone()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        Ok(url)
    }

    /// Read the API key from the configured environment variable.
    #[inline]
    pub fn api_key_from_env(&self) -> Result<String, ConfigError> {
        self.resolve_api_key(env::var(&self.api_key_env).ok())
    }

    /// Accept a looked-up API key, rejecting a missing or blank value.
    #[inline]
    pub fn resolve_api_key(&self, value: Option<String>) -> Result<String, ConfigError> {
        value
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                var: self.api_key_env.clone(),
            })
    }

    #[inline]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.backoff_base_ms),
        )
    }

    #[inline]
    pub fn batch_pause(&self) -> Duration {
        Duration::from_millis(self.batch_pause_ms)
    }

    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl DatasetConfig {
    #[inline]
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.csv_url).map_err(|_| ConfigError::InvalidUrl(self.csv_url.clone()))?;
        Ok(())
    }
}

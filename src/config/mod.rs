// Configuration management module
// TOML settings for the embedding provider and dataset locations

pub mod settings;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::style;

pub use settings::{Config, ConfigError, DatasetConfig, EmbeddingConfig};

/// Get the configuration directory path
#[inline]
pub fn get_config_dir() -> Result<PathBuf, ConfigError> {
    Config::config_dir()
}

/// Print the effective configuration
#[inline]
pub fn show_config(config: &Config) {
    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Embedding Settings:").bold().yellow());
    match config.embedding.api_url() {
        Ok(url) => eprintln!("  API URL: {}", style(url).cyan()),
        Err(e) => eprintln!("  API URL: {} ({})", style("Invalid").red(), e),
    }
    eprintln!("  Model: {}", style(&config.embedding.model).cyan());
    eprintln!(
        "  API Key Variable: {}",
        style(&config.embedding.api_key_env).cyan()
    );
    eprintln!("  Batch Size: {}", style(config.embedding.batch_size).cyan());
    eprintln!(
        "  Batch Pause: {}",
        style(format!("{:?}", config.embedding.batch_pause())).cyan()
    );
    eprintln!(
        "  Retry Attempts: {}",
        style(config.embedding.retry_attempts).cyan()
    );
    eprintln!(
        "  Timeout: {}",
        style(format!("{:?}", config.embedding.timeout())).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Dataset Settings:").bold().yellow());
    eprintln!("  CSV URL: {}", style(&config.dataset.csv_url).cyan());
    eprintln!(
        "  CSV Output: {}",
        style(config.dataset.csv_output.display()).cyan()
    );
    eprintln!(
        "  Reference Dataset: {}",
        style(config.dataset.reference_path.display()).cyan()
    );
    eprintln!(
        "  Curated Source: {}",
        style(&config.dataset.curated_source).cyan()
    );

    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );
}

/// Write the default configuration file unless one already exists.
///
/// Returns `true` when a file was written.
#[inline]
pub fn init_config(config_dir: &Path) -> Result<bool> {
    let config = Config::load(config_dir).context("Failed to load configuration")?;
    if config.config_file_path().exists() {
        return Ok(false);
    }

    config.save().context("Failed to save configuration")?;
    Ok(true)
}

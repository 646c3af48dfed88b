use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Dataset not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Embedding error: {0}")]
    Provider(#[from] embeddings::ProviderError),

    #[error("Failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod dataset;
pub mod embeddings;
pub mod fetch;
pub mod merge;
pub mod selftest;

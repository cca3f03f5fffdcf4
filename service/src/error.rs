//! Error types for the service.

use std::path::PathBuf;

/// All errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("request error: {0}")]
    Request(String),

    #[error("failed to read request file {path}: {source}")]
    RequestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse request JSON: {0}")]
    RequestParse(#[from] serde_json::Error),

    #[error("failed to serialize response: {0}")]
    Serialize(serde_json::Error),

    #[error("optimizer error: {0}")]
    Engine(#[from] opto::Error),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

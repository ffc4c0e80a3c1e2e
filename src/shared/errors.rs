//! Error handling for the application

use crate::shared::types::SubnetId;
use thiserror::Error;

/// Price feed errors
#[derive(Error, Debug, Clone)]
pub enum PriceError {
    #[error("Subnet {0} not found")]
    NotFound(SubnetId),

    #[error("Price request timed out after {0}s")]
    Timeout(u64),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Http(u16),

    #[error("Invalid price data: {0}")]
    InvalidData(String),
}

/// Side-effect errors (sound, notification, speech)
#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Sound file not found: {0}")]
    SoundFileMissing(String),

    #[error("Failed to launch {command}: {source}")]
    Launch {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with status {status}")]
    CommandFailed { command: &'static str, status: i32 },
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

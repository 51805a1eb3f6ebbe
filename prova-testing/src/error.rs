//! Error types for the reporting and configuration layers
//!
//! Assertion failures never travel through this type: they are data
//! carried by [`crate::TestResult`].

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProvaError>;

#[derive(Error, Debug)]
pub enum ProvaError {
    #[error("I/O error while writing report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ProvaError {
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

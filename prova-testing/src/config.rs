//! Run configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assertion::ACTUAL_RESULT_BUFFER_SIZE;
use crate::error::{ProvaError, Result};

/// Output format of the report driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Console,
    Json,
    Junit,
}

impl std::str::FromStr for ReportFormat {
    type Err = ProvaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(ReportFormat::Console),
            "json" => Ok(ReportFormat::Json),
            "junit" => Ok(ReportFormat::Junit),
            other => Err(ProvaError::invalid_config(format!(
                "unknown report format '{}' (expected console, json or junit)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvaConfig {
    /// Report format
    #[serde(default)]
    pub format: ReportFormat,

    /// Color PASSED / FAILED in console reports
    #[serde(default = "default_true")]
    pub color: bool,

    /// Capacity of the failure message buffer in bytes
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
}

impl Default for ProvaConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::default(),
            color: default_true(),
            buffer_capacity: default_buffer_capacity(),
        }
    }
}

impl ProvaConfig {
    /// Load configuration from a TOML file; a missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).map_err(|e| ProvaError::config_read(path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ProvaConfig =
            toml::from_str(content).map_err(|e| ProvaError::config_parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(ProvaError::invalid_config(
                "buffer_capacity must be at least 1 byte",
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_buffer_capacity() -> usize {
    ACTUAL_RESULT_BUFFER_SIZE
}

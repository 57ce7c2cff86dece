//! Logging configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: `pretty` or `json`
    #[serde(default = "default_format")]
    pub format: String,
}

/// Parsed log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LoggingConfig {
    pub fn log_format(&self) -> Result<LogFormat, ValidationError> {
        match self.format.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ValidationError::InvalidLogFormat(self.format.clone())),
        }
    }

    /// Validate logging configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.log_format().map(|_| ())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "pretty".to_string()
}

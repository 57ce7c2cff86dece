//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Session token and token file are both configured; pick one")]
    ConflictingTokenSources,

    #[error("Invalid log format '{0}' (expected pretty or json)")]
    InvalidLogFormat(String),

    #[error("Export output directory must not be empty")]
    EmptyOutputDir,
}

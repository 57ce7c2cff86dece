//! Backend API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Generation can take a while.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if url.trim_start_matches("https://").trim_start_matches("http://").is_empty() {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, timeout_secs: u64) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs,
        }
    }

    #[test]
    fn defaults_are_valid() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn https_url_is_valid() {
        assert!(config("https://drafts.example.com", 30).validate().is_ok());
    }

    #[test]
    fn non_http_url_is_rejected() {
        assert_eq!(
            config("ftp://example.com", 30).validate(),
            Err(ValidationError::InvalidBaseUrl("ftp://example.com".into()))
        );
        assert!(config("", 30).validate().is_err());
        assert!(config("http://", 30).validate().is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert_eq!(
            config("http://localhost:8000", 0).validate(),
            Err(ValidationError::InvalidTimeout)
        );
    }
}

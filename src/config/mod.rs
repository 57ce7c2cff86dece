//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DRAFTDECK` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use draftdeck::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend at {}", config.api.base_url);
//! ```

mod api;
mod error;
mod export;
mod logging;
mod session;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use session::SessionConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local backend without a session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend API (base URL, timeout)
    #[serde(default)]
    pub api: ApiConfig,

    /// Session token source
    #[serde(default)]
    pub session: SessionConfig,

    /// Log level and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Export destination
    #[serde(default)]
    pub export: ExportConfig,
}

impl AppConfig {
    /// Reads `.env` (if any), then every `DRAFTDECK__<SECTION>__<KEY>`
    /// variable, e.g. `DRAFTDECK__API__BASE_URL` or
    /// `DRAFTDECK__SESSION__TOKEN_FILE`. Unset keys fall back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DRAFTDECK")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Checks every section; the first failure wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.session.validate()?;
        self.logging.validate()?;
        self.export.validate()?;
        Ok(())
    }
}

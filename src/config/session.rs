//! Session token configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the session token comes from. At most one source may be set;
/// with neither, every operation fails with an authentication error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Token given inline (e.g. `DRAFTDECK__SESSION__TOKEN`)
    pub token: Option<SecretString>,

    /// File holding the token, as written by a login helper
    pub token_file: Option<PathBuf>,
}

impl SessionConfig {
    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.is_some() && self.token_file.is_some() {
            return Err(ValidationError::ConflictingTokenSources);
        }
        Ok(())
    }
}

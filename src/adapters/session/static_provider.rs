//! Session providers backed by a token known at startup or set at runtime.

use std::path::Path;
use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::SessionToken;
use crate::ports::SessionProvider;

/// Provider with a fixed token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticSessionProvider {
    token: Option<SessionToken>,
}

impl StaticSessionProvider {
    /// Provider without a session.
    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn new(token: SessionToken) -> Self {
        Self { token: Some(token) }
    }

    /// Provider for a raw token. A blank token means no session.
    pub fn with_token(raw: impl Into<String>) -> Self {
        Self {
            token: SessionToken::new(raw).ok(),
        }
    }

    /// Reads the token from a file, ignoring surrounding whitespace.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::with_token(raw))
    }
}

impl SessionProvider for StaticSessionProvider {
    fn current_token(&self) -> Option<SessionToken> {
        self.token.clone()
    }
}

/// Provider whose token can be swapped while the application runs,
/// e.g. after the user re-authenticates.
#[derive(Debug, Default)]
pub struct SharedSessionProvider {
    token: RwLock<Option<SessionToken>>,
}

impl SharedSessionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: SessionToken) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl SessionProvider for SharedSessionProvider {
    fn current_token(&self) -> Option<SessionToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

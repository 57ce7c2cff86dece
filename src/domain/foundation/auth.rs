//! Session credential types for the domain layer.
//!
//! The core never issues or stores tokens. A `SessionProvider` hands one in
//! per operation, and adapters attach it to their remote calls.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use super::ValidationError;

/// Bearer token for the current session.
///
/// The raw value is only reachable through [`SessionToken::expose`]; `Debug`
/// output is redacted so tokens never reach the logs.
#[derive(Clone)]
pub struct SessionToken(SecretString);

impl SessionToken {
    /// Wraps a raw token, rejecting blank values.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("session_token"));
        }
        Ok(Self(SecretString::new(trimmed.to_string())))
    }

    /// Returns the raw token for an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_and_exposes_raw_value() {
        let token = SessionToken::new("  abc.def.ghi\n").unwrap();
        assert_eq!(token.expose(), "abc.def.ghi");
    }

    #[test]
    fn blank_token_is_rejected() {
        assert!(SessionToken::new("   ").is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = SessionToken::new("super-secret").unwrap();
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}

//! Command infrastructure for application handlers.
//!
//! Every handler accepts a `CommandMetadata` alongside its command so that
//! correlation and source information travel with the operation into the
//! log spans without widening each handler signature.

use serde::{Deserialize, Serialize};

use super::CorrelationId;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// Links the log lines of one logical operation.
    correlation_id: CorrelationId,

    /// Front end that issued the command (e.g., "cli", "test").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    /// Creates metadata with a fresh correlation id.
    pub fn new() -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            source: None,
        }
    }

    /// Builder: reuse an existing correlation id.
    pub fn with_correlation_id(mut self, id: CorrelationId) -> Self {
        self.correlation_id = id;
        self
    }

    /// Builder: Add source identifier.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID.
    pub fn correlation_id(&self) -> CorrelationId {
        self.correlation_id
    }

    /// Returns the source if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

impl Default for CommandMetadata {
    fn default() -> Self {
        Self::new()
    }
}

//! Shared error type for collaborator ports.

use thiserror::Error;

use crate::domain::project::ProjectError;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollaboratorError {
    /// The session token was missing, invalid or expired.
    #[error("Unauthorized")]
    Unauthorized,

    /// The addressed resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The collaborator answered but refused the request.
    #[error("Rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The call never produced an answer (connect, timeout, I/O).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The answer could not be understood.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl CollaboratorError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        CollaboratorError::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        CollaboratorError::Transport(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        CollaboratorError::Malformed(message.into())
    }

    /// Maps a failure of a content-producing collaborator (suggestion,
    /// generation, refinement): malformed output is a contract violation.
    pub fn into_generation_error(self) -> ProjectError {
        match self {
            CollaboratorError::Malformed(message) => ProjectError::Generation(message),
            other => other.into(),
        }
    }
}

impl From<CollaboratorError> for ProjectError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Unauthorized => ProjectError::AuthRequired,
            CollaboratorError::NotFound(what) => ProjectError::NotFound(what),
            CollaboratorError::Rejected { status, message } if message.trim().is_empty() => {
                ProjectError::Remote(format!("request rejected with status {}", status))
            }
            CollaboratorError::Rejected { message, .. } => ProjectError::Remote(message),
            CollaboratorError::Transport(message) => {
                ProjectError::Remote(format!("collaborator unreachable: {}", message))
            }
            CollaboratorError::Malformed(message) => {
                ProjectError::Remote(format!("unexpected response: {}", message))
            }
        }
    }
}

//! Error taxonomy for project operations.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, TransitionError, ValidationError};

/// Everything a project operation can fail with.
///
/// `Validation`, `Index`, `Precondition` and `AuthRequired` are raised
/// before any remote call; the remaining variants come back from
/// collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Index {index} is out of bounds (length {len})")]
    Index { index: usize, len: usize },

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("A valid session is required")]
    AuthRequired,

    #[error("Revision conflict on section {index}: expected {expected}, found {actual}")]
    Conflict {
        index: usize,
        expected: u32,
        actual: u32,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Remote call failed: {0}")]
    Remote(String),
}

impl ProjectError {
    /// Creates a precondition error.
    pub fn precondition(reason: impl Into<String>) -> Self {
        ProjectError::Precondition(reason.into())
    }

    /// Creates a generation error.
    pub fn generation(reason: impl Into<String>) -> Self {
        ProjectError::Generation(reason.into())
    }

    /// Creates a remote error.
    pub fn remote(reason: impl Into<String>) -> Self {
        ProjectError::Remote(reason.into())
    }

    /// Bounds-checks `index` against `len`.
    pub fn check_index(index: usize, len: usize) -> Result<(), ProjectError> {
        if index < len {
            Ok(())
        } else {
            Err(ProjectError::Index { index, len })
        }
    }

    /// Returns the stable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            ProjectError::Validation(_) => ErrorCode::ValidationFailed,
            ProjectError::Index { .. } => ErrorCode::IndexOutOfBounds,
            ProjectError::Precondition(_) => ErrorCode::PreconditionFailed,
            ProjectError::AuthRequired => ErrorCode::AuthRequired,
            ProjectError::Conflict { .. } => ErrorCode::RevisionConflict,
            ProjectError::NotFound(_) => ErrorCode::ProjectNotFound,
            ProjectError::Generation(_) => ErrorCode::GenerationFailed,
            ProjectError::Remote(_) => ErrorCode::RemoteFailure,
        }
    }

    /// True for the one condition the surrounding application handles by
    /// re-authenticating.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, ProjectError::AuthRequired)
    }

    /// True when the caller's input was at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, ProjectError::Validation(_) | ProjectError::Index { .. })
    }
}

impl From<TransitionError> for ProjectError {
    fn from(err: TransitionError) -> Self {
        ProjectError::Precondition(err.to_string())
    }
}

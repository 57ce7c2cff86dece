//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Caller input
    ValidationFailed,
    IndexOutOfBounds,

    // Lifecycle
    PreconditionFailed,
    RevisionConflict,

    // Session
    AuthRequired,

    // Collaborators
    ProjectNotFound,
    GenerationFailed,
    RemoteFailure,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::IndexOutOfBounds => "INDEX_OUT_OF_BOUNDS",
            ErrorCode::PreconditionFailed => "PRECONDITION_FAILED",
            ErrorCode::RevisionConflict => "REVISION_CONFLICT",
            ErrorCode::AuthRequired => "AUTH_REQUIRED",
            ErrorCode::ProjectNotFound => "PROJECT_NOT_FOUND",
            ErrorCode::GenerationFailed => "GENERATION_FAILED",
            ErrorCode::RemoteFailure => "REMOTE_FAILURE",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("topic");
        assert_eq!(format!("{}", err), "Field 'topic' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("section_index", 0, 2, 5);
        assert_eq!(
            format!("{}", err),
            "Field 'section_index' must be between 0 and 2, got 5"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("project_type", "expected docx or pptx");
        assert_eq!(
            format!("{}", err),
            "Field 'project_type' has invalid format: expected docx or pptx"
        );
    }

    #[test]
    fn validation_error_exposes_field() {
        assert_eq!(ValidationError::empty_field("title").field(), "title");
        assert_eq!(
            ValidationError::invalid_format("id", "not a number").field(),
            "id"
        );
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::AuthRequired), "AUTH_REQUIRED");
        assert_eq!(format!("{}", ErrorCode::IndexOutOfBounds), "INDEX_OUT_OF_BOUNDS");
        assert_eq!(format!("{}", ErrorCode::RemoteFailure), "REMOTE_FAILURE");
    }
}

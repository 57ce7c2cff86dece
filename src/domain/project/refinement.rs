//! Refinement requests against a single generated section.
//!
//! Free-text refinement and like/dislike feedback are separate request
//! kinds with their own validation. Both are applied through the same
//! section-update primitive in the application layer.

use crate::domain::foundation::ValidationError;

use super::SectionFeedback;

/// Instruction sent to the refinement collaborator for a dislike without a
/// comment.
pub const DISLIKE_INSTRUCTION: &str =
    "The reader disliked this section. Rewrite it to be clearer and more useful.";

/// Non-empty free-text refinement instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction(String);

impl Instruction {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("instruction"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Like/dislike feedback on a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Liked,
    Disliked { comment: Option<String> },
}

impl Feedback {
    /// Dislike with an optional comment; blank comments count as absent.
    pub fn disliked(comment: Option<String>) -> Self {
        let comment = comment
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());
        Feedback::Disliked { comment }
    }

    pub fn tag(&self) -> SectionFeedback {
        match self {
            Feedback::Liked => SectionFeedback::Liked,
            Feedback::Disliked { .. } => SectionFeedback::Disliked,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            Feedback::Liked => None,
            Feedback::Disliked { comment } => comment.as_deref(),
        }
    }
}

/// A refinement request for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefinementRequest {
    /// Rewrite following the user's instruction; feedback is untouched.
    Instruction(Instruction),
    /// Record feedback; a dislike also asks for a rewrite.
    Feedback(Feedback),
}

impl RefinementRequest {
    /// Instruction to send to the collaborator, or `None` when the request
    /// needs no rewrite.
    pub fn collaborator_instruction(&self) -> Option<&str> {
        match self {
            RefinementRequest::Instruction(instruction) => Some(instruction.as_str()),
            RefinementRequest::Feedback(Feedback::Liked) => None,
            RefinementRequest::Feedback(Feedback::Disliked { comment }) => {
                Some(comment.as_deref().unwrap_or(DISLIKE_INSTRUCTION))
            }
        }
    }

    /// Feedback tag to set on success, if any.
    pub fn feedback_tag(&self) -> Option<SectionFeedback> {
        match self {
            RefinementRequest::Instruction(_) => None,
            RefinementRequest::Feedback(feedback) => Some(feedback.tag()),
        }
    }

    /// Comment to store alongside the tag.
    pub fn comment(&self) -> Option<&str> {
        match self {
            RefinementRequest::Instruction(_) => None,
            RefinementRequest::Feedback(feedback) => feedback.comment(),
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RefinementRequest::Instruction(_) => "instruction",
            RefinementRequest::Feedback(Feedback::Liked) => "like",
            RefinementRequest::Feedback(Feedback::Disliked { .. }) => "dislike",
        }
    }
}

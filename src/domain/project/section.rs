//! Section - one generated unit of content and its refinement state.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Refinement tag of a section.
///
/// A tag, not a counter: repeated feedback of the same kind leaves it as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SectionFeedback {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "like")]
    Liked,
    #[serde(rename = "dislike")]
    Disliked,
}

impl SectionFeedback {
    fn is_none(&self) -> bool {
        matches!(self, SectionFeedback::None)
    }
}

impl fmt::Display for SectionFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SectionFeedback::None => "none",
            SectionFeedback::Liked => "liked",
            SectionFeedback::Disliked => "disliked",
        };
        f.write_str(s)
    }
}

/// Per-section revision counter used for opt-in conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionRevision(u32);

impl SectionRevision {
    /// Revision of freshly generated content.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Creates a revision from a raw value.
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw revision number.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Returns the next revision.
    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for SectionRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Replacement content returned by the refinement collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRewrite {
    /// New title, when the collaborator regenerated it.
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
}

impl SectionRewrite {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: content.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One generated section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    note: String,
    #[serde(default, skip_serializing_if = "SectionFeedback::is_none")]
    feedback: SectionFeedback,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default)]
    revision: SectionRevision,
}

impl Section {
    /// Creates a freshly generated section: no note, no feedback.
    pub fn generated(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            note: String::new(),
            feedback: SectionFeedback::None,
            comment: None,
            revision: SectionRevision::initial(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// User-private annotation. Never sent to the refinement collaborator.
    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn feedback(&self) -> SectionFeedback {
        self.feedback
    }

    /// Dislike comment; only present while feedback is `Disliked`.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn revision(&self) -> SectionRevision {
        self.revision
    }

    /// Applies one refinement: optional collaborator output and optional
    /// feedback tag. The note is left alone. Counts as a single revision.
    pub(crate) fn apply_refinement(
        &mut self,
        rewrite: Option<SectionRewrite>,
        feedback: Option<(SectionFeedback, Option<String>)>,
    ) {
        if let Some(rewrite) = rewrite {
            if let Some(title) = rewrite.title.filter(|t| !t.trim().is_empty()) {
                self.title = title;
            }
            self.content = rewrite.content;
        }
        if let Some((tag, comment)) = feedback {
            self.feedback = tag;
            // A comment only accompanies a dislike.
            self.comment = match tag {
                SectionFeedback::Disliked => comment,
                _ => None,
            };
        }
        self.revision = self.revision.increment();
    }

    pub(crate) fn apply_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
        self.revision = self.revision.increment();
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

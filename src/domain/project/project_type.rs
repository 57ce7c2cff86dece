//! ProjectType enum - the kind of artifact a project produces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of artifact a project drafts.
///
/// Wire names follow the persistence backend (`docx` / `pptx`), which is
/// also the extension of the exported file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    #[serde(rename = "docx", alias = "document")]
    Document,
    #[serde(rename = "pptx", alias = "slidedeck")]
    SlideDeck,
}

impl ProjectType {
    /// Backend wire name and file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Document => "docx",
            ProjectType::SlideDeck => "pptx",
        }
    }

    /// MIME type of the exported artifact.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ProjectType::Document => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ProjectType::SlideDeck => {
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            }
        }
    }

    /// Human label used by front ends.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Document => "Word document",
            ProjectType::SlideDeck => "Slide deck",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "docx" | "document" | "doc" => Ok(ProjectType::Document),
            "pptx" | "slidedeck" | "slides" | "deck" => Ok(ProjectType::SlideDeck),
            other => Err(ValidationError::invalid_format(
                "project_type",
                format!("expected docx or pptx, got '{}'", other),
            )),
        }
    }
}

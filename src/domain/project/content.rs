//! GeneratedContent - the ordered sections produced by generation.

use serde::{Deserialize, Serialize};

use super::{Outline, ProjectError, Section};

/// Generated sections of a project, one per outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedContent(Vec<Section>);

impl GeneratedContent {
    /// Accepts collaborator output for `outline`.
    ///
    /// The sections must match the outline one-to-one in length and title
    /// order; anything else is a contract violation and is never padded or
    /// truncated.
    pub fn from_generation(
        outline: &Outline,
        sections: Vec<Section>,
    ) -> Result<Self, ProjectError> {
        if sections.len() != outline.len() {
            return Err(ProjectError::generation(format!(
                "expected {} sections for the outline, collaborator returned {}",
                outline.len(),
                sections.len()
            )));
        }
        if let Some((index, (expected, section))) = outline
            .iter()
            .zip(&sections)
            .enumerate()
            .find(|(_, (expected, section))| section.title().trim() != *expected)
        {
            return Err(ProjectError::generation(format!(
                "section {} is titled '{}' but the outline expects '{}'",
                index,
                section.title(),
                expected
            )));
        }
        Ok(Self(sections))
    }

    /// Reconstitutes content from persistence. An empty list means no
    /// content has been generated.
    pub fn reconstitute(sections: Vec<Section>) -> Option<Self> {
        if sections.is_empty() {
            None
        } else {
            Some(Self(sections))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.0.iter()
    }

    /// Section at `index`, or an index error.
    pub fn section(&self, index: usize) -> Result<&Section, ProjectError> {
        ProjectError::check_index(index, self.len())?;
        Ok(&self.0[index])
    }

    /// Returns a copy with only the section at `index` changed by `edit`.
    pub fn with_section<F>(&self, index: usize, edit: F) -> Result<Self, ProjectError>
    where
        F: FnOnce(&mut Section),
    {
        ProjectError::check_index(index, self.len())?;
        let mut sections = self.0.clone();
        edit(&mut sections[index]);
        Ok(Self(sections))
    }

    /// Consumes the content, yielding the sections.
    pub fn into_sections(self) -> Vec<Section> {
        self.0
    }
}

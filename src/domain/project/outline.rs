//! Outline - the ordered section titles of a project.
//!
//! Every mutation takes the current outline by reference and returns a new
//! one, so a failed persistence round trip simply drops the candidate and
//! the committed outline is never touched.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::ProjectError;

/// Ordered list of section titles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline(Vec<String>);

impl Outline {
    /// Creates an empty outline.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds an outline from caller-supplied titles, validating each one.
    pub fn from_titles<I, S>(titles: I) -> Result<Self, ProjectError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        titles
            .into_iter()
            .map(|t| normalize_title(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Reconstitutes an outline from persistence without validation.
    pub fn reconstitute(titles: Vec<String>) -> Self {
        Self(titles)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the outline has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Title at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterates over titles in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the titles as a slice.
    pub fn titles(&self) -> &[String] {
        &self.0
    }

    /// Appends `title` at the end.
    pub fn add(&self, title: &str) -> Result<Outline, ProjectError> {
        let title = normalize_title(title)?;
        let mut titles = self.0.clone();
        titles.push(title);
        Ok(Self(titles))
    }

    /// Deletes the entry at `index`, shifting later entries down by one.
    pub fn remove(&self, index: usize) -> Result<Outline, ProjectError> {
        ProjectError::check_index(index, self.len())?;
        let mut titles = self.0.clone();
        titles.remove(index);
        Ok(Self(titles))
    }

    /// Replaces the entry at `index` in place.
    ///
    /// The index is checked before the title.
    pub fn update(&self, index: usize, title: &str) -> Result<Outline, ProjectError> {
        ProjectError::check_index(index, self.len())?;
        let title = normalize_title(title)?;
        let mut titles = self.0.clone();
        titles[index] = title;
        Ok(Self(titles))
    }

    /// Moves the entry at `from` so that it ends up at position `to`.
    pub fn reorder(&self, from: usize, to: usize) -> Result<Outline, ProjectError> {
        ProjectError::check_index(from, self.len())?;
        ProjectError::check_index(to, self.len())?;
        let mut titles = self.0.clone();
        let moved = titles.remove(from);
        titles.insert(to, moved);
        Ok(Self(titles))
    }
}

fn normalize_title(raw: &str) -> Result<String, ProjectError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title").into());
    }
    Ok(trimmed.to_string())
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════

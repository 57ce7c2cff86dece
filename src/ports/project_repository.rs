//! Project persistence port.
//!
//! The persisted record is the single source of truth. Implementations
//! merge partial updates themselves and always hand back the authoritative
//! full record; the core never computes a merge.

use async_trait::async_trait;

use crate::domain::foundation::{ProjectId, SessionToken};
use crate::domain::project::{Outline, Project, ProjectSummary, ProjectType, Section};

use super::CollaboratorError;

/// Fields of a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub topic: String,
    pub project_type: ProjectType,
    pub outline: Outline,
}

/// Changed fields sent with an update.
///
/// The constructors only ever set one field: outline and generated content
/// are never edited in the same operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub outline: Option<Outline>,
    pub generated_content: Option<Vec<Section>>,
}

impl ProjectPatch {
    /// Replace the outline.
    pub fn outline(outline: Outline) -> Self {
        Self {
            outline: Some(outline),
            generated_content: None,
        }
    }

    /// Replace the generated content. An empty list discards it.
    pub fn content(sections: Vec<Section>) -> Self {
        Self {
            outline: None,
            generated_content: Some(sections),
        }
    }

    /// True if nothing would be sent.
    pub fn is_empty(&self) -> bool {
        self.outline.is_none() && self.generated_content.is_none()
    }
}

/// Port for the remote project record.
///
/// # Contract
///
/// - `update` applies only the fields present in the patch and returns the
///   full record after the merge
/// - Unknown ids yield `CollaboratorError::NotFound`
/// - A rejected token yields `CollaboratorError::Unauthorized`
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Create a project and return the stored record.
    async fn create(
        &self,
        token: &SessionToken,
        project: NewProject,
    ) -> Result<Project, CollaboratorError>;

    /// Fetch the full record.
    async fn fetch(&self, token: &SessionToken, id: ProjectId)
        -> Result<Project, CollaboratorError>;

    /// Apply a partial update and return the authoritative record.
    async fn update(
        &self,
        token: &SessionToken,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, CollaboratorError>;

    /// Delete the project together with its outline and content.
    async fn delete(&self, token: &SessionToken, id: ProjectId) -> Result<(), CollaboratorError>;

    /// List the session owner's projects.
    async fn list(&self, token: &SessionToken) -> Result<Vec<ProjectSummary>, CollaboratorError>;
}

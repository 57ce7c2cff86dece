//! Outline Suggester Port - proposes section titles for a topic.

use async_trait::async_trait;

use crate::domain::foundation::SessionToken;
use crate::domain::project::ProjectType;

use super::CollaboratorError;

/// Port for the AI collaborator that drafts outlines.
///
/// # Contract
///
/// - Returns titles in suggested order; an empty list is a valid answer
/// - Has no side effects on any project
#[async_trait]
pub trait OutlineSuggester: Send + Sync {
    async fn suggest(
        &self,
        token: &SessionToken,
        topic: &str,
        project_type: ProjectType,
    ) -> Result<Vec<String>, CollaboratorError>;
}

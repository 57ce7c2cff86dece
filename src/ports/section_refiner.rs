//! Section Refiner Port - rewrites a single section.

use async_trait::async_trait;

use crate::domain::foundation::{ProjectId, SessionToken};
use crate::domain::project::{ProjectType, SectionFeedback, SectionRewrite};

use super::CollaboratorError;

/// Context sent with a refinement.
///
/// Notes are private to the user and never leave the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefineRequest {
    pub project_id: ProjectId,
    pub topic: String,
    pub project_type: ProjectType,
    pub section_index: usize,
    pub section_title: String,
    pub current_content: String,
    pub instruction: String,
    pub feedback: Option<SectionFeedback>,
    pub comment: Option<String>,
}

/// Port for the AI collaborator that refines one section.
///
/// # Contract
///
/// - Returns replacement content for the addressed section only
/// - Must not persist anything
#[async_trait]
pub trait SectionRefiner: Send + Sync {
    async fn refine(
        &self,
        token: &SessionToken,
        request: &RefineRequest,
    ) -> Result<SectionRewrite, CollaboratorError>;
}

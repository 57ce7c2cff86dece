//! Content Generator Port - turns an outline into sections.

use async_trait::async_trait;

use crate::domain::foundation::{ProjectId, SessionToken};
use crate::domain::project::{Outline, ProjectType, Section};

use super::CollaboratorError;

/// Everything the generator gets to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub project_id: ProjectId,
    pub topic: String,
    pub project_type: ProjectType,
    pub outline: Outline,
}

/// Port for the AI collaborator that writes section content.
///
/// # Contract
///
/// - Returns exactly one section per outline entry, in outline order,
///   each titled with its outline entry
/// - Must not persist anything; the core commits the result itself
///
/// Output that breaks the contract is rejected by the core, never repaired.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        token: &SessionToken,
        request: &GenerationRequest,
    ) -> Result<Vec<Section>, CollaboratorError>;
}

//! DiscardContentHandler - drops generated content so the outline can be
//! edited again.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::{CommandMetadata, StateMachine};
use crate::domain::project::{Project, ProjectError, ProjectStatus};
use crate::ports::{ProjectPatch, ProjectRepository};

/// Handler for discarding generated content.
pub struct DiscardContentHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl DiscardContentHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    /// `Ready → Outlined`, persisted as an empty content list.
    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        metadata: CommandMetadata,
    ) -> Result<Project, ProjectError> {
        let span = tracing::info_span!(
            "discard_content",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
        );
        self.discard(handle).instrument(span).await
    }

    async fn discard(&self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        let token = self.session.require_token()?;

        let _commit = handle.lock_commit().await;
        let (snapshot, from) = handle.view().await;
        if from != ProjectStatus::Ready {
            return Err(ProjectError::precondition(format!(
                "there is no content to discard while project is {}",
                from
            )));
        }
        from.transition_to(ProjectStatus::after_outline_edit(snapshot.outline().len()))?;

        let project = self
            .repository
            .update(&token, handle.id(), ProjectPatch::content(Vec::new()))
            .await?;
        handle.replace(project.clone()).await;

        tracing::info!(from = %from, to = %project.status(), "Generated content discarded");
        Ok(project)
    }
}

//! DeleteProjectHandler - Command handler for deleting projects.
//!
//! Deletion is terminal: the handle moves to `Deleted` and refuses every
//! further operation.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::{CommandMetadata, StateMachine};
use crate::domain::project::{ProjectError, ProjectStatus};
use crate::ports::ProjectRepository;

/// Handler for deleting a project.
pub struct DeleteProjectHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl DeleteProjectHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        metadata: CommandMetadata,
    ) -> Result<(), ProjectError> {
        let span = tracing::info_span!(
            "delete_project",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
        );
        self.delete(handle).instrument(span).await
    }

    async fn delete(&self, handle: &ProjectHandle) -> Result<(), ProjectError> {
        let token = self.session.require_token()?;

        let from = handle.status().await;
        from.transition_to(ProjectStatus::Deleted)?;

        let _commit = handle.lock_commit().await;
        self.repository
            .delete(&token, handle.id())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Project deletion failed");
                ProjectError::from(e)
            })?;
        handle.mark_deleted().await?;

        tracing::info!(from = %from, to = %ProjectStatus::Deleted, "Project deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProjectRepository, RepositoryOp};
    use crate::adapters::session::StaticSessionProvider;
    use crate::domain::foundation::{ProjectId, Timestamp};
    use crate::domain::project::{Outline, Project, ProjectType};
    use crate::ports::CollaboratorError;

    fn setup() -> (InMemoryProjectRepository, Arc<ProjectHandle>, DeleteProjectHandler) {
        let project = Project::reconstitute(
            ProjectId::new(1),
            "Plan",
            ProjectType::Document,
            Timestamp::now(),
            Outline::from_titles(["A"]).unwrap(),
            None,
        );
        let repo = InMemoryProjectRepository::new();
        repo.seed(project.clone());
        let handler = DeleteProjectHandler::new(
            SessionContext::new(Arc::new(StaticSessionProvider::with_token("tok"))),
            Arc::new(repo.clone()),
        );
        (repo, ProjectHandle::new(project), handler)
    }

    #[tokio::test]
    async fn delete_removes_record_and_is_terminal() {
        let (repo, handle, handler) = setup();

        handler.handle(&handle, CommandMetadata::new()).await.unwrap();

        assert!(repo.stored(ProjectId::new(1)).is_none());
        assert_eq!(handle.status().await, ProjectStatus::Deleted);

        let err = handler.handle(&handle, CommandMetadata::new()).await.unwrap_err();
        assert!(matches!(err, ProjectError::Precondition(_)));
    }

    #[tokio::test]
    async fn failed_delete_leaves_handle_live() {
        let (repo, handle, handler) = setup();
        repo.fail_next(RepositoryOp::Delete, CollaboratorError::Unauthorized);

        let err = handler.handle(&handle, CommandMetadata::new()).await.unwrap_err();

        assert_eq!(err, ProjectError::AuthRequired);
        assert_eq!(handle.status().await, ProjectStatus::Outlined);
        assert!(repo.stored(ProjectId::new(1)).is_some());
    }
}

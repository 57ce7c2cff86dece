//! Handlers that load projects: listing, opening and refreshing.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::{CommandMetadata, ProjectId};
use crate::domain::project::{Project, ProjectError, ProjectSummary};
use crate::ports::ProjectRepository;

/// Lists the session owner's projects.
pub struct ListProjectsHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl ListProjectsHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    pub async fn handle(
        &self,
        metadata: CommandMetadata,
    ) -> Result<Vec<ProjectSummary>, ProjectError> {
        let token = self.session.require_token()?;
        let projects = self
            .repository
            .list(&token)
            .instrument(tracing::debug_span!(
                "list_projects",
                correlation_id = %metadata.correlation_id()
            ))
            .await?;
        Ok(projects)
    }
}

/// Query to open a project by id.
#[derive(Debug, Clone, Copy)]
pub struct OpenProjectQuery {
    pub project_id: ProjectId,
}

/// Fetches a project into a fresh handle.
pub struct OpenProjectHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl OpenProjectHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    pub async fn handle(
        &self,
        query: OpenProjectQuery,
        metadata: CommandMetadata,
    ) -> Result<Arc<ProjectHandle>, ProjectError> {
        let span = tracing::info_span!(
            "open_project",
            correlation_id = %metadata.correlation_id(),
            project_id = %query.project_id,
        );
        self.open(query.project_id).instrument(span).await
    }

    async fn open(&self, project_id: ProjectId) -> Result<Arc<ProjectHandle>, ProjectError> {
        let token = self.session.require_token()?;
        let project = self.repository.fetch(&token, project_id).await?;
        tracing::debug!(status = %project.status(), "Project opened");
        Ok(ProjectHandle::new(project))
    }
}

/// Re-fetches the authoritative record into an existing handle.
pub struct RefreshProjectHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl RefreshProjectHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    /// Replaces the snapshot wholesale. On failure the snapshot is kept.
    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        metadata: CommandMetadata,
    ) -> Result<Project, ProjectError> {
        let span = tracing::info_span!(
            "refresh_project",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
        );
        self.refresh(handle).instrument(span).await
    }

    async fn refresh(&self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        let token = self.session.require_token()?;
        handle.ensure_live().await?;

        let _commit = handle.lock_commit().await;
        let project = self.repository.fetch(&token, handle.id()).await?;
        handle.replace(project.clone()).await;
        Ok(project)
    }
}

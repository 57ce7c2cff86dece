//! CreateProjectHandler - Command handler for creating projects.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::CommandMetadata;
use crate::domain::project::{Outline, Project, ProjectError, ProjectType};
use crate::ports::{NewProject, ProjectRepository};

/// Command to create a project.
#[derive(Debug, Clone)]
pub struct CreateProjectCommand {
    pub topic: String,
    pub project_type: ProjectType,
    /// Optional initial outline; validated like `add`.
    pub outline: Vec<String>,
}

impl CreateProjectCommand {
    pub fn new(topic: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            topic: topic.into(),
            project_type,
            outline: Vec::new(),
        }
    }

    pub fn with_outline<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outline = titles.into_iter().map(Into::into).collect();
        self
    }
}

/// Handler for creating projects.
///
/// # Dependencies
///
/// - `SessionContext`: Session token gate
/// - `ProjectRepository`: Persists the new record
pub struct CreateProjectHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl CreateProjectHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateProjectCommand,
        metadata: CommandMetadata,
    ) -> Result<Arc<ProjectHandle>, ProjectError> {
        let span = tracing::info_span!(
            "create_project",
            correlation_id = %metadata.correlation_id(),
            project_type = %cmd.project_type,
        );
        self.create(cmd).instrument(span).await
    }

    async fn create(&self, cmd: CreateProjectCommand) -> Result<Arc<ProjectHandle>, ProjectError> {
        let token = self.session.require_token()?;

        let topic = Project::validate_topic(&cmd.topic)?;
        let outline = Outline::from_titles(cmd.outline)?;

        let project = self
            .repository
            .create(
                &token,
                NewProject {
                    topic,
                    project_type: cmd.project_type,
                    outline,
                },
            )
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Project creation failed");
                ProjectError::from(e)
            })?;

        tracing::info!(project_id = %project.id(), status = %project.status(), "Project created");
        Ok(ProjectHandle::new(project))
    }
}

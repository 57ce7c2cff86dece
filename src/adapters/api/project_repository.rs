//! HTTP implementation of `ProjectRepository` against `/api/projects`.

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::foundation::{ProjectId, SessionToken};
use crate::domain::project::{Project, ProjectSummary};
use crate::ports::{CollaboratorError, NewProject, ProjectPatch, ProjectRepository};

use super::wire::{CreateProjectBody, ProjectRecord, UpdateProjectBody};
use super::BackendClient;

/// Project records stored by the backend.
#[derive(Debug, Clone)]
pub struct HttpProjectRepository {
    client: BackendClient,
}

impl HttpProjectRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    fn project_path(id: ProjectId) -> String {
        format!("/api/projects/{}", id)
    }
}

#[async_trait]
impl ProjectRepository for HttpProjectRepository {
    async fn create(
        &self,
        token: &SessionToken,
        project: NewProject,
    ) -> Result<Project, CollaboratorError> {
        let body = CreateProjectBody {
            project_type: project.project_type,
            topic: &project.topic,
            outline: (!project.outline.is_empty()).then(|| project.outline.titles()),
        };
        let request = self
            .client
            .request(Method::POST, "/api/projects/", token)
            .json(&body);

        let record: ProjectRecord = self.client.send_json(request).await?;
        tracing::debug!(project_id = record.id, "Backend created project");
        Ok(record.into_project())
    }

    async fn fetch(
        &self,
        token: &SessionToken,
        id: ProjectId,
    ) -> Result<Project, CollaboratorError> {
        let request = self.client.request(Method::GET, &Self::project_path(id), token);
        let record: ProjectRecord = self.client.send_json(request).await?;
        Ok(record.into_project())
    }

    async fn update(
        &self,
        token: &SessionToken,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, CollaboratorError> {
        let body = UpdateProjectBody {
            outline: patch.outline.as_ref().map(|o| o.titles()),
            generated_content: patch.generated_content.as_deref(),
        };
        let request = self
            .client
            .request(Method::PUT, &Self::project_path(id), token)
            .json(&body);

        let record: ProjectRecord = self.client.send_json(request).await?;
        Ok(record.into_project())
    }

    async fn delete(&self, token: &SessionToken, id: ProjectId) -> Result<(), CollaboratorError> {
        let request = self
            .client
            .request(Method::DELETE, &Self::project_path(id), token);
        self.client.send(request).await?;
        Ok(())
    }

    async fn list(&self, token: &SessionToken) -> Result<Vec<ProjectSummary>, CollaboratorError> {
        let request = self.client.request(Method::GET, "/api/projects/", token);
        let records: Vec<ProjectRecord> = self.client.send_json(request).await?;
        Ok(records
            .into_iter()
            .map(|record| record.into_project().summary())
            .collect())
    }
}

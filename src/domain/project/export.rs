//! Export eligibility and the export request descriptor.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ProjectId;

use super::{Project, ProjectError, ProjectStatus, ProjectType};

/// What the export collaborator needs. The binary format is entirely its
/// concern, so nothing else is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub project_id: ProjectId,
}

/// Decides whether a project can be exported.
pub struct ExportGate;

impl ExportGate {
    /// True iff the project is `Ready` with at least one section.
    pub fn can_export(project: &Project, status: ProjectStatus) -> bool {
        status == ProjectStatus::Ready
            && project
                .generated_content()
                .is_some_and(|content| !content.is_empty())
    }

    /// Builds the export request, or fails if export is not yet possible.
    pub fn build_request(
        project: &Project,
        status: ProjectStatus,
    ) -> Result<ExportRequest, ProjectError> {
        if !Self::can_export(project, status) {
            return Err(ProjectError::precondition(format!(
                "project {} cannot be exported while {}",
                project.id(),
                status
            )));
        }
        Ok(ExportRequest {
            project_type: project.project_type(),
            project_id: project.id(),
        })
    }
}

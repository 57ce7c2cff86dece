//! Request and response bodies of the backend API.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, Timestamp};
use crate::domain::project::{
    GeneratedContent, Outline, Project, ProjectType, Section, SectionFeedback, SectionRewrite,
};

/// A project as stored by the backend. `outline` and `generated_content`
/// are null until first written.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub topic: String,
    #[serde(default)]
    pub outline: Option<Vec<String>>,
    #[serde(default)]
    pub generated_content: Option<Vec<Section>>,
    pub created_at: Timestamp,
}

impl ProjectRecord {
    pub fn into_project(self) -> Project {
        Project::reconstitute(
            ProjectId::new(self.id),
            self.topic,
            self.project_type,
            self.created_at,
            Outline::reconstitute(self.outline.unwrap_or_default()),
            self.generated_content.and_then(GeneratedContent::reconstitute),
        )
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateProjectBody<'a> {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub topic: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<&'a [String]>,
}

/// Partial update. Absent fields are left untouched by the backend.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateProjectBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_content: Option<&'a [Section]>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SuggestOutlineBody<'a> {
    pub topic: &'a str,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestOutlineResponse {
    pub outline: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateBody {
    pub project_id: ProjectId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponse {
    pub sections: Vec<Section>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefineBody<'a> {
    pub project_id: ProjectId,
    pub section_index: usize,
    pub refinement_prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<SectionFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefineResponse {
    pub section: SectionRewrite,
}

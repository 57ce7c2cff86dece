//! Project - the client-side snapshot of a persisted project record.
//!
//! The snapshot is never merged field by field. Every successful remote
//! round trip returns the authoritative record, which replaces the snapshot
//! wholesale.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, Timestamp, ValidationError};

use super::{GeneratedContent, Outline, ProjectStatus, ProjectType};

/// Snapshot of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    topic: String,
    #[serde(rename = "type")]
    project_type: ProjectType,
    created_at: Timestamp,
    outline: Outline,
    generated_content: Option<GeneratedContent>,
}

impl Project {
    // ════════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════════

    /// Reconstitutes a project from an authoritative record.
    pub fn reconstitute(
        id: ProjectId,
        topic: impl Into<String>,
        project_type: ProjectType,
        created_at: Timestamp,
        outline: Outline,
        generated_content: Option<GeneratedContent>,
    ) -> Self {
        Self {
            id,
            topic: topic.into(),
            project_type,
            created_at,
            outline,
            generated_content,
        }
    }

    /// Validates a topic for a new project.
    pub fn validate_topic(topic: &str) -> Result<String, ValidationError> {
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        Ok(trimmed.to_string())
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════════

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn generated_content(&self) -> Option<&GeneratedContent> {
        self.generated_content.as_ref()
    }

    /// Resting lifecycle state implied by the record.
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::derive(self.outline.len(), self.generated_content.is_some())
    }

    /// Summary fields for listings.
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id,
            topic: self.topic.clone(),
            project_type: self.project_type,
            created_at: self.created_at,
            status: self.status(),
        }
    }
}

/// Listing entry for a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub topic: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub created_at: Timestamp,
    pub status: ProjectStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::Section;

    fn project(outline: &[&str], content: Option<Vec<Section>>) -> Project {
        Project::reconstitute(
            ProjectId::new(1),
            "Quarterly Report",
            ProjectType::Document,
            Timestamp::now(),
            Outline::from_titles(outline.iter().copied()).unwrap(),
            content.and_then(GeneratedContent::reconstitute),
        )
    }

    #[test]
    fn fresh_project_is_empty() {
        let p = project(&[], None);
        assert_eq!(p.status(), ProjectStatus::Empty);
        assert!(p.outline().is_empty());
        assert!(p.generated_content().is_none());
    }

    #[test]
    fn outline_without_content_is_outlined() {
        assert_eq!(project(&["Intro"], None).status(), ProjectStatus::Outlined);
    }

    #[test]
    fn content_makes_project_ready() {
        let p = project(&["Intro"], Some(vec![Section::generated("Intro", "x")]));
        assert_eq!(p.status(), ProjectStatus::Ready);
    }

    #[test]
    fn validate_topic_trims_and_rejects_blank() {
        assert_eq!(Project::validate_topic("  Plan ").unwrap(), "Plan");
        assert!(Project::validate_topic("\t").is_err());
    }

    #[test]
    fn summary_carries_listing_fields() {
        let s = project(&["Intro"], None).summary();
        assert_eq!(s.topic, "Quarterly Report");
        assert_eq!(s.status, ProjectStatus::Outlined);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["type"], "docx");
    }
}

//! GenerateContentHandler - generates or regenerates all sections.
//!
//! The handle is `Generating` while the collaborator works. The result is
//! checked against the outline, then committed with one content-only
//! update. Any failure returns the handle to the state it started in.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::{CommandMetadata, SessionToken};
use crate::domain::project::{GeneratedContent, Project, ProjectError, ProjectStatus};
use crate::ports::{ContentGenerator, GenerationRequest, ProjectPatch, ProjectRepository};

/// Whether content is generated for the first time or replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// From `Outlined`.
    Generate,
    /// From `Ready`; replaces every section, notes and feedback included.
    Regenerate,
}

impl GenerationMode {
    fn source_status(&self) -> ProjectStatus {
        match self {
            GenerationMode::Generate => ProjectStatus::Outlined,
            GenerationMode::Regenerate => ProjectStatus::Ready,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Generate => "generate",
            GenerationMode::Regenerate => "regenerate",
        }
    }
}

/// Command to (re)generate content.
#[derive(Debug, Clone, Copy)]
pub struct GenerateContentCommand {
    pub mode: GenerationMode,
}

impl GenerateContentCommand {
    pub fn generate() -> Self {
        Self {
            mode: GenerationMode::Generate,
        }
    }

    pub fn regenerate() -> Self {
        Self {
            mode: GenerationMode::Regenerate,
        }
    }
}

/// Result of a committed generation.
#[derive(Debug, Clone)]
pub struct GenerateContentResult {
    /// Authoritative record, now `Ready`.
    pub project: Project,
    pub sections: usize,
}

/// Handler for content generation.
///
/// # Dependencies
///
/// - `SessionContext`: Session token gate
/// - `ContentGenerator`: Writes the sections
/// - `ProjectRepository`: Persists the generated content
pub struct GenerateContentHandler {
    session: SessionContext,
    generator: Arc<dyn ContentGenerator>,
    repository: Arc<dyn ProjectRepository>,
}

impl GenerateContentHandler {
    pub fn new(
        session: SessionContext,
        generator: Arc<dyn ContentGenerator>,
        repository: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            session,
            generator,
            repository,
        }
    }

    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        cmd: GenerateContentCommand,
        metadata: CommandMetadata,
    ) -> Result<GenerateContentResult, ProjectError> {
        let span = tracing::info_span!(
            "generate_content",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
            mode = cmd.mode.as_str(),
        );
        self.generate(handle, cmd.mode).instrument(span).await
    }

    async fn generate(
        &self,
        handle: &ProjectHandle,
        mode: GenerationMode,
    ) -> Result<GenerateContentResult, ProjectError> {
        let token = self.session.require_token()?;

        let (snapshot, from) = {
            // Waits for in-flight commits so the outline is settled.
            let _commit = handle.lock_commit().await;
            handle
                .begin_generation(|current| current == mode.source_status())
                .await?
        };

        match self.run(handle, &token, &snapshot).await {
            Ok(project) => {
                let sections = project.generated_content().map_or(0, GeneratedContent::len);
                handle.finish_generation(Some(project.clone())).await;
                tracing::info!(
                    from = %from,
                    to = %ProjectStatus::Ready,
                    sections,
                    "Content generated"
                );
                Ok(GenerateContentResult { project, sections })
            }
            Err(err) => {
                handle.finish_generation(None).await;
                tracing::warn!(error = %err, reverted_to = %from, "Generation failed");
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        handle: &ProjectHandle,
        token: &SessionToken,
        snapshot: &Project,
    ) -> Result<Project, ProjectError> {
        let request = GenerationRequest {
            project_id: snapshot.id(),
            topic: snapshot.topic().to_string(),
            project_type: snapshot.project_type(),
            outline: snapshot.outline().clone(),
        };

        tracing::debug!(entries = request.outline.len(), "Calling content generator");
        let sections = self
            .generator
            .generate(token, &request)
            .await
            .map_err(|e| e.into_generation_error())?;

        let _commit = handle.lock_commit().await;
        handle.ensure_live().await?;
        let latest = handle.snapshot().await;
        let content = GeneratedContent::from_generation(latest.outline(), sections)?;

        let project = self
            .repository
            .update(token, handle.id(), ProjectPatch::content(content.into_sections()))
            .await?;
        Ok(project)
    }
}

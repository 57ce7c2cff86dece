//! SuggestOutlineHandler - asks the AI collaborator for outline titles.
//!
//! Suggestions are side-effect free. Applying one is an explicit
//! `OutlineEdit::Replace`.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::SessionContext;
use crate::domain::foundation::CommandMetadata;
use crate::domain::project::{Project, ProjectError, ProjectType};
use crate::ports::OutlineSuggester;

/// Command to request an outline suggestion.
#[derive(Debug, Clone)]
pub struct SuggestOutlineCommand {
    pub topic: String,
    pub project_type: ProjectType,
}

impl SuggestOutlineCommand {
    pub fn new(topic: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            topic: topic.into(),
            project_type,
        }
    }

    /// Suggestion for an existing project's topic and type.
    pub fn for_project(project: &Project) -> Self {
        Self::new(project.topic(), project.project_type())
    }
}

/// Handler for outline suggestions.
pub struct SuggestOutlineHandler {
    session: SessionContext,
    suggester: Arc<dyn OutlineSuggester>,
}

impl SuggestOutlineHandler {
    pub fn new(session: SessionContext, suggester: Arc<dyn OutlineSuggester>) -> Self {
        Self { session, suggester }
    }

    /// Returns the suggested titles, trimmed, in suggested order.
    pub async fn handle(
        &self,
        cmd: SuggestOutlineCommand,
        metadata: CommandMetadata,
    ) -> Result<Vec<String>, ProjectError> {
        let span = tracing::info_span!(
            "suggest_outline",
            correlation_id = %metadata.correlation_id(),
            project_type = %cmd.project_type,
        );
        self.suggest(cmd).instrument(span).await
    }

    async fn suggest(&self, cmd: SuggestOutlineCommand) -> Result<Vec<String>, ProjectError> {
        let token = self.session.require_token()?;
        let topic = Project::validate_topic(&cmd.topic)?;

        tracing::debug!("Requesting outline suggestion");
        let titles = self
            .suggester
            .suggest(&token, &topic, cmd.project_type)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Outline suggestion failed");
                e.into_generation_error()
            })?;

        if let Some(index) = titles.iter().position(|t| t.trim().is_empty()) {
            return Err(ProjectError::generation(format!(
                "suggested outline entry {} is blank",
                index
            )));
        }

        Ok(titles.into_iter().map(|t| t.trim().to_string()).collect())
    }
}

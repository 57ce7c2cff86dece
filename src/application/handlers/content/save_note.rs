//! SaveNoteHandler - stores a private note on one section.
//!
//! Notes travel with the content list to the repository but are never
//! shown to the refinement collaborator.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::handlers::section_update::{commit_section_edit, precheck_section};
use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::CommandMetadata;
use crate::domain::project::{Project, ProjectError, SectionRevision};
use crate::ports::ProjectRepository;

/// Command to save a note. An empty note clears it.
#[derive(Debug, Clone)]
pub struct SaveNoteCommand {
    pub index: usize,
    pub note: String,
    /// Fail with `Conflict` unless the section is still at this revision.
    pub expected_revision: Option<SectionRevision>,
}

impl SaveNoteCommand {
    pub fn new(index: usize, note: impl Into<String>) -> Self {
        Self {
            index,
            note: note.into(),
            expected_revision: None,
        }
    }

    pub fn expecting(mut self, revision: SectionRevision) -> Self {
        self.expected_revision = Some(revision);
        self
    }
}

/// Handler for section notes.
pub struct SaveNoteHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl SaveNoteHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        cmd: SaveNoteCommand,
        metadata: CommandMetadata,
    ) -> Result<Project, ProjectError> {
        let span = tracing::info_span!(
            "save_note",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
            section = cmd.index,
        );
        self.save(handle, cmd).instrument(span).await
    }

    async fn save(
        &self,
        handle: &ProjectHandle,
        cmd: SaveNoteCommand,
    ) -> Result<Project, ProjectError> {
        let token = self.session.require_token()?;
        precheck_section(handle, cmd.index, cmd.expected_revision).await?;

        let note = cmd.note.trim().to_string();
        let project = commit_section_edit(
            self.repository.as_ref(),
            &token,
            handle,
            cmd.index,
            cmd.expected_revision,
            move |section| section.apply_note(note),
        )
        .await?;

        tracing::info!("Note saved");
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProjectRepository;
    use crate::adapters::session::StaticSessionProvider;
    use crate::domain::foundation::{ProjectId, Timestamp};
    use crate::domain::project::{GeneratedContent, Outline, ProjectStatus, ProjectType, Section};

    fn setup(content: bool) -> (InMemoryProjectRepository, Arc<ProjectHandle>, SaveNoteHandler) {
        let sections = if content {
            GeneratedContent::reconstitute(vec![
                Section::generated("A", "a"),
                Section::generated("B", "b"),
            ])
        } else {
            None
        };
        let project = Project::reconstitute(
            ProjectId::new(1),
            "Plan",
            ProjectType::Document,
            Timestamp::now(),
            Outline::from_titles(["A", "B"]).unwrap(),
            sections,
        );
        let repo = InMemoryProjectRepository::new();
        repo.seed(project.clone());
        let handler = SaveNoteHandler::new(
            SessionContext::new(Arc::new(StaticSessionProvider::with_token("tok"))),
            Arc::new(repo.clone()),
        );
        (repo, ProjectHandle::new(project), handler)
    }

    #[tokio::test]
    async fn note_is_saved_on_addressed_section_only() {
        let (repo, handle, handler) = setup(true);

        let project = handler
            .handle(&handle, SaveNoteCommand::new(1, " check figures "), CommandMetadata::new())
            .await
            .unwrap();

        let content = project.generated_content().unwrap();
        assert_eq!(content.section(1).unwrap().note(), "check figures");
        assert_eq!(content.section(1).unwrap().content(), "b");
        assert_eq!(content.section(0).unwrap().note(), "");
        assert_eq!(project.status(), ProjectStatus::Ready);
        assert_eq!(repo.stored(ProjectId::new(1)), Some(project));
    }

    #[tokio::test]
    async fn note_requires_ready_project() {
        let (_, handle, handler) = setup(false);
        let err = handler
            .handle(&handle, SaveNoteCommand::new(0, "x"), CommandMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::Precondition(_)));
    }

    #[tokio::test]
    async fn stale_revision_is_conflict() {
        let (repo, handle, handler) = setup(true);
        handler
            .handle(&handle, SaveNoteCommand::new(0, "first"), CommandMetadata::new())
            .await
            .unwrap();

        let err = handler
            .handle(
                &handle,
                SaveNoteCommand::new(0, "second").expecting(SectionRevision::initial()),
                CommandMetadata::new(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::Conflict { index: 0, expected: 0, actual: 1 }));
        assert_eq!(repo.update_count(), 1);
    }
}

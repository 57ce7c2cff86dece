//! DraftingService - one entry point over every project handler.
//!
//! Front ends build it once from their collaborators and call plain
//! methods; each call gets fresh `CommandMetadata` tagged with the
//! service's source.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, ProjectId};
use crate::domain::project::{Project, ProjectError, ProjectSummary, ProjectType};
use crate::ports::{
    ContentGenerator, DocumentExporter, ExportedDocument, OutlineSuggester, ProjectRepository,
    SectionRefiner, SessionProvider,
};

use super::handlers::{
    CreateProjectCommand, CreateProjectHandler, DeleteProjectHandler, DiscardContentHandler,
    EditOutlineHandler, ExportProjectHandler, GenerateContentCommand, GenerateContentHandler,
    GiveFeedbackCommand, ListProjectsHandler, OpenProjectHandler, OpenProjectQuery, OutlineEdit,
    RefineSectionCommand, RefinementHandler, RefinementResult, RefreshProjectHandler,
    SaveNoteCommand, SaveNoteHandler, SuggestOutlineCommand, SuggestOutlineHandler,
};
use super::{ProjectHandle, SessionContext};

/// External collaborators the service is built from.
#[derive(Clone)]
pub struct Collaborators {
    pub session: Arc<dyn SessionProvider>,
    pub repository: Arc<dyn ProjectRepository>,
    pub suggester: Arc<dyn OutlineSuggester>,
    pub generator: Arc<dyn ContentGenerator>,
    pub refiner: Arc<dyn SectionRefiner>,
    pub exporter: Arc<dyn DocumentExporter>,
}

/// Facade over the project handlers.
pub struct DraftingService {
    source: String,
    create: CreateProjectHandler,
    list: ListProjectsHandler,
    open: OpenProjectHandler,
    refresh: RefreshProjectHandler,
    delete: DeleteProjectHandler,
    edit_outline: EditOutlineHandler,
    suggest_outline: SuggestOutlineHandler,
    generate: GenerateContentHandler,
    discard: DiscardContentHandler,
    save_note: SaveNoteHandler,
    refinement: RefinementHandler,
    export: ExportProjectHandler,
}

impl DraftingService {
    pub fn new(collaborators: Collaborators) -> Self {
        let session = SessionContext::new(collaborators.session);
        let repository = collaborators.repository;
        Self {
            source: "service".to_string(),
            create: CreateProjectHandler::new(session.clone(), repository.clone()),
            list: ListProjectsHandler::new(session.clone(), repository.clone()),
            open: OpenProjectHandler::new(session.clone(), repository.clone()),
            refresh: RefreshProjectHandler::new(session.clone(), repository.clone()),
            delete: DeleteProjectHandler::new(session.clone(), repository.clone()),
            edit_outline: EditOutlineHandler::new(session.clone(), repository.clone()),
            suggest_outline: SuggestOutlineHandler::new(session.clone(), collaborators.suggester),
            generate: GenerateContentHandler::new(
                session.clone(),
                collaborators.generator,
                repository.clone(),
            ),
            discard: DiscardContentHandler::new(session.clone(), repository.clone()),
            save_note: SaveNoteHandler::new(session.clone(), repository.clone()),
            refinement: RefinementHandler::new(
                session.clone(),
                collaborators.refiner,
                repository,
            ),
            export: ExportProjectHandler::new(session, collaborators.exporter),
        }
    }

    /// Tags every command with `source` (e.g. "cli").
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new().with_source(self.source.as_str())
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Projects
    // ════════════════════════════════════════════════════════════════════════════════

    pub async fn create_project(
        &self,
        topic: &str,
        project_type: ProjectType,
    ) -> Result<Arc<ProjectHandle>, ProjectError> {
        self.create
            .handle(CreateProjectCommand::new(topic, project_type), self.metadata())
            .await
    }

    /// Creates a project with an initial outline, validated like `add`.
    pub async fn create_project_with_outline(
        &self,
        topic: &str,
        project_type: ProjectType,
        outline: Vec<String>,
    ) -> Result<Arc<ProjectHandle>, ProjectError> {
        self.create
            .handle(
                CreateProjectCommand::new(topic, project_type).with_outline(outline),
                self.metadata(),
            )
            .await
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>, ProjectError> {
        self.list.handle(self.metadata()).await
    }

    pub async fn open_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Arc<ProjectHandle>, ProjectError> {
        self.open
            .handle(OpenProjectQuery { project_id }, self.metadata())
            .await
    }

    pub async fn refresh(&self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        self.refresh.handle(handle, self.metadata()).await
    }

    pub async fn delete_project(&self, handle: &ProjectHandle) -> Result<(), ProjectError> {
        self.delete.handle(handle, self.metadata()).await
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Outline
    // ════════════════════════════════════════════════════════════════════════════════

    pub async fn edit_outline(
        &self,
        handle: &ProjectHandle,
        edit: OutlineEdit,
    ) -> Result<Project, ProjectError> {
        self.edit_outline
            .handle(handle, edit.into(), self.metadata())
            .await
            .map(|result| result.project)
    }

    pub async fn add_outline_item(
        &self,
        handle: &ProjectHandle,
        title: &str,
    ) -> Result<Project, ProjectError> {
        self.edit_outline(handle, OutlineEdit::add(title)).await
    }

    pub async fn remove_outline_item(
        &self,
        handle: &ProjectHandle,
        index: usize,
    ) -> Result<Project, ProjectError> {
        self.edit_outline(handle, OutlineEdit::remove(index)).await
    }

    pub async fn update_outline_item(
        &self,
        handle: &ProjectHandle,
        index: usize,
        title: &str,
    ) -> Result<Project, ProjectError> {
        self.edit_outline(handle, OutlineEdit::update(index, title)).await
    }

    pub async fn move_outline_item(
        &self,
        handle: &ProjectHandle,
        from: usize,
        to: usize,
    ) -> Result<Project, ProjectError> {
        self.edit_outline(handle, OutlineEdit::reorder(from, to)).await
    }

    /// Replaces the whole outline, e.g. with an accepted suggestion.
    pub async fn replace_outline(
        &self,
        handle: &ProjectHandle,
        titles: Vec<String>,
    ) -> Result<Project, ProjectError> {
        self.edit_outline(handle, OutlineEdit::replace(titles)).await
    }

    /// Suggestion for the project's own topic and type. Nothing is applied.
    pub async fn suggest_outline(
        &self,
        handle: &ProjectHandle,
    ) -> Result<Vec<String>, ProjectError> {
        let project = handle.snapshot().await;
        self.suggest_outline
            .handle(SuggestOutlineCommand::for_project(&project), self.metadata())
            .await
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Content
    // ════════════════════════════════════════════════════════════════════════════════

    pub async fn generate(&self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        self.generate
            .handle(handle, GenerateContentCommand::generate(), self.metadata())
            .await
            .map(|result| result.project)
    }

    pub async fn regenerate(&self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        self.generate
            .handle(handle, GenerateContentCommand::regenerate(), self.metadata())
            .await
            .map(|result| result.project)
    }

    pub async fn discard_content(&self, handle: &ProjectHandle) -> Result<Project, ProjectError> {
        self.discard.handle(handle, self.metadata()).await
    }

    pub async fn save_note(
        &self,
        handle: &ProjectHandle,
        index: usize,
        note: &str,
    ) -> Result<Project, ProjectError> {
        self.save_note
            .handle(handle, SaveNoteCommand::new(index, note), self.metadata())
            .await
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Refinement
    // ════════════════════════════════════════════════════════════════════════════════

    pub async fn refine_section(
        &self,
        handle: &ProjectHandle,
        cmd: RefineSectionCommand,
    ) -> Result<RefinementResult, ProjectError> {
        self.refinement
            .refine_section(handle, cmd, self.metadata())
            .await
    }

    pub async fn give_feedback(
        &self,
        handle: &ProjectHandle,
        cmd: GiveFeedbackCommand,
    ) -> Result<RefinementResult, ProjectError> {
        self.refinement
            .give_feedback(handle, cmd, self.metadata())
            .await
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Export
    // ════════════════════════════════════════════════════════════════════════════════

    pub async fn export(&self, handle: &ProjectHandle) -> Result<ExportedDocument, ProjectError> {
        self.export.handle(handle, self.metadata()).await
    }
}

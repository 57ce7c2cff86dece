//! EditOutlineHandler - Command handler for outline mutations.
//!
//! Every edit is computed against the current snapshot, persisted with a
//! single outline-only update, and installed from the record the
//! repository returns. A failed update leaves the snapshot untouched.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::{CommandMetadata, StateMachine};
use crate::domain::project::{Outline, Project, ProjectError, ProjectStatus};
use crate::ports::{ProjectPatch, ProjectRepository};

/// One outline mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineEdit {
    /// Append a title at the end.
    Add { title: String },
    /// Delete the entry at `index`.
    Remove { index: usize },
    /// Replace the title at `index`.
    Update { index: usize, title: String },
    /// Move the entry at `from` to position `to`.
    Reorder { from: usize, to: usize },
    /// Replace the whole outline, e.g. with an accepted suggestion.
    Replace { titles: Vec<String> },
}

impl OutlineEdit {
    pub fn add(title: impl Into<String>) -> Self {
        OutlineEdit::Add {
            title: title.into(),
        }
    }

    pub fn remove(index: usize) -> Self {
        OutlineEdit::Remove { index }
    }

    pub fn update(index: usize, title: impl Into<String>) -> Self {
        OutlineEdit::Update {
            index,
            title: title.into(),
        }
    }

    pub fn reorder(from: usize, to: usize) -> Self {
        OutlineEdit::Reorder { from, to }
    }

    pub fn replace<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        OutlineEdit::Replace {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Computes the edited outline without touching `outline`.
    fn apply(&self, outline: &Outline) -> Result<Outline, ProjectError> {
        match self {
            OutlineEdit::Add { title } => outline.add(title),
            OutlineEdit::Remove { index } => outline.remove(*index),
            OutlineEdit::Update { index, title } => outline.update(*index, title),
            OutlineEdit::Reorder { from, to } => outline.reorder(*from, *to),
            OutlineEdit::Replace { titles } => Outline::from_titles(titles),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            OutlineEdit::Add { .. } => "add",
            OutlineEdit::Remove { .. } => "remove",
            OutlineEdit::Update { .. } => "update",
            OutlineEdit::Reorder { .. } => "reorder",
            OutlineEdit::Replace { .. } => "replace",
        }
    }
}

/// Command to edit the outline of a project.
#[derive(Debug, Clone)]
pub struct EditOutlineCommand {
    pub edit: OutlineEdit,
}

impl From<OutlineEdit> for EditOutlineCommand {
    fn from(edit: OutlineEdit) -> Self {
        Self { edit }
    }
}

/// Result of a committed outline edit.
#[derive(Debug, Clone)]
pub struct EditOutlineResult {
    /// Authoritative record after the edit.
    pub project: Project,
    pub from: ProjectStatus,
    pub to: ProjectStatus,
}

/// Handler for outline edits.
///
/// # Dependencies
///
/// - `SessionContext`: Session token gate
/// - `ProjectRepository`: Persists the outline
pub struct EditOutlineHandler {
    session: SessionContext,
    repository: Arc<dyn ProjectRepository>,
}

impl EditOutlineHandler {
    pub fn new(session: SessionContext, repository: Arc<dyn ProjectRepository>) -> Self {
        Self {
            session,
            repository,
        }
    }

    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        cmd: EditOutlineCommand,
        metadata: CommandMetadata,
    ) -> Result<EditOutlineResult, ProjectError> {
        let span = tracing::info_span!(
            "edit_outline",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
            edit = cmd.edit.kind(),
        );
        self.edit(handle, cmd.edit).instrument(span).await
    }

    async fn edit(
        &self,
        handle: &ProjectHandle,
        edit: OutlineEdit,
    ) -> Result<EditOutlineResult, ProjectError> {
        let token = self.session.require_token()?;

        let _commit = handle.lock_commit().await;
        let (snapshot, from) = handle.view().await;
        if !from.allows_outline_edit() {
            return Err(ProjectError::precondition(match from {
                ProjectStatus::Ready => {
                    "outline cannot change while generated content exists; discard it first"
                        .to_string()
                }
                other => format!("outline cannot change while project is {}", other),
            }));
        }

        let candidate = edit.apply(snapshot.outline())?;
        let to = ProjectStatus::after_outline_edit(candidate.len());
        if to != from {
            from.transition_to(to)?;
        }

        let project = self
            .repository
            .update(&token, handle.id(), ProjectPatch::outline(candidate))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Outline update failed, snapshot unchanged");
                ProjectError::from(e)
            })?;
        handle.replace(project.clone()).await;

        let to = project.status();
        tracing::info!(
            from = %from,
            to = %to,
            entries = project.outline().len(),
            "Outline updated"
        );
        Ok(EditOutlineResult { project, from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProjectRepository, RepositoryOp};
    use crate::adapters::session::StaticSessionProvider;
    use crate::domain::foundation::{ProjectId, Timestamp};
    use crate::domain::project::{GeneratedContent, ProjectType, Section};
    use crate::ports::CollaboratorError;
    use proptest::prelude::*;

    // ───────────────────────────────────────────────────────────────
    // Test helpers
    // ───────────────────────────────────────────────────────────────

    struct Fixture {
        repo: InMemoryProjectRepository,
        handle: Arc<ProjectHandle>,
        handler: EditOutlineHandler,
    }

    fn fixture_with(
        titles: &[&str],
        content: Option<Vec<Section>>,
        token: Option<&str>,
    ) -> Fixture {
        let project = Project::reconstitute(
            ProjectId::new(1),
            "Quarterly Report",
            ProjectType::Document,
            Timestamp::now(),
            Outline::from_titles(titles.iter().copied()).unwrap(),
            content.and_then(GeneratedContent::reconstitute),
        );
        let repo = InMemoryProjectRepository::new();
        repo.seed(project.clone());
        let provider = match token {
            Some(t) => StaticSessionProvider::with_token(t),
            None => StaticSessionProvider::anonymous(),
        };
        let handler = EditOutlineHandler::new(
            SessionContext::new(Arc::new(provider)),
            Arc::new(repo.clone()),
        );
        Fixture {
            repo,
            handle: ProjectHandle::new(project),
            handler,
        }
    }

    fn fixture(titles: &[&str]) -> Fixture {
        fixture_with(titles, None, Some("tok"))
    }

    async fn run(f: &Fixture, edit: OutlineEdit) -> Result<EditOutlineResult, ProjectError> {
        f.handler
            .handle(&f.handle, edit.into(), CommandMetadata::new())
            .await
    }

    async fn titles(f: &Fixture) -> Vec<String> {
        f.handle.snapshot().await.outline().titles().to_vec()
    }

    // ───────────────────────────────────────────────────────────────
    // Happy paths
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn first_add_moves_empty_to_outlined() {
        let f = fixture(&[]);
        let result = run(&f, OutlineEdit::add("Introduction")).await.unwrap();

        assert_eq!(result.from, ProjectStatus::Empty);
        assert_eq!(result.to, ProjectStatus::Outlined);
        assert_eq!(titles(&f).await, vec!["Introduction"]);
        assert_eq!(f.repo.update_count(), 1);
    }

    #[tokio::test]
    async fn removing_last_entry_returns_to_empty() {
        let f = fixture(&["Only"]);
        let result = run(&f, OutlineEdit::remove(0)).await.unwrap();
        assert_eq!(result.to, ProjectStatus::Empty);
        assert!(titles(&f).await.is_empty());
    }

    #[tokio::test]
    async fn update_replaces_title_in_place() {
        let f = fixture(&["A", "B", "C"]);
        run(&f, OutlineEdit::update(1, "Beta")).await.unwrap();
        assert_eq!(titles(&f).await, vec!["A", "Beta", "C"]);
    }

    #[tokio::test]
    async fn reorder_moves_entry() {
        let f = fixture(&["A", "B", "C"]);
        run(&f, OutlineEdit::reorder(0, 2)).await.unwrap();
        assert_eq!(titles(&f).await, vec!["B", "C", "A"]);
    }

    #[tokio::test]
    async fn replace_installs_whole_outline() {
        let f = fixture(&["Old"]);
        run(&f, OutlineEdit::replace(["One", "Two"])).await.unwrap();
        assert_eq!(titles(&f).await, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn snapshot_comes_from_repository_record() {
        let f = fixture(&[]);
        let result = run(&f, OutlineEdit::add("  Padded  ")).await.unwrap();
        assert_eq!(Some(result.project), f.repo.stored(ProjectId::new(1)));
    }

    // ───────────────────────────────────────────────────────────────
    // Failures
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn out_of_range_remove_is_index_error_without_remote_call() {
        let f = fixture(&["A", "B", "C"]);
        let err = run(&f, OutlineEdit::remove(5)).await.unwrap_err();

        assert_eq!(err, ProjectError::Index { index: 5, len: 3 });
        assert_eq!(titles(&f).await, vec!["A", "B", "C"]);
        assert_eq!(f.repo.update_count(), 0);
    }

    #[tokio::test]
    async fn blank_title_is_validation_error() {
        let f = fixture(&[]);
        let err = run(&f, OutlineEdit::add("   ")).await.unwrap_err();
        assert!(matches!(err, ProjectError::Validation(_)));
        assert_eq!(f.repo.update_count(), 0);
    }

    #[tokio::test]
    async fn update_checks_index_before_title() {
        let f = fixture(&["A"]);
        let err = run(&f, OutlineEdit::update(3, "")).await.unwrap_err();
        assert!(matches!(err, ProjectError::Index { .. }));
    }

    #[tokio::test]
    async fn remote_failure_rolls_back() {
        let f = fixture(&["A"]);
        f.repo
            .fail_next(RepositoryOp::Update, CollaboratorError::transport("reset"));

        let err = run(&f, OutlineEdit::add("B")).await.unwrap_err();

        assert!(matches!(err, ProjectError::Remote(_)));
        assert_eq!(titles(&f).await, vec!["A"]);
        assert_eq!(f.handle.status().await, ProjectStatus::Outlined);
    }

    #[tokio::test]
    async fn missing_session_fails_before_anything_else() {
        let f = fixture_with(&[], None, None);
        let err = run(&f, OutlineEdit::remove(9)).await.unwrap_err();
        assert_eq!(err, ProjectError::AuthRequired);
        assert_eq!(f.repo.update_count(), 0);
    }

    #[tokio::test]
    async fn ready_project_refuses_outline_edits() {
        let f = fixture_with(
            &["A"],
            Some(vec![Section::generated("A", "text")]),
            Some("tok"),
        );
        let err = run(&f, OutlineEdit::add("B")).await.unwrap_err();
        assert!(matches!(err, ProjectError::Precondition(_)));
        assert_eq!(f.repo.update_count(), 0);
    }

    #[tokio::test]
    async fn precondition_is_checked_before_validation() {
        let f = fixture_with(
            &["A"],
            Some(vec![Section::generated("A", "text")]),
            Some("tok"),
        );
        let err = run(&f, OutlineEdit::add("")).await.unwrap_err();
        assert!(matches!(err, ProjectError::Precondition(_)));
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn add_then_remove_restores_outline(
            existing in prop::collection::vec("[a-z]{1,8}", 0..6),
            title in "[a-z]{1,8}",
        ) {
            let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            rt.block_on(async {
                let refs: Vec<&str> = existing.iter().map(String::as_str).collect();
                let f = fixture(&refs);
                run(&f, OutlineEdit::add(title.clone())).await.unwrap();
                let after_add = titles(&f).await;
                prop_assert_eq!(after_add.last(), Some(&title));

                run(&f, OutlineEdit::remove(existing.len())).await.unwrap();
                prop_assert_eq!(titles(&f).await, existing.clone());
                Ok(())
            })?;
        }
    }
}

//! RefinementHandler - single-section refinement and like/dislike feedback.
//!
//! Both operations funnel into `apply_section_update`: run the collaborator
//! (if the request needs a rewrite) without holding any lock, then commit
//! the edited section through the serialized section-update primitive.
//! Only the addressed section ever changes.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::handlers::section_update::{commit_section_edit, precheck_section};
use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::{CommandMetadata, SessionToken};
use crate::domain::project::{
    Feedback, Instruction, Project, ProjectError, RefinementRequest, Section, SectionRevision,
};
use crate::ports::{ProjectRepository, RefineRequest, SectionRefiner};

/// Command to rewrite a section following a free-text instruction.
#[derive(Debug, Clone)]
pub struct RefineSectionCommand {
    pub index: usize,
    /// Validated by the handler, after the session and lifecycle checks.
    pub instruction: String,
    pub expected_revision: Option<SectionRevision>,
}

impl RefineSectionCommand {
    pub fn new(index: usize, instruction: impl Into<String>) -> Self {
        Self {
            index,
            instruction: instruction.into(),
            expected_revision: None,
        }
    }

    pub fn expecting(mut self, revision: SectionRevision) -> Self {
        self.expected_revision = Some(revision);
        self
    }
}

/// Command to record like/dislike feedback on a section.
#[derive(Debug, Clone)]
pub struct GiveFeedbackCommand {
    pub index: usize,
    pub feedback: Feedback,
    pub expected_revision: Option<SectionRevision>,
}

impl GiveFeedbackCommand {
    pub fn like(index: usize) -> Self {
        Self {
            index,
            feedback: Feedback::Liked,
            expected_revision: None,
        }
    }

    pub fn dislike(index: usize, comment: Option<String>) -> Self {
        Self {
            index,
            feedback: Feedback::disliked(comment),
            expected_revision: None,
        }
    }

    pub fn expecting(mut self, revision: SectionRevision) -> Self {
        self.expected_revision = Some(revision);
        self
    }
}

/// Result of a committed refinement.
#[derive(Debug, Clone)]
pub struct RefinementResult {
    /// Authoritative record after the update.
    pub project: Project,
    pub index: usize,
    /// The section as committed.
    pub section: Section,
}

/// Handler for refinement and feedback.
///
/// # Dependencies
///
/// - `SessionContext`: Session token gate
/// - `SectionRefiner`: Rewrites the section
/// - `ProjectRepository`: Persists the content list
pub struct RefinementHandler {
    session: SessionContext,
    refiner: Arc<dyn SectionRefiner>,
    repository: Arc<dyn ProjectRepository>,
}

impl RefinementHandler {
    pub fn new(
        session: SessionContext,
        refiner: Arc<dyn SectionRefiner>,
        repository: Arc<dyn ProjectRepository>,
    ) -> Self {
        Self {
            session,
            refiner,
            repository,
        }
    }

    /// Rewrites one section. Its feedback tag is left alone.
    pub async fn refine_section(
        &self,
        handle: &ProjectHandle,
        cmd: RefineSectionCommand,
        metadata: CommandMetadata,
    ) -> Result<RefinementResult, ProjectError> {
        let span = tracing::info_span!(
            "refine_section",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
            section = cmd.index,
        );
        async move {
            let token = self.session.require_token()?;
            let (snapshot, section) =
                precheck_section(handle, cmd.index, cmd.expected_revision).await?;
            let instruction = Instruction::new(&cmd.instruction)?;

            self.apply_section_update(
                handle,
                &token,
                cmd.index,
                RefinementRequest::Instruction(instruction),
                cmd.expected_revision,
                &snapshot,
                &section,
            )
            .await
        }
        .instrument(span)
        .await
    }

    /// Records like/dislike feedback. A dislike also rewrites the section.
    pub async fn give_feedback(
        &self,
        handle: &ProjectHandle,
        cmd: GiveFeedbackCommand,
        metadata: CommandMetadata,
    ) -> Result<RefinementResult, ProjectError> {
        let request = RefinementRequest::Feedback(cmd.feedback);
        let span = tracing::info_span!(
            "give_feedback",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
            section = cmd.index,
            kind = request.kind(),
        );
        async move {
            let token = self.session.require_token()?;
            let (snapshot, section) =
                precheck_section(handle, cmd.index, cmd.expected_revision).await?;

            self.apply_section_update(
                handle,
                &token,
                cmd.index,
                request,
                cmd.expected_revision,
                &snapshot,
                &section,
            )
            .await
        }
        .instrument(span)
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn apply_section_update(
        &self,
        handle: &ProjectHandle,
        token: &SessionToken,
        index: usize,
        request: RefinementRequest,
        expected_revision: Option<SectionRevision>,
        snapshot: &Project,
        section: &Section,
    ) -> Result<RefinementResult, ProjectError> {
        let rewrite = match request.collaborator_instruction() {
            Some(instruction) => {
                let refine = RefineRequest {
                    project_id: snapshot.id(),
                    topic: snapshot.topic().to_string(),
                    project_type: snapshot.project_type(),
                    section_index: index,
                    section_title: section.title().to_string(),
                    current_content: section.content().to_string(),
                    instruction: instruction.to_string(),
                    feedback: request.feedback_tag(),
                    comment: request.comment().map(str::to_string),
                };
                tracing::debug!(kind = request.kind(), "Calling section refiner");
                let rewrite = self.refiner.refine(token, &refine).await.map_err(|e| {
                    tracing::warn!(error = %e, "Refinement failed, section unchanged");
                    e.into_generation_error()
                })?;
                Some(rewrite)
            }
            None => None,
        };

        let feedback = request
            .feedback_tag()
            .map(|tag| (tag, request.comment().map(str::to_string)));

        let project = commit_section_edit(
            self.repository.as_ref(),
            token,
            handle,
            index,
            expected_revision,
            move |section| section.apply_refinement(rewrite, feedback),
        )
        .await?;

        let section = project
            .generated_content()
            .ok_or_else(|| ProjectError::remote("repository returned a project without content"))?
            .section(index)?
            .clone();

        tracing::info!(
            kind = request.kind(),
            revision = %section.revision(),
            feedback = %section.feedback(),
            "Section refined"
        );
        Ok(RefinementResult {
            project,
            index,
            section,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryProjectRepository, MockSectionRefiner, RepositoryOp};
    use crate::adapters::session::StaticSessionProvider;
    use crate::domain::foundation::{ProjectId, Timestamp};
    use crate::domain::project::{
        GeneratedContent, Outline, ProjectStatus, ProjectType, SectionFeedback, SectionRewrite,
        DISLIKE_INSTRUCTION,
    };
    use crate::ports::CollaboratorError;
    use proptest::prelude::*;
    use std::time::Duration;

    // ───────────────────────────────────────────────────────────────
    // Test helpers
    // ───────────────────────────────────────────────────────────────

    struct Fixture {
        repo: InMemoryProjectRepository,
        refiner: MockSectionRefiner,
        handle: Arc<ProjectHandle>,
        handler: RefinementHandler,
    }

    fn fixture_with(titles: &[&str], with_content: bool, refiner: MockSectionRefiner) -> Fixture {
        let content = with_content
            .then(|| {
                titles
                    .iter()
                    .map(|t| Section::generated(*t, format!("{} body", t)))
                    .collect::<Vec<_>>()
            })
            .and_then(GeneratedContent::reconstitute);
        let project = Project::reconstitute(
            ProjectId::new(1),
            "Quarterly Report",
            ProjectType::Document,
            Timestamp::now(),
            Outline::from_titles(titles.iter().copied()).unwrap(),
            content,
        );
        let repo = InMemoryProjectRepository::new();
        repo.seed(project.clone());
        let handler = RefinementHandler::new(
            SessionContext::new(Arc::new(StaticSessionProvider::with_token("tok"))),
            Arc::new(refiner.clone()),
            Arc::new(repo.clone()),
        );
        Fixture {
            repo,
            refiner,
            handle: ProjectHandle::new(project),
            handler,
        }
    }

    fn ready(refiner: MockSectionRefiner) -> Fixture {
        fixture_with(&["Intro", "Body", "Outro"], true, refiner)
    }

    async fn section(f: &Fixture, index: usize) -> Section {
        f.handle
            .snapshot()
            .await
            .generated_content()
            .unwrap()
            .section(index)
            .unwrap()
            .clone()
    }

    // ───────────────────────────────────────────────────────────────
    // Refine
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn refine_rewrites_only_addressed_section() {
        let f = ready(MockSectionRefiner::new().with_rewrite(SectionRewrite::new("Shorter body")));
        let before = f.handle.snapshot().await;

        let result = f
            .handler
            .refine_section(
                &f.handle,
                RefineSectionCommand::new(1, "make it shorter"),
                CommandMetadata::new(),
            )
            .await
            .unwrap();

        assert_eq!(result.section.content(), "Shorter body");
        assert_eq!(result.section.feedback(), SectionFeedback::None);
        let before_content = before.generated_content().unwrap();
        assert_eq!(&section(&f, 0).await, before_content.section(0).unwrap());
        assert_eq!(&section(&f, 2).await, before_content.section(2).unwrap());
        assert_eq!(f.handle.status().await, ProjectStatus::Ready);
    }

    #[tokio::test]
    async fn refine_sends_context_but_not_notes() {
        let f = ready(MockSectionRefiner::new());

        f.handler
            .refine_section(
                &f.handle,
                RefineSectionCommand::new(0, " punchier "),
                CommandMetadata::new(),
            )
            .await
            .unwrap();

        let call = &f.refiner.calls()[0];
        assert_eq!(call.section_index, 0);
        assert_eq!(call.section_title, "Intro");
        assert_eq!(call.current_content, "Intro body");
        assert_eq!(call.instruction, "punchier");
        assert_eq!(call.topic, "Quarterly Report");
        assert_eq!(call.feedback, None);
    }

    #[tokio::test]
    async fn refine_keeps_note() {
        let f = ready(MockSectionRefiner::new());
        crate::application::handlers::section_update::commit_section_edit(
            &f.repo,
            &SessionToken::new("tok").unwrap(),
            &f.handle,
            2,
            None,
            |s| s.apply_note("cite Q3 numbers"),
        )
        .await
        .unwrap();

        f.handler
            .refine_section(
                &f.handle,
                RefineSectionCommand::new(2, "expand"),
                CommandMetadata::new(),
            )
            .await
            .unwrap();

        assert_eq!(section(&f, 2).await.note(), "cite Q3 numbers");
    }

    #[tokio::test]
    async fn blank_instruction_is_validation_error() {
        let f = ready(MockSectionRefiner::new());
        let err = f
            .handler
            .refine_section(&f.handle, RefineSectionCommand::new(0, "  "), CommandMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::Validation(_)));
        assert_eq!(f.refiner.call_count(), 0);
    }

    #[tokio::test]
    async fn refine_before_generation_is_precondition_error() {
        let f = fixture_with(&["Intro"], false, MockSectionRefiner::new());
        let err = f
            .handler
            .refine_section(&f.handle, RefineSectionCommand::new(0, ""), CommandMetadata::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::Precondition(_)));
    }

    #[tokio::test]
    async fn out_of_range_section_is_index_error() {
        let f = ready(MockSectionRefiner::new());
        let err = f
            .handler
            .refine_section(&f.handle, RefineSectionCommand::new(3, "x"), CommandMetadata::new())
            .await
            .unwrap_err();
        assert_eq!(err, ProjectError::Index { index: 3, len: 3 });
        assert_eq!(f.refiner.call_count(), 0);
    }

    #[tokio::test]
    async fn collaborator_failure_leaves_section_unchanged() {
        let f = ready(MockSectionRefiner::new().with_error(CollaboratorError::Unauthorized));
        let before = f.handle.snapshot().await;

        let err = f
            .handler
            .refine_section(&f.handle, RefineSectionCommand::new(1, "x"), CommandMetadata::new())
            .await
            .unwrap_err();

        assert!(err.requires_reauthentication());
        assert_eq!(f.handle.snapshot().await, before);
        assert_eq!(f.repo.update_count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_leaves_section_unchanged() {
        let f = ready(MockSectionRefiner::new());
        f.repo
            .fail_next(RepositoryOp::Update, CollaboratorError::transport("reset"));
        let before = f.handle.snapshot().await;

        let err = f
            .handler
            .refine_section(&f.handle, RefineSectionCommand::new(1, "x"), CommandMetadata::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProjectError::Remote(_)));
        assert_eq!(f.handle.snapshot().await, before);
    }

    // ───────────────────────────────────────────────────────────────
    // Feedback
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn like_sets_tag_without_collaborator_call() {
        let f = ready(MockSectionRefiner::new());

        let result = f
            .handler
            .give_feedback(&f.handle, GiveFeedbackCommand::like(0), CommandMetadata::new())
            .await
            .unwrap();

        assert_eq!(result.section.feedback(), SectionFeedback::Liked);
        assert_eq!(result.section.content(), "Intro body");
        assert_eq!(f.refiner.call_count(), 0);
        assert_eq!(f.repo.update_count(), 1);
    }

    #[tokio::test]
    async fn dislike_with_comment_uses_comment_as_instruction() {
        let f = ready(MockSectionRefiner::new());

        let result = f
            .handler
            .give_feedback(
                &f.handle,
                GiveFeedbackCommand::dislike(1, Some("too formal".into())),
                CommandMetadata::new(),
            )
            .await
            .unwrap();

        let call = &f.refiner.calls()[0];
        assert_eq!(call.instruction, "too formal");
        assert_eq!(call.feedback, Some(SectionFeedback::Disliked));
        assert_eq!(call.comment.as_deref(), Some("too formal"));
        assert_eq!(result.section.feedback(), SectionFeedback::Disliked);
        assert_eq!(result.section.comment(), Some("too formal"));
        assert_eq!(result.section.content(), "Body body (too formal)");
    }

    #[tokio::test]
    async fn dislike_without_comment_uses_fixed_instruction() {
        let f = ready(MockSectionRefiner::new());
        f.handler
            .give_feedback(&f.handle, GiveFeedbackCommand::dislike(2, None), CommandMetadata::new())
            .await
            .unwrap();
        assert_eq!(f.refiner.calls()[0].instruction, DISLIKE_INSTRUCTION);
        assert_eq!(section(&f, 2).await.comment(), None);
    }

    #[tokio::test]
    async fn like_after_dislike_clears_comment() {
        let f = ready(MockSectionRefiner::new());
        f.handler
            .give_feedback(
                &f.handle,
                GiveFeedbackCommand::dislike(0, Some("meh".into())),
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        f.handler
            .give_feedback(&f.handle, GiveFeedbackCommand::like(0), CommandMetadata::new())
            .await
            .unwrap();

        let s = section(&f, 0).await;
        assert_eq!(s.feedback(), SectionFeedback::Liked);
        assert_eq!(s.comment(), None);
        assert_eq!(s.revision(), SectionRevision::from_raw(2));
    }

    #[tokio::test]
    async fn repeated_like_keeps_liked() {
        let f = ready(MockSectionRefiner::new());
        for _ in 0..2 {
            f.handler
                .give_feedback(&f.handle, GiveFeedbackCommand::like(1), CommandMetadata::new())
                .await
                .unwrap();
        }

        let s = section(&f, 1).await;
        assert_eq!(s.feedback(), SectionFeedback::Liked);
        assert_eq!(s.content(), "Body body");
        assert_eq!(s.revision(), SectionRevision::from_raw(2));
        assert_eq!(f.refiner.call_count(), 0);
        assert_eq!(f.repo.update_count(), 2);
    }

    #[tokio::test]
    async fn repeated_dislike_keeps_disliked() {
        let f = ready(MockSectionRefiner::new());
        for _ in 0..2 {
            f.handler
                .give_feedback(
                    &f.handle,
                    GiveFeedbackCommand::dislike(1, Some("wordy".into())),
                    CommandMetadata::new(),
                )
                .await
                .unwrap();
        }

        let s = section(&f, 1).await;
        assert_eq!(s.feedback(), SectionFeedback::Disliked);
        assert_eq!(s.comment(), Some("wordy"));
        assert_eq!(s.content(), "Body body (wordy) (wordy)");
        assert_eq!(s.revision(), SectionRevision::from_raw(2));
        assert_eq!(f.refiner.call_count(), 2);
        assert_eq!(f.refiner.calls()[1].current_content, "Body body (wordy)");
    }

    // ───────────────────────────────────────────────────────────────
    // Concurrency and revisions
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn concurrent_refinements_of_different_sections_both_land() {
        let f = ready(MockSectionRefiner::new().with_delay(Duration::from_millis(20)));

        let (a, b) = tokio::join!(
            f.handler.refine_section(
                &f.handle,
                RefineSectionCommand::new(0, "a"),
                CommandMetadata::new(),
            ),
            f.handler.refine_section(
                &f.handle,
                RefineSectionCommand::new(2, "b"),
                CommandMetadata::new(),
            ),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(section(&f, 0).await.content(), "Intro body (a)");
        assert_eq!(section(&f, 2).await.content(), "Outro body (b)");
        assert_eq!(section(&f, 1).await.content(), "Body body");
        assert_eq!(Some(f.handle.snapshot().await), f.repo.stored(ProjectId::new(1)));
    }

    #[tokio::test]
    async fn matching_expected_revision_succeeds() {
        let f = ready(MockSectionRefiner::new());
        let result = f
            .handler
            .refine_section(
                &f.handle,
                RefineSectionCommand::new(0, "x").expecting(SectionRevision::initial()),
                CommandMetadata::new(),
            )
            .await
            .unwrap();
        assert_eq!(result.section.revision(), SectionRevision::from_raw(1));
    }

    #[tokio::test]
    async fn revision_changed_during_call_is_conflict() {
        let f = ready(MockSectionRefiner::new().with_delay(Duration::from_millis(30)));

        let (slow, fast) = tokio::join!(
            f.handler.refine_section(
                &f.handle,
                RefineSectionCommand::new(1, "slow").expecting(SectionRevision::initial()),
                CommandMetadata::new(),
            ),
            f.handler.give_feedback(
                &f.handle,
                GiveFeedbackCommand::like(1),
                CommandMetadata::new(),
            ),
        );

        fast.unwrap();
        assert!(matches!(
            slow,
            Err(ProjectError::Conflict { index: 1, expected: 0, actual: 1 })
        ));
        assert_eq!(f.repo.update_count(), 1);
        assert_eq!(section(&f, 1).await.content(), "Body body");
    }

    #[tokio::test]
    async fn without_expected_revision_last_write_wins() {
        let f = ready(MockSectionRefiner::new().with_delay(Duration::from_millis(30)));

        let (slow, fast) = tokio::join!(
            f.handler.refine_section(
                &f.handle,
                RefineSectionCommand::new(1, "slow"),
                CommandMetadata::new(),
            ),
            f.handler.give_feedback(
                &f.handle,
                GiveFeedbackCommand::like(1),
                CommandMetadata::new(),
            ),
        );

        fast.unwrap();
        let slow = slow.unwrap();
        assert_eq!(slow.section.content(), "Body body (slow)");
        assert_eq!(slow.section.feedback(), SectionFeedback::Liked);
        assert_eq!(slow.section.revision(), SectionRevision::from_raw(2));
    }

    // ───────────────────────────────────────────────────────────────
    // Properties
    // ───────────────────────────────────────────────────────────────

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn refine_changes_only_the_target(len in 1usize..6, pick in 0usize..6) {
            let index = pick % len;
            let titles: Vec<String> = (0..len).map(|i| format!("S{}", i)).collect();
            let refs: Vec<&str> = titles.iter().map(String::as_str).collect();

            let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            rt.block_on(async {
                let f = fixture_with(&refs, true, MockSectionRefiner::new());
                let before = f.handle.snapshot().await;
                f.handler
                    .refine_section(
                        &f.handle,
                        RefineSectionCommand::new(index, "tweak"),
                        CommandMetadata::new(),
                    )
                    .await
                    .unwrap();
                let after = f.handle.snapshot().await;

                let before = before.generated_content().unwrap();
                let after = after.generated_content().unwrap();
                prop_assert_eq!(before.len(), after.len());
                for i in 0..len {
                    if i == index {
                        prop_assert_ne!(before.section(i).unwrap(), after.section(i).unwrap());
                    } else {
                        prop_assert_eq!(before.section(i).unwrap(), after.section(i).unwrap());
                    }
                }
                Ok(())
            })?;
        }
    }
}

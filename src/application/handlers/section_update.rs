//! Shared section-update primitive.
//!
//! Refinement, feedback and notes all end in the same commit: splice one
//! edited section into the latest snapshot, persist the full content list,
//! and install the returned record. Commits are serialized per handle so
//! concurrent edits of different sections never clobber each other.

use crate::application::ProjectHandle;
use crate::domain::foundation::SessionToken;
use crate::domain::project::{
    GeneratedContent, Project, ProjectError, ProjectStatus, Section, SectionRevision,
};
use crate::ports::{ProjectPatch, ProjectRepository};

/// Checks that section edits are allowed and returns the content.
fn editable_content(
    project: &Project,
    status: ProjectStatus,
) -> Result<&GeneratedContent, ProjectError> {
    if !status.allows_section_edit() {
        return Err(ProjectError::precondition(format!(
            "sections can only be edited once content is ready (project is {})",
            status
        )));
    }
    project
        .generated_content()
        .ok_or_else(|| ProjectError::precondition("project has no generated content"))
}

fn check_revision(
    index: usize,
    expected: Option<SectionRevision>,
    actual: SectionRevision,
) -> Result<(), ProjectError> {
    match expected {
        Some(expected) if expected != actual => Err(ProjectError::Conflict {
            index,
            expected: expected.as_u32(),
            actual: actual.as_u32(),
        }),
        _ => Ok(()),
    }
}

/// Local checks run before any collaborator call.
///
/// Returns the snapshot and the addressed section as they are now.
pub(crate) async fn precheck_section(
    handle: &ProjectHandle,
    index: usize,
    expected: Option<SectionRevision>,
) -> Result<(Project, Section), ProjectError> {
    let (project, status) = handle.view().await;
    let section = editable_content(&project, status)?.section(index)?.clone();
    check_revision(index, expected, section.revision())?;
    Ok((project, section))
}

/// Applies `edit` to the section at `index` of the latest snapshot and
/// persists the result. On any failure the snapshot is left as it was.
pub(crate) async fn commit_section_edit<F>(
    repository: &dyn ProjectRepository,
    token: &SessionToken,
    handle: &ProjectHandle,
    index: usize,
    expected: Option<SectionRevision>,
    edit: F,
) -> Result<Project, ProjectError>
where
    F: FnOnce(&mut Section) + Send,
{
    let _commit = handle.lock_commit().await;

    let (latest, status) = handle.view().await;
    let content = editable_content(&latest, status)?;
    check_revision(index, expected, content.section(index)?.revision())?;
    let updated = content.with_section(index, edit)?;

    let project = repository
        .update(token, handle.id(), ProjectPatch::content(updated.into_sections()))
        .await
        .map_err(|e| {
            tracing::warn!(
                section = index,
                error = %e,
                "Section update failed, snapshot unchanged"
            );
            ProjectError::from(e)
        })?;
    handle.replace(project.clone()).await;
    Ok(project)
}

//! Shared handler context: the session gate and the per-project handle.
//!
//! A `ProjectHandle` owns the client-side snapshot of one project. The
//! snapshot is only ever replaced wholesale by a record returned from the
//! repository. Remote collaborator calls run without any lock held; the
//! commit of their result is serialized per handle.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::domain::foundation::{ProjectId, SessionToken, StateMachine};
use crate::domain::project::{Project, ProjectError, ProjectStatus};
use crate::ports::SessionProvider;

/// Gate every operation passes first.
#[derive(Clone)]
pub struct SessionContext {
    provider: Arc<dyn SessionProvider>,
}

impl SessionContext {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self { provider }
    }

    /// Current token, or `AuthRequired` without contacting anything.
    pub fn require_token(&self) -> Result<SessionToken, ProjectError> {
        self.provider
            .current_token()
            .ok_or(ProjectError::AuthRequired)
    }
}

#[derive(Debug)]
struct HandleState {
    project: Project,
    generating: bool,
    deleted: bool,
}

impl HandleState {
    fn status(&self) -> ProjectStatus {
        if self.deleted {
            ProjectStatus::Deleted
        } else if self.generating {
            ProjectStatus::Generating
        } else {
            self.project.status()
        }
    }
}

/// Client-side handle on one project.
#[derive(Debug)]
pub struct ProjectHandle {
    id: ProjectId,
    state: RwLock<HandleState>,
    commit: Mutex<()>,
}

impl ProjectHandle {
    /// Wraps an authoritative record.
    pub fn new(project: Project) -> Arc<Self> {
        Arc::new(Self {
            id: project.id(),
            state: RwLock::new(HandleState {
                project,
                generating: false,
                deleted: false,
            }),
            commit: Mutex::new(()),
        })
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    /// Copy of the current snapshot.
    pub async fn snapshot(&self) -> Project {
        self.state.read().await.project.clone()
    }

    /// Lifecycle state, including the handle-only `Generating` and `Deleted`.
    pub async fn status(&self) -> ProjectStatus {
        self.state.read().await.status()
    }

    /// Snapshot and status read together.
    pub async fn view(&self) -> (Project, ProjectStatus) {
        let state = self.state.read().await;
        (state.project.clone(), state.status())
    }

    /// Serializes commits against this project.
    pub(crate) async fn lock_commit(&self) -> MutexGuard<'_, ()> {
        self.commit.lock().await
    }

    /// Fails with `Precondition` once the project is deleted.
    pub(crate) async fn ensure_live(&self) -> Result<(), ProjectError> {
        if self.state.read().await.deleted {
            return Err(ProjectError::precondition(format!(
                "project {} has been deleted",
                self.id
            )));
        }
        Ok(())
    }

    /// Replaces the snapshot with an authoritative record.
    pub(crate) async fn replace(&self, project: Project) {
        self.state.write().await.project = project;
    }

    /// Enters `Generating` if `allowed(current)` holds.
    ///
    /// Returns the snapshot the generation should work from together with
    /// the state it started in.
    pub(crate) async fn begin_generation<F>(
        &self,
        allowed: F,
    ) -> Result<(Project, ProjectStatus), ProjectError>
    where
        F: FnOnce(ProjectStatus) -> bool,
    {
        let mut state = self.state.write().await;
        let current = state.status();
        if !allowed(current) {
            return Err(ProjectError::precondition(format!(
                "cannot generate content while project is {}",
                current
            )));
        }
        current.transition_to(ProjectStatus::Generating)?;
        state.generating = true;
        Ok((state.project.clone(), current))
    }

    /// Leaves `Generating`, installing `committed` if the generation was
    /// persisted. Without a record the previous state is restored.
    pub(crate) async fn finish_generation(&self, committed: Option<Project>) {
        let mut state = self.state.write().await;
        state.generating = false;
        if let Some(project) = committed {
            state.project = project;
        }
    }

    /// Moves the handle into the terminal `Deleted` state.
    pub(crate) async fn mark_deleted(&self) -> Result<(), ProjectError> {
        let mut state = self.state.write().await;
        state.status().transition_to(ProjectStatus::Deleted)?;
        state.deleted = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::StaticSessionProvider;
    use crate::domain::foundation::Timestamp;
    use crate::domain::project::{Outline, ProjectType};

    fn project(outline: &[&str]) -> Project {
        Project::reconstitute(
            ProjectId::new(3),
            "Topic",
            ProjectType::Document,
            Timestamp::now(),
            Outline::from_titles(outline.iter().copied()).unwrap(),
            None,
        )
    }

    #[test]
    fn missing_token_is_auth_required() {
        let ctx = SessionContext::new(Arc::new(StaticSessionProvider::anonymous()));
        assert_eq!(ctx.require_token().unwrap_err(), ProjectError::AuthRequired);
    }

    #[test]
    fn present_token_is_returned() {
        let ctx = SessionContext::new(Arc::new(StaticSessionProvider::with_token("tok")));
        assert_eq!(ctx.require_token().unwrap().expose(), "tok");
    }

    #[tokio::test]
    async fn generation_status_overrides_derived_state() {
        let handle = ProjectHandle::new(project(&["A"]));
        let (_, from) = handle
            .begin_generation(|s| s == ProjectStatus::Outlined)
            .await
            .unwrap();
        assert_eq!(from, ProjectStatus::Outlined);
        assert_eq!(handle.status().await, ProjectStatus::Generating);

        handle.finish_generation(None).await;
        assert_eq!(handle.status().await, ProjectStatus::Outlined);
    }

    #[tokio::test]
    async fn second_generation_is_refused_while_in_flight() {
        let handle = ProjectHandle::new(project(&["A"]));
        handle.begin_generation(|_| true).await.unwrap();
        let err = handle.begin_generation(|_| true).await.unwrap_err();
        assert!(matches!(err, ProjectError::Precondition(_)));
    }

    #[tokio::test]
    async fn deleted_is_terminal() {
        let handle = ProjectHandle::new(project(&[]));
        handle.mark_deleted().await.unwrap();
        assert_eq!(handle.status().await, ProjectStatus::Deleted);
        assert!(handle.ensure_live().await.is_err());
        assert!(handle.mark_deleted().await.is_err());
    }
}

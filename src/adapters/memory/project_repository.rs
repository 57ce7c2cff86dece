//! In-memory project repository.
//!
//! Behaves like the remote backend: merges partial updates, returns the
//! authoritative record, and treats an empty content list as "no content".
//! Failures can be injected per operation.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{ProjectId, SessionToken, Timestamp};
use crate::domain::project::{GeneratedContent, Project, ProjectSummary};
use crate::ports::{CollaboratorError, NewProject, ProjectPatch, ProjectRepository};

/// Repository operation, for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOp {
    Create,
    Fetch,
    Update,
    Delete,
    List,
}

#[derive(Debug, Default)]
struct Store {
    projects: HashMap<ProjectId, Project>,
    next_id: i64,
    failures: HashMap<RepositoryOp, VecDeque<CollaboratorError>>,
    patches: Vec<(ProjectId, ProjectPatch)>,
}

/// In-memory `ProjectRepository`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    store: Arc<Mutex<Store>>,
    accepted_token: Option<String>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only this token is accepted; any other yields `Unauthorized`.
    pub fn with_accepted_token(mut self, token: impl Into<String>) -> Self {
        self.accepted_token = Some(token.into());
        self
    }

    /// Stores a record as if it had been created remotely.
    pub fn seed(&self, project: Project) {
        let mut store = self.lock();
        store.next_id = store.next_id.max(project.id().as_i64());
        store.projects.insert(project.id(), project);
    }

    /// Makes the next call of `op` fail with `error`.
    pub fn fail_next(&self, op: RepositoryOp, error: CollaboratorError) {
        self.lock().failures.entry(op).or_default().push_back(error);
    }

    /// Current stored record.
    pub fn stored(&self, id: ProjectId) -> Option<Project> {
        self.lock().projects.get(&id).cloned()
    }

    /// Every update received, in order.
    pub fn patches(&self) -> Vec<(ProjectId, ProjectPatch)> {
        self.lock().patches.clone()
    }

    pub fn update_count(&self) -> usize {
        self.lock().patches.len()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check(
        &self,
        store: &mut Store,
        token: &SessionToken,
        op: RepositoryOp,
    ) -> Result<(), CollaboratorError> {
        if let Some(accepted) = &self.accepted_token {
            if token.expose() != accepted {
                return Err(CollaboratorError::Unauthorized);
            }
        }
        if let Some(error) = store.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            return Err(error);
        }
        Ok(())
    }
}

fn not_found(id: ProjectId) -> CollaboratorError {
    CollaboratorError::NotFound(format!("project {}", id))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(
        &self,
        token: &SessionToken,
        project: NewProject,
    ) -> Result<Project, CollaboratorError> {
        let mut store = self.lock();
        self.check(&mut store, token, RepositoryOp::Create)?;

        store.next_id += 1;
        let id = ProjectId::new(store.next_id);
        let record = Project::reconstitute(
            id,
            project.topic,
            project.project_type,
            Timestamp::now(),
            project.outline,
            None,
        );
        store.projects.insert(id, record.clone());
        Ok(record)
    }

    async fn fetch(
        &self,
        token: &SessionToken,
        id: ProjectId,
    ) -> Result<Project, CollaboratorError> {
        let mut store = self.lock();
        self.check(&mut store, token, RepositoryOp::Fetch)?;
        store.projects.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    async fn update(
        &self,
        token: &SessionToken,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, CollaboratorError> {
        let mut store = self.lock();
        self.check(&mut store, token, RepositoryOp::Update)?;
        let current = store.projects.get(&id).cloned().ok_or_else(|| not_found(id))?;
        store.patches.push((id, patch.clone()));
        let outline = patch.outline.unwrap_or_else(|| current.outline().clone());
        let content = match patch.generated_content {
            Some(sections) => GeneratedContent::reconstitute(sections),
            None => current.generated_content().cloned(),
        };
        let merged = Project::reconstitute(
            id,
            current.topic(),
            current.project_type(),
            current.created_at(),
            outline,
            content,
        );
        store.projects.insert(id, merged.clone());
        Ok(merged)
    }

    async fn delete(&self, token: &SessionToken, id: ProjectId) -> Result<(), CollaboratorError> {
        let mut store = self.lock();
        self.check(&mut store, token, RepositoryOp::Delete)?;
        store.projects.remove(&id).map(|_| ()).ok_or_else(|| not_found(id))
    }

    async fn list(&self, token: &SessionToken) -> Result<Vec<ProjectSummary>, CollaboratorError> {
        let mut store = self.lock();
        self.check(&mut store, token, RepositoryOp::List)?;
        let mut summaries: Vec<ProjectSummary> =
            store.projects.values().map(Project::summary).collect();
        summaries.sort_by_key(|s| s.id.as_i64());
        Ok(summaries)
    }
}

//! In-process adapters: a project repository and mock collaborators.
//!
//! Used by the test suites and for running the front end without a backend.

mod collaborators;
mod project_repository;

pub use collaborators::{
    MockContentGenerator, MockDocumentExporter, MockOutlineSuggester, MockSectionRefiner,
    SuggestCall,
};
pub use project_repository::{InMemoryProjectRepository, RepositoryOp};

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Session
//!
//! - `SessionProvider` - Supplies the current session token
//!
//! ## Persistence
//!
//! - `ProjectRepository` - Remote project records (create, fetch, partial update, delete, list)
//!
//! ## AI Collaborators
//!
//! - `OutlineSuggester` - Proposes outline titles for a topic
//! - `ContentGenerator` - Writes one section per outline entry
//! - `SectionRefiner` - Rewrites a single section
//!
//! ## Export
//!
//! - `DocumentExporter` - Renders a project to DOCX/PPTX
//! - `ExportSink` - Stores an exported file locally

mod collaborator_error;
mod content_generator;
mod document_exporter;
mod export_sink;
mod outline_suggester;
mod project_repository;
mod section_refiner;
mod session_provider;

pub use collaborator_error::CollaboratorError;
pub use content_generator::{ContentGenerator, GenerationRequest};
pub use document_exporter::{DocumentExporter, ExportedDocument, RenderedFile};
pub use export_sink::{ExportSink, ExportSinkError};
pub use outline_suggester::OutlineSuggester;
pub use project_repository::{NewProject, ProjectPatch, ProjectRepository};
pub use section_refiner::{RefineRequest, SectionRefiner};
pub use session_provider::SessionProvider;

//! Backend API adapters.
//!
//! One `BackendClient` is shared by all of them:
//! - `HttpProjectRepository` - project records
//! - `HttpOutlineSuggester`, `HttpContentGenerator`, `HttpSectionRefiner` - AI endpoints
//! - `HttpDocumentExporter` - DOCX/PPTX rendering

mod assistant;
mod client;
mod exporter;
mod project_repository;
mod wire;

pub use assistant::{HttpContentGenerator, HttpOutlineSuggester, HttpSectionRefiner};
pub use client::{BackendClient, BackendClientConfig};
pub use exporter::HttpDocumentExporter;
pub use project_repository::HttpProjectRepository;

//! Document Exporter Port - renders a project into a downloadable file.
//!
//! Rendering happens remotely from the persisted record. The core only
//! decides eligibility and hands back the bytes.

use async_trait::async_trait;

use crate::domain::foundation::SessionToken;
use crate::domain::project::ExportRequest;

use super::CollaboratorError;

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    pub content: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

impl ExportedDocument {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// What the exporter returned, before the core fills in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub content: Vec<u8>,
    /// Content type reported by the collaborator, if any.
    pub content_type: Option<String>,
    /// Suggested filename reported by the collaborator, if any.
    pub filename: Option<String>,
}

/// Port for the export collaborator.
///
/// # Contract
///
/// - Renders the persisted project identified by the request
/// - Fails with `NotFound` for unknown projects
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export(
        &self,
        token: &SessionToken,
        request: ExportRequest,
    ) -> Result<RenderedFile, CollaboratorError>;
}

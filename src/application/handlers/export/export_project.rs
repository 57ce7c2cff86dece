//! ExportProjectHandler - renders a ready project into a downloadable file.

use std::sync::Arc;

use tracing::Instrument;

use crate::application::{ProjectHandle, SessionContext};
use crate::domain::foundation::CommandMetadata;
use crate::domain::project::{ExportGate, Project, ProjectError};
use crate::ports::{DocumentExporter, ExportedDocument, RenderedFile};

/// Default file name for an export: the topic as a single path component,
/// plus the type's extension. Spaces and path separators become
/// underscores and leading dots are dropped.
pub fn default_filename(project: &Project) -> String {
    let stem: String = project
        .topic()
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    format!(
        "{}.{}",
        if stem.is_empty() { "project" } else { stem },
        project.project_type().as_str()
    )
}

/// Handler for exporting projects.
///
/// # Dependencies
///
/// - `SessionContext`: Session token gate
/// - `DocumentExporter`: Renders the persisted project
pub struct ExportProjectHandler {
    session: SessionContext,
    exporter: Arc<dyn DocumentExporter>,
}

impl ExportProjectHandler {
    pub fn new(session: SessionContext, exporter: Arc<dyn DocumentExporter>) -> Self {
        Self { session, exporter }
    }

    pub async fn handle(
        &self,
        handle: &ProjectHandle,
        metadata: CommandMetadata,
    ) -> Result<ExportedDocument, ProjectError> {
        let span = tracing::info_span!(
            "export_project",
            correlation_id = %metadata.correlation_id(),
            project_id = %handle.id(),
        );
        self.export(handle).instrument(span).await
    }

    async fn export(&self, handle: &ProjectHandle) -> Result<ExportedDocument, ProjectError> {
        let token = self.session.require_token()?;
        let (project, status) = handle.view().await;
        let request = ExportGate::build_request(&project, status)?;

        tracing::debug!(format = %request.project_type, "Calling document exporter");
        let RenderedFile {
            content,
            content_type,
            filename,
        } = self.exporter.export(&token, request).await.map_err(|e| {
            tracing::warn!(error = %e, "Export failed");
            ProjectError::from(e)
        })?;

        let document = ExportedDocument {
            content,
            content_type: content_type
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| project.project_type().mime_type().to_string()),
            filename: filename
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| default_filename(&project)),
        };

        tracing::info!(filename = %document.filename, bytes = document.len(), "Project exported");
        Ok(document)
    }
}

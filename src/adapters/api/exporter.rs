//! HTTP implementation of `DocumentExporter` against `/api/export`.

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::Method;

use crate::domain::foundation::SessionToken;
use crate::domain::project::ExportRequest;
use crate::ports::{CollaboratorError, DocumentExporter, RenderedFile};

use super::BackendClient;

/// Streams the rendered file from `GET /api/export/{type}/{id}`.
#[derive(Debug, Clone)]
pub struct HttpDocumentExporter {
    client: BackendClient,
}

impl HttpDocumentExporter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentExporter for HttpDocumentExporter {
    async fn export(
        &self,
        token: &SessionToken,
        request: ExportRequest,
    ) -> Result<RenderedFile, CollaboratorError> {
        let path = format!(
            "/api/export/{}/{}",
            request.project_type.as_str(),
            request.project_id
        );
        let response = self
            .client
            .send(self.client.request(Method::GET, &path, token))
            .await?;

        let headers = response.headers();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let filename = headers
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_filename);

        let content = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::transport(format!("failed to read export: {}", e)))?
            .to_vec();

        Ok(RenderedFile {
            content,
            content_type,
            filename,
        })
    }
}

/// Extracts `filename` from a `Content-Disposition` value.
///
/// Handles bare and quoted values. Directory components are stripped.
fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("filename")
                .then(|| value.trim().trim_matches('"'))
        })
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or(name).to_string())
        .filter(|name| !name.is_empty())
}

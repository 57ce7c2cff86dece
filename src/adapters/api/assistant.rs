//! HTTP implementations of the AI collaborator ports against `/api/ai`.
//!
//! The backend drafts from the persisted record, so only identifiers and
//! the refinement inputs travel with a request. Nothing here persists.

use async_trait::async_trait;
use reqwest::Method;

use crate::domain::foundation::SessionToken;
use crate::domain::project::{ProjectType, Section, SectionRewrite};
use crate::ports::{
    CollaboratorError, ContentGenerator, GenerationRequest, OutlineSuggester, RefineRequest,
    SectionRefiner,
};

use super::wire::{
    GenerateBody, GenerateResponse, RefineBody, RefineResponse, SuggestOutlineBody,
    SuggestOutlineResponse,
};
use super::BackendClient;

/// `POST /api/ai/suggest-outline`
#[derive(Debug, Clone)]
pub struct HttpOutlineSuggester {
    client: BackendClient,
}

impl HttpOutlineSuggester {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OutlineSuggester for HttpOutlineSuggester {
    async fn suggest(
        &self,
        token: &SessionToken,
        topic: &str,
        project_type: ProjectType,
    ) -> Result<Vec<String>, CollaboratorError> {
        let request = self
            .client
            .request(Method::POST, "/api/ai/suggest-outline", token)
            .json(&SuggestOutlineBody {
                topic,
                project_type,
            });

        let response: SuggestOutlineResponse = self.client.send_json(request).await?;
        Ok(response.outline)
    }
}

/// `POST /api/ai/generate`
#[derive(Debug, Clone)]
pub struct HttpContentGenerator {
    client: BackendClient,
}

impl HttpContentGenerator {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate(
        &self,
        token: &SessionToken,
        request: &GenerationRequest,
    ) -> Result<Vec<Section>, CollaboratorError> {
        let http = self
            .client
            .request(Method::POST, "/api/ai/generate", token)
            .json(&GenerateBody {
                project_id: request.project_id,
            });

        let response: GenerateResponse = self.client.send_json(http).await?;
        tracing::debug!(
            project_id = %request.project_id,
            sections = response.sections.len(),
            "Backend generated content"
        );
        Ok(response.sections)
    }
}

/// `POST /api/ai/refine`
#[derive(Debug, Clone)]
pub struct HttpSectionRefiner {
    client: BackendClient,
}

impl HttpSectionRefiner {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SectionRefiner for HttpSectionRefiner {
    async fn refine(
        &self,
        token: &SessionToken,
        request: &RefineRequest,
    ) -> Result<SectionRewrite, CollaboratorError> {
        let http = self
            .client
            .request(Method::POST, "/api/ai/refine", token)
            .json(&RefineBody {
                project_id: request.project_id,
                section_index: request.section_index,
                refinement_prompt: &request.instruction,
                feedback: request.feedback,
                comment: request.comment.as_deref(),
            });

        let response: RefineResponse = self.client.send_json(http).await?;
        Ok(response.section)
    }
}

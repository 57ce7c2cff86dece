//! Mock AI and export collaborators for testing.
//!
//! Each mock answers from a queue of pre-configured responses and falls
//! back to a deterministic default once the queue is empty.
//!
//! # Features
//!
//! - Pre-configured responses
//! - Simulated delays for concurrency testing
//! - Error injection
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = MockContentGenerator::new()
//!     .with_error(CollaboratorError::transport("connection reset"))
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::SessionToken;
use crate::domain::project::{ExportRequest, ProjectType, Section, SectionRewrite};
use crate::ports::{
    CollaboratorError, ContentGenerator, DocumentExporter, GenerationRequest, OutlineSuggester,
    RefineRequest, RenderedFile, SectionRefiner,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Queue, delay and call log shared by every mock.
#[derive(Debug)]
struct Script<Req, Resp> {
    responses: Arc<Mutex<VecDeque<Result<Resp, CollaboratorError>>>>,
    calls: Arc<Mutex<Vec<Req>>>,
    delay: Duration,
}

impl<Req, Resp> Clone for Script<Req, Resp> {
    fn clone(&self) -> Self {
        Self {
            responses: Arc::clone(&self.responses),
            calls: Arc::clone(&self.calls),
            delay: self.delay,
        }
    }
}

impl<Req: Clone, Resp> Script<Req, Resp> {
    fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    fn push(&self, response: Result<Resp, CollaboratorError>) {
        lock(&self.responses).push_back(response);
    }

    fn calls(&self) -> Vec<Req> {
        lock(&self.calls).clone()
    }

    fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Records the call, waits out the delay, and pops the next scripted
    /// response.
    async fn next(&self, request: Req) -> Option<Result<Resp, CollaboratorError>> {
        lock(&self.calls).push(request);
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        lock(&self.responses).pop_front()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Outline suggestions
// ════════════════════════════════════════════════════════════════════════════════

/// Suggestion request as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestCall {
    pub topic: String,
    pub project_type: ProjectType,
}

/// Mock `OutlineSuggester`. Defaults to a three-part outline.
#[derive(Debug, Clone)]
pub struct MockOutlineSuggester {
    script: Script<SuggestCall, Vec<String>>,
}

impl Default for MockOutlineSuggester {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOutlineSuggester {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_suggestion<I, S>(self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script
            .push(Ok(titles.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }

    pub fn calls(&self) -> Vec<SuggestCall> {
        self.script.calls()
    }
}

#[async_trait]
impl OutlineSuggester for MockOutlineSuggester {
    async fn suggest(
        &self,
        _token: &SessionToken,
        topic: &str,
        project_type: ProjectType,
    ) -> Result<Vec<String>, CollaboratorError> {
        let call = SuggestCall {
            topic: topic.to_string(),
            project_type,
        };
        match self.script.next(call).await {
            Some(response) => response,
            None => Ok(vec![
                "Introduction".to_string(),
                format!("{} in depth", topic),
                "Conclusion".to_string(),
            ]),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Content generation
// ════════════════════════════════════════════════════════════════════════════════

/// Mock `ContentGenerator`. Defaults to one section per outline entry.
#[derive(Debug, Clone)]
pub struct MockContentGenerator {
    script: Script<GenerationRequest, Vec<Section>>,
}

impl Default for MockContentGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockContentGenerator {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    /// Queues a fixed set of sections, regardless of the outline.
    pub fn with_sections(self, sections: Vec<Section>) -> Self {
        self.script.push(Ok(sections));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.script.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }

    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.script.calls()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate(
        &self,
        _token: &SessionToken,
        request: &GenerationRequest,
    ) -> Result<Vec<Section>, CollaboratorError> {
        match self.script.next(request.clone()).await {
            Some(response) => response,
            None => Ok(request
                .outline
                .iter()
                .map(|title| {
                    Section::generated(title, format!("{} for {}", title, request.topic))
                })
                .collect()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Section refinement
// ════════════════════════════════════════════════════════════════════════════════

/// Mock `SectionRefiner`. Defaults to appending the instruction to the
/// current content.
#[derive(Debug, Clone)]
pub struct MockSectionRefiner {
    script: Script<RefineRequest, SectionRewrite>,
}

impl Default for MockSectionRefiner {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSectionRefiner {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_rewrite(self, rewrite: SectionRewrite) -> Self {
        self.script.push(Ok(rewrite));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.script.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }

    pub fn calls(&self) -> Vec<RefineRequest> {
        self.script.calls()
    }
}

#[async_trait]
impl SectionRefiner for MockSectionRefiner {
    async fn refine(
        &self,
        _token: &SessionToken,
        request: &RefineRequest,
    ) -> Result<SectionRewrite, CollaboratorError> {
        match self.script.next(request.clone()).await {
            Some(response) => response,
            None => Ok(SectionRewrite::new(format!(
                "{} ({})",
                request.current_content, request.instruction
            ))),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Export
// ════════════════════════════════════════════════════════════════════════════════

/// Mock `DocumentExporter`. Defaults to a small payload without a
/// suggested filename.
#[derive(Debug, Clone)]
pub struct MockDocumentExporter {
    script: Script<ExportRequest, RenderedFile>,
}

impl Default for MockDocumentExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDocumentExporter {
    pub fn new() -> Self {
        Self {
            script: Script::new(),
        }
    }

    pub fn with_file(self, file: RenderedFile) -> Self {
        self.script.push(Ok(file));
        self
    }

    pub fn with_error(self, error: CollaboratorError) -> Self {
        self.script.push(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.script.call_count()
    }

    pub fn calls(&self) -> Vec<ExportRequest> {
        self.script.calls()
    }
}

#[async_trait]
impl DocumentExporter for MockDocumentExporter {
    async fn export(
        &self,
        _token: &SessionToken,
        request: ExportRequest,
    ) -> Result<RenderedFile, CollaboratorError> {
        match self.script.next(request).await {
            Some(response) => response,
            None => Ok(RenderedFile {
                content: format!(
                    "{} export of project {}",
                    request.project_type, request.project_id
                )
                .into_bytes(),
                content_type: None,
                filename: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ProjectId;
    use crate::domain::project::Outline;

    fn token() -> SessionToken {
        SessionToken::new("tok").unwrap()
    }

    #[tokio::test]
    async fn generator_default_follows_outline() {
        let generator = MockContentGenerator::new();
        let request = GenerationRequest {
            project_id: ProjectId::new(1),
            topic: "Plan".into(),
            project_type: ProjectType::Document,
            outline: Outline::from_titles(["A", "B"]).unwrap(),
        };
        let sections = generator.generate(&token(), &request).await.unwrap();
        let titles: Vec<_> = sections.iter().map(Section::title).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn scripted_responses_are_consumed_in_order() {
        let suggester = MockOutlineSuggester::new()
            .with_error(CollaboratorError::transport("down"))
            .with_suggestion(["Only"]);

        assert!(suggester
            .suggest(&token(), "T", ProjectType::SlideDeck)
            .await
            .is_err());
        assert_eq!(
            suggester.suggest(&token(), "T", ProjectType::SlideDeck).await.unwrap(),
            vec!["Only".to_string()]
        );
        assert_eq!(
            suggester.suggest(&token(), "T", ProjectType::SlideDeck).await.unwrap().len(),
            3
        );
        assert_eq!(suggester.calls()[0].project_type, ProjectType::SlideDeck);
    }

    #[tokio::test]
    async fn clones_share_call_log() {
        let exporter = MockDocumentExporter::new();
        let clone = exporter.clone();
        let request = ExportRequest {
            project_type: ProjectType::Document,
            project_id: ProjectId::new(4),
        };
        clone.export(&token(), request).await.unwrap();
        assert_eq!(exporter.calls(), vec![request]);
    }
}

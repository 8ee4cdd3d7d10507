use std::sync::Arc;

use crate::domain::{AssistantReply, UploadedDocument};

use super::assistant_orchestrator::{AssistantOrchestrator, OrchestrationError};
use super::text_extractor::{ExtractionError, TextExtractor};

pub const DEFAULT_UPLOAD_QUESTION: &str = "Summarize this file";

pub fn compose_prompt(question: &str, document_text: &str) -> String {
    format!("{question}\n\n{document_text}")
}

/// Request-in, reply-out composition of extraction and orchestration.
pub struct AnswerService<O>
where
    O: AssistantOrchestrator + ?Sized,
{
    extractor: Arc<TextExtractor>,
    orchestrator: Arc<O>,
}

impl<O> AnswerService<O>
where
    O: AssistantOrchestrator + ?Sized,
{
    pub fn new(extractor: Arc<TextExtractor>, orchestrator: Arc<O>) -> Self {
        Self {
            extractor,
            orchestrator,
        }
    }

    #[tracing::instrument(skip(self, message), fields(strategy = self.orchestrator.strategy()))]
    pub async fn answer_message(&self, message: &str) -> Result<AssistantReply, AnswerError> {
        let reply = self.orchestrator.run(message).await?;
        Ok(reply)
    }

    /// Blank or missing questions fall back to [`DEFAULT_UPLOAD_QUESTION`].
    #[tracing::instrument(
        skip(self, document, question),
        fields(strategy = self.orchestrator.strategy(), declared_name = %document.declared_name)
    )]
    pub async fn answer_document(
        &self,
        document: &UploadedDocument,
        question: Option<&str>,
    ) -> Result<AssistantReply, AnswerError> {
        let extraction = self.extractor.extract(document).await?;

        let question = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_UPLOAD_QUESTION);

        tracing::debug!(
            source_method = %extraction.source_method(),
            "Composing prompt from extracted text"
        );

        let prompt = compose_prompt(question, extraction.text());
        let reply = self.orchestrator.run(&prompt).await?;
        Ok(reply)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    #[error("no text found: {0}")]
    NoTextFound(String),
    #[error("remote error: {0}")]
    RemoteError(String),
    #[error("run failed: {0}")]
    RunFailed(String),
    #[error("timed out: {0}")]
    Timeout(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AnswerError {
    /// Stable identifier surfaced to HTTP clients.
    pub fn code(&self) -> &'static str {
        match self {
            AnswerError::UnsupportedInput(_) => "unsupported_input",
            AnswerError::NoTextFound(_) => "no_text_found",
            AnswerError::RemoteError(_) => "remote_error",
            AnswerError::RunFailed(_) => "run_failed",
            AnswerError::Timeout(_) => "timeout",
            AnswerError::InternalError(_) => "internal_error",
        }
    }
}

impl From<ExtractionError> for AnswerError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedInput(reason) => AnswerError::UnsupportedInput(reason),
            ExtractionError::NoTextFound(name) => AnswerError::NoTextFound(name),
            ExtractionError::RecognitionFailed(_) => AnswerError::InternalError(err.to_string()),
        }
    }
}

impl From<OrchestrationError> for AnswerError {
    fn from(err: OrchestrationError) -> Self {
        match err {
            OrchestrationError::RemoteError(reason) => AnswerError::RemoteError(reason),
            OrchestrationError::RunFailed(reason) => AnswerError::RunFailed(reason),
            OrchestrationError::Timeout { .. } => AnswerError::Timeout(err.to_string()),
            OrchestrationError::Internal(reason) => AnswerError::InternalError(reason),
        }
    }
}

use async_trait::async_trait;

/// Stateless single-call completion.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("completion returned no choices")]
    EmptyCompletion,
}

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AssistantBackendError, LlmClientError};
use crate::domain::AssistantReply;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 120;

/// Turns a prompt into an assistant reply. Strategies differ in how they talk
/// to the remote service, not in what the caller sees.
#[async_trait]
pub trait AssistantOrchestrator: Send + Sync {
    async fn run(&self, prompt: &str) -> Result<AssistantReply, OrchestrationError>;

    fn strategy(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("remote error: {0}")]
    RemoteError(String),
    #[error("run failed: {0}")]
    RunFailed(String),
    #[error("run did not finish after {attempts} status checks")]
    Timeout { attempts: u32 },
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<AssistantBackendError> for OrchestrationError {
    fn from(err: AssistantBackendError) -> Self {
        match err {
            AssistantBackendError::Api { .. } | AssistantBackendError::Transport(_) => {
                Self::RemoteError(err.to_string())
            }
            AssistantBackendError::InvalidResponse(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<LlmClientError> for OrchestrationError {
    fn from(err: LlmClientError) -> Self {
        match err {
            LlmClientError::ApiRequestFailed(_) | LlmClientError::RateLimited => {
                Self::RemoteError(err.to_string())
            }
            LlmClientError::EmptyCompletion => Self::RunFailed(err.to_string()),
            LlmClientError::InvalidResponse(_) => Self::Internal(err.to_string()),
        }
    }
}

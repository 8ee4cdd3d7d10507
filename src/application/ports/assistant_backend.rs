use async_trait::async_trait;

use crate::domain::{ConversationRun, RunId, ThreadId, ThreadMessage};

/// Remote capability set behind the thread/run protocol. Any service with
/// equivalent create/poll/fetch semantics can sit behind it.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    async fn create_thread(&self) -> Result<ThreadId, AssistantBackendError>;

    async fn append_user_message(
        &self,
        thread_id: &ThreadId,
        text: &str,
    ) -> Result<(), AssistantBackendError>;

    async fn start_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &str,
    ) -> Result<ConversationRun, AssistantBackendError>;

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<ConversationRun, AssistantBackendError>;

    /// Messages on the thread in the order they were appended.
    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantBackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantBackendError {
    #[error("remote api returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

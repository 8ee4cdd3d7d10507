use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::AssistantBackend;
use crate::domain::{AssistantReply, ConversationRun, RunStatus, latest_assistant_message};

use super::assistant_orchestrator::{AssistantOrchestrator, OrchestrationError, PollPolicy};

/// Drives create thread → append message → start run → poll → list messages.
/// Every call gets a fresh thread; nothing is reused between requests.
pub struct ThreadRunOrchestrator<B>
where
    B: AssistantBackend + ?Sized,
{
    backend: Arc<B>,
    assistant_id: String,
    poll_policy: PollPolicy,
}

impl<B> ThreadRunOrchestrator<B>
where
    B: AssistantBackend + ?Sized,
{
    pub fn new(backend: Arc<B>, assistant_id: String, poll_policy: PollPolicy) -> Self {
        Self {
            backend,
            assistant_id,
            poll_policy,
        }
    }

    /// Polls until the run reaches a terminal status. Performs at most
    /// `max_attempts` status checks; the first check is immediate.
    async fn await_terminal(
        &self,
        mut run: ConversationRun,
    ) -> Result<ConversationRun, OrchestrationError> {
        let mut attempts = 0;

        loop {
            if run.is_terminal() {
                tracing::debug!(attempts, status = %run.status, "Run reached terminal status");
                return Ok(run);
            }

            if attempts >= self.poll_policy.max_attempts {
                tracing::warn!(
                    attempts,
                    run_id = %run.run_id,
                    status = %run.status,
                    "Run poll ceiling reached"
                );
                return Err(OrchestrationError::Timeout { attempts });
            }

            if attempts > 0 {
                tokio::time::sleep(self.poll_policy.interval).await;
            }

            run = self
                .backend
                .retrieve_run(&run.thread_id, &run.run_id)
                .await?;
            attempts += 1;

            if run.status == RunStatus::Unknown {
                tracing::warn!(attempt = attempts, "Remote reported an unrecognised run status");
            } else {
                tracing::trace!(attempt = attempts, status = %run.status, "Polled run");
            }
        }
    }
}

#[async_trait]
impl<B> AssistantOrchestrator for ThreadRunOrchestrator<B>
where
    B: AssistantBackend + ?Sized,
{
    #[tracing::instrument(
        skip(self, prompt),
        fields(assistant_id = %self.assistant_id, prompt_chars = prompt.chars().count())
    )]
    async fn run(&self, prompt: &str) -> Result<AssistantReply, OrchestrationError> {
        let thread_id = self.backend.create_thread().await?;
        self.backend.append_user_message(&thread_id, prompt).await?;

        let run = self.backend.start_run(&thread_id, &self.assistant_id).await?;
        tracing::debug!(thread_id = %thread_id, run_id = %run.run_id, "Run started");

        let run = self.await_terminal(run).await?;
        if !run.status.is_success() {
            return Err(OrchestrationError::RunFailed(run.failure_reason()));
        }

        let messages = self.backend.list_messages(&thread_id).await?;
        let reply = latest_assistant_message(&messages)
            .ok_or_else(|| {
                OrchestrationError::RunFailed(format!(
                    "run {} completed without an assistant message",
                    run.run_id
                ))
            })?
            .text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                OrchestrationError::RunFailed(format!(
                    "assistant message for run {} has no text content",
                    run.run_id
                ))
            })?;

        tracing::info!(
            run_id = %run.run_id,
            reply_chars = reply.chars().count(),
            "Assistant run completed"
        );

        Ok(AssistantReply::new(reply.to_string()))
    }

    fn strategy(&self) -> &'static str {
        "thread_run"
    }
}

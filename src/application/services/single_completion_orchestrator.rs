use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::LlmClient;
use crate::domain::AssistantReply;

use super::assistant_orchestrator::{AssistantOrchestrator, OrchestrationError};

pub const DEFAULT_SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant. Answer the user's request clearly and concisely.";

/// One request, one response. No thread, no polling.
pub struct SingleCompletionOrchestrator<L>
where
    L: LlmClient + ?Sized,
{
    client: Arc<L>,
    system_instruction: String,
}

impl<L> SingleCompletionOrchestrator<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(client: Arc<L>, system_instruction: String) -> Self {
        Self {
            client,
            system_instruction,
        }
    }
}

#[async_trait]
impl<L> AssistantOrchestrator for SingleCompletionOrchestrator<L>
where
    L: LlmClient + ?Sized,
{
    #[tracing::instrument(skip(self, prompt), fields(prompt_chars = prompt.chars().count()))]
    async fn run(&self, prompt: &str) -> Result<AssistantReply, OrchestrationError> {
        let text = self
            .client
            .complete(&self.system_instruction, prompt)
            .await?;

        let text = text.trim();
        if text.is_empty() {
            return Err(OrchestrationError::RunFailed(
                "completion returned empty text".to_string(),
            ));
        }

        Ok(AssistantReply::new(text.to_string()))
    }

    fn strategy(&self) -> &'static str {
        "single_completion"
    }
}

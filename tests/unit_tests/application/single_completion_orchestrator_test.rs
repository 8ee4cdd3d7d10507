use std::sync::{Arc, Mutex};

use parley::application::ports::{LlmClient, LlmClientError};
use parley::application::services::{
    AssistantOrchestrator, OrchestrationError, SingleCompletionOrchestrator,
};

struct StubLlmClient {
    response: fn() -> Result<String, LlmClientError>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StubLlmClient {
    fn new(response: fn() -> Result<String, LlmClientError>) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for StubLlmClient {
    async fn complete(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, LlmClientError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_instruction.to_string(), prompt.to_string()));
        (self.response)()
    }
}

#[tokio::test]
async fn given_completion_when_running_then_returns_trimmed_reply() {
    let client = StubLlmClient::new(|| Ok("  Hi there \n".to_string()));
    let orchestrator = SingleCompletionOrchestrator::new(client.clone(), "Be brief.".to_string());

    let reply = orchestrator.run("Hello").await.unwrap();

    assert_eq!(reply.text, "Hi there");
    assert_eq!(
        *client.calls.lock().unwrap(),
        vec![("Be brief.".to_string(), "Hello".to_string())]
    );
    assert_eq!(orchestrator.strategy(), "single_completion");
}

#[tokio::test]
async fn given_blank_completion_when_running_then_returns_run_failed() {
    let client = StubLlmClient::new(|| Ok("   ".to_string()));
    let orchestrator = SingleCompletionOrchestrator::new(client, String::new());

    let result = orchestrator.run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::RunFailed(_))));
}

#[tokio::test]
async fn given_no_choices_when_running_then_returns_run_failed() {
    let client = StubLlmClient::new(|| Err(LlmClientError::EmptyCompletion));
    let orchestrator = SingleCompletionOrchestrator::new(client, String::new());

    let result = orchestrator.run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::RunFailed(_))));
}

#[tokio::test]
async fn given_rate_limit_when_running_then_returns_remote_error() {
    let client = StubLlmClient::new(|| Err(LlmClientError::RateLimited));
    let orchestrator = SingleCompletionOrchestrator::new(client, String::new());

    let result = orchestrator.run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::RemoteError(_))));
}

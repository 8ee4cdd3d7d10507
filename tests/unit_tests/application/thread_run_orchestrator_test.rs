use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use parley::application::ports::{AssistantBackend, AssistantBackendError};
use parley::application::services::{
    AssistantOrchestrator, OrchestrationError, PollPolicy, ThreadRunOrchestrator,
};
use parley::domain::{
    ConversationRun, MessageRole, RunError, RunId, RunStatus, ThreadId, ThreadMessage,
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Replays a fixed sequence of run statuses; the last one repeats forever.
struct ScriptedBackend {
    statuses: Mutex<VecDeque<RunStatus>>,
    last_error: Option<RunError>,
    messages: Vec<ThreadMessage>,
    polls: AtomicU32,
    appended: Mutex<Vec<String>>,
    fail_thread_creation: bool,
}

impl ScriptedBackend {
    fn new(statuses: &[RunStatus], messages: Vec<ThreadMessage>) -> Self {
        Self {
            statuses: Mutex::new(statuses.iter().copied().collect()),
            last_error: None,
            messages,
            polls: AtomicU32::new(0),
            appended: Mutex::new(Vec::new()),
            fail_thread_creation: false,
        }
    }

    fn next_status(&self) -> RunStatus {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses.front().copied().unwrap_or(RunStatus::InProgress)
        }
    }
}

#[async_trait::async_trait]
impl AssistantBackend for ScriptedBackend {
    async fn create_thread(&self) -> Result<ThreadId, AssistantBackendError> {
        if self.fail_thread_creation {
            return Err(AssistantBackendError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            });
        }
        Ok(ThreadId::new("thread_abc"))
    }

    async fn append_user_message(
        &self,
        _thread_id: &ThreadId,
        text: &str,
    ) -> Result<(), AssistantBackendError> {
        self.appended.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn start_run(
        &self,
        thread_id: &ThreadId,
        _assistant_id: &str,
    ) -> Result<ConversationRun, AssistantBackendError> {
        Ok(ConversationRun::new(
            thread_id.clone(),
            RunId::new("run_xyz"),
            RunStatus::Queued,
        ))
    }

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<ConversationRun, AssistantBackendError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let mut run = ConversationRun::new(thread_id.clone(), run_id.clone(), self.next_status());
        run.last_error = self.last_error.clone();
        Ok(run)
    }

    async fn list_messages(
        &self,
        _thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantBackendError> {
        Ok(self.messages.clone())
    }
}

fn message(id: &str, role: MessageRole, created_at: i64, text: Option<&str>) -> ThreadMessage {
    ThreadMessage {
        id: id.to_string(),
        role,
        created_at,
        text: text.map(String::from),
    }
}

fn conversation() -> Vec<ThreadMessage> {
    vec![
        message("msg_1", MessageRole::User, 100, Some("Hello")),
        message("msg_2", MessageRole::Assistant, 101, Some("  Hi there  ")),
    ]
}

fn orchestrator(backend: Arc<ScriptedBackend>, max_attempts: u32) -> ThreadRunOrchestrator<ScriptedBackend> {
    ThreadRunOrchestrator::new(
        backend,
        "asst_123".to_string(),
        PollPolicy {
            interval: POLL_INTERVAL,
            max_attempts,
        },
    )
}

#[tokio::test(start_paused = true)]
async fn given_run_that_completes_when_running_then_returns_trimmed_reply() {
    let backend = Arc::new(ScriptedBackend::new(
        &[RunStatus::InProgress, RunStatus::InProgress, RunStatus::Completed],
        conversation(),
    ));
    let started = tokio::time::Instant::now();

    let reply = orchestrator(backend.clone(), 10).run("Hello").await.unwrap();

    assert_eq!(reply.text, "Hi there");
    assert_eq!(backend.polls.load(Ordering::SeqCst), 3);
    assert_eq!(*backend.appended.lock().unwrap(), vec!["Hello".to_string()]);
    assert!(started.elapsed() >= POLL_INTERVAL * 2);
}

#[tokio::test(start_paused = true)]
async fn given_run_that_never_finishes_when_running_then_times_out_after_max_attempts() {
    let backend = Arc::new(ScriptedBackend::new(&[RunStatus::InProgress], conversation()));

    let result = orchestrator(backend.clone(), 4).run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::Timeout { attempts: 4 })));
    assert_eq!(backend.polls.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn given_unknown_status_when_polling_then_keeps_polling() {
    let backend = Arc::new(ScriptedBackend::new(
        &[RunStatus::Unknown, RunStatus::Completed],
        conversation(),
    ));

    let reply = orchestrator(backend.clone(), 5).run("Hello").await.unwrap();

    assert_eq!(reply.text, "Hi there");
    assert_eq!(backend.polls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn given_failed_run_when_running_then_returns_run_failed_with_reason() {
    let mut backend = ScriptedBackend::new(&[RunStatus::Failed], conversation());
    backend.last_error = Some(RunError {
        code: "server_error".to_string(),
        message: "Something went wrong".to_string(),
    });

    let result = orchestrator(Arc::new(backend), 5).run("Hello").await;

    match result {
        Err(OrchestrationError::RunFailed(reason)) => {
            assert!(reason.contains("Something went wrong"));
            assert!(reason.contains("server_error"));
        }
        other => panic!("expected RunFailed, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn given_non_success_terminal_statuses_when_running_then_returns_run_failed() {
    for status in [
        RunStatus::Expired,
        RunStatus::Cancelled,
        RunStatus::Incomplete,
        RunStatus::RequiresAction,
    ] {
        let backend = Arc::new(ScriptedBackend::new(&[status], conversation()));

        let result = orchestrator(backend, 5).run("Hello").await;

        assert!(
            matches!(result, Err(OrchestrationError::RunFailed(_))),
            "{status} should fail the run"
        );
    }
}

#[tokio::test(start_paused = true)]
async fn given_several_assistant_messages_when_completed_then_returns_latest() {
    let messages = vec![
        message("msg_1", MessageRole::User, 100, Some("Hello")),
        message("msg_2", MessageRole::Assistant, 101, Some("Earlier answer")),
        message("msg_3", MessageRole::Assistant, 150, Some("Final answer")),
    ];
    let backend = Arc::new(ScriptedBackend::new(&[RunStatus::Completed], messages));

    let reply = orchestrator(backend, 5).run("Hello").await.unwrap();

    assert_eq!(reply.text, "Final answer");
}

#[tokio::test(start_paused = true)]
async fn given_completed_run_without_assistant_message_when_running_then_returns_run_failed() {
    let messages = vec![message("msg_1", MessageRole::User, 100, Some("Hello"))];
    let backend = Arc::new(ScriptedBackend::new(&[RunStatus::Completed], messages));

    let result = orchestrator(backend, 5).run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::RunFailed(_))));
}

#[tokio::test(start_paused = true)]
async fn given_assistant_message_without_text_when_running_then_returns_run_failed() {
    let messages = vec![message("msg_2", MessageRole::Assistant, 101, None)];
    let backend = Arc::new(ScriptedBackend::new(&[RunStatus::Completed], messages));

    let result = orchestrator(backend, 5).run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::RunFailed(_))));
}

#[tokio::test(start_paused = true)]
async fn given_rejected_credentials_when_running_then_returns_remote_error() {
    let mut backend = ScriptedBackend::new(&[RunStatus::Completed], conversation());
    backend.fail_thread_creation = true;

    let result = orchestrator(Arc::new(backend), 5).run("Hello").await;

    assert!(matches!(result, Err(OrchestrationError::RemoteError(_))));
}

#[test]
fn given_default_policy_when_created_then_uses_one_second_and_120_attempts() {
    let policy = PollPolicy::default();

    assert_eq!(policy.interval, Duration::from_secs(1));
    assert_eq!(policy.max_attempts, 120);
}

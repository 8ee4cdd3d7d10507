use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::application::ports::{AssistantBackend, AssistantBackendError};
use crate::domain::{
    ConversationRun, MessageRole, RunError, RunId, RunStatus, ThreadId, ThreadMessage,
};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const ASSISTANTS_BETA_HEADER: &str = "OpenAI-Beta";
const ASSISTANTS_BETA_VALUE: &str = "assistants=v2";
const MESSAGE_PAGE_LIMIT: usize = 100;
const MAX_MESSAGE_PAGES: usize = 10;

/// Assistants v2 REST client. One instance is shared by every request.
pub struct OpenAiAssistantsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiAssistantsClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        request_timeout: Duration,
    ) -> Result<Self, AssistantBackendError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AssistantBackendError::Transport(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header(ASSISTANTS_BETA_HEADER, ASSISTANTS_BETA_VALUE)
    }

    /// Any non-success status or `error` object in the body aborts the call.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AssistantBackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| AssistantBackendError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| AssistantBackendError::Transport(e.to_string()))?;

        let error_payload = serde_json::from_slice::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.error);

        if !status.is_success() {
            let message = error_payload
                .map(|e| e.message)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).trim().to_string());
            return Err(AssistantBackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if let Some(error) = error_payload {
            return Err(AssistantBackendError::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                raw_response = %String::from_utf8_lossy(&body),
                "Failed to parse assistants API response"
            );
            AssistantBackendError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl AssistantBackend for OpenAiAssistantsClient {
    async fn create_thread(&self) -> Result<ThreadId, AssistantBackendError> {
        let thread: ThreadObject = self
            .send(
                self.request(Method::POST, "/threads")
                    .json(&serde_json::json!({})),
            )
            .await?;
        Ok(ThreadId::new(thread.id))
    }

    async fn append_user_message(
        &self,
        thread_id: &ThreadId,
        text: &str,
    ) -> Result<(), AssistantBackendError> {
        let _: serde_json::Value = self
            .send(
                self.request(Method::POST, &format!("/threads/{thread_id}/messages"))
                    .json(&serde_json::json!({ "role": "user", "content": text })),
            )
            .await?;
        Ok(())
    }

    async fn start_run(
        &self,
        thread_id: &ThreadId,
        assistant_id: &str,
    ) -> Result<ConversationRun, AssistantBackendError> {
        let run: RunObject = self
            .send(
                self.request(Method::POST, &format!("/threads/{thread_id}/runs"))
                    .json(&serde_json::json!({ "assistant_id": assistant_id })),
            )
            .await?;
        Ok(run.into_domain(thread_id))
    }

    async fn retrieve_run(
        &self,
        thread_id: &ThreadId,
        run_id: &RunId,
    ) -> Result<ConversationRun, AssistantBackendError> {
        let run: RunObject = self
            .send(self.request(Method::GET, &format!("/threads/{thread_id}/runs/{run_id}")))
            .await?;
        Ok(run.into_domain(thread_id))
    }

    async fn list_messages(
        &self,
        thread_id: &ThreadId,
    ) -> Result<Vec<ThreadMessage>, AssistantBackendError> {
        let mut messages = Vec::new();
        let mut after: Option<String> = None;

        for _ in 0..MAX_MESSAGE_PAGES {
            let mut path =
                format!("/threads/{thread_id}/messages?order=asc&limit={MESSAGE_PAGE_LIMIT}");
            if let Some(cursor) = &after {
                path.push_str(&format!("&after={cursor}"));
            }

            let page: MessageList = self.send(self.request(Method::GET, &path)).await?;
            let has_more = page.has_more;
            after = page.data.last().map(|m| m.id.clone());
            messages.extend(page.data.into_iter().map(MessageObject::into_domain));

            if !has_more || after.is_none() {
                return Ok(messages);
            }
        }

        tracing::warn!(
            thread_id = %thread_id,
            fetched = messages.len(),
            "Message listing stopped at page limit"
        );
        Ok(messages)
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[derive(Deserialize)]
struct ThreadObject {
    id: String,
}

#[derive(Deserialize)]
struct RunObject {
    id: String,
    status: RunStatus,
    #[serde(default)]
    last_error: Option<LastError>,
}

#[derive(Deserialize)]
struct LastError {
    #[serde(default)]
    code: String,
    message: String,
}

impl RunObject {
    fn into_domain(self, thread_id: &ThreadId) -> ConversationRun {
        let mut run = ConversationRun::new(thread_id.clone(), RunId::new(self.id), self.status);
        run.last_error = self.last_error.map(|e| RunError {
            code: e.code,
            message: e.message,
        });
        run
    }
}

#[derive(Deserialize)]
struct MessageList {
    data: Vec<MessageObject>,
    #[serde(default)]
    has_more: bool,
}

#[derive(Deserialize)]
struct MessageObject {
    id: String,
    role: MessageRole,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: TextPayload },
    #[serde(other)]
    Other,
}

#[derive(Deserialize)]
struct TextPayload {
    value: String,
}

impl MessageObject {
    fn into_domain(self) -> ThreadMessage {
        let text = self.content.into_iter().find_map(|part| match part {
            ContentPart::Text { text } => Some(text.value),
            ContentPart::Other => None,
        });
        ThreadMessage {
            id: self.id,
            role: self.role,
            created_at: self.created_at,
            text,
        }
    }
}

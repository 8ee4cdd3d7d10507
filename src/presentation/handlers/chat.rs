use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::AssistantOrchestrator;
use crate::infrastructure::observability::{RequestId, sanitize_prompt};
use crate::presentation::state::AppState;

use super::error_response::{pipeline_failure, request_failure};

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}

#[tracing::instrument(skip(state, request_id, payload))]
pub async fn chat_handler<O>(
    State(state): State<AppState<O>>,
    request_id: RequestId,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse
where
    O: AssistantOrchestrator + ?Sized + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed chat request");
            return request_failure(rejection.status(), rejection.body_text());
        }
    };

    if request.message.trim().is_empty() {
        tracing::warn!("Chat request with empty message");
        return request_failure(StatusCode::BAD_REQUEST, "No message provided".to_string());
    }

    tracing::debug!(message = %sanitize_prompt(&request.message), "Processing chat message");

    match state.answer_service.answer_message(&request.message).await {
        Ok(reply) => {
            tracing::info!(reply_chars = reply.text.chars().count(), "Chat answered");
            (StatusCode::OK, Json(ReplyResponse { reply: reply.text })).into_response()
        }
        Err(e) => {
            tracing::error!(
                route = "/chat",
                request_id = %request_id.0,
                code = e.code(),
                error = %e,
                "Chat failed"
            );
            pipeline_failure("Chat failed", &e)
        }
    }
}

use axum::Json;
use axum::extract::{Multipart, OriginalUri, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::AssistantOrchestrator;
use crate::infrastructure::observability::{RequestId, sanitize_prompt};
use crate::infrastructure::storage::{StagedUpload, StagingError, UploadStager};
use crate::presentation::state::AppState;

use super::chat::ReplyResponse;
use super::error_response::{pipeline_failure, request_failure};

const FILE_FIELD: &str = "file";
const QUESTION_FIELDS: &[&str] = &["question", "message"];

struct UploadForm {
    staged: Option<StagedUpload>,
    question: Option<String>,
}

#[tracing::instrument(skip_all)]
pub async fn upload_handler<O>(
    State(state): State<AppState<O>>,
    request_id: RequestId,
    OriginalUri(uri): OriginalUri,
    multipart: Multipart,
) -> impl IntoResponse
where
    O: AssistantOrchestrator + ?Sized + 'static,
{
    let route = uri.path().to_string();

    let form = match read_form(&state.upload_stager, multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let Some(mut staged) = form.staged else {
        tracing::warn!("Upload request with no file");
        return request_failure(StatusCode::BAD_REQUEST, "No file uploaded".to_string());
    };

    tracing::debug!(bytes = staged.size_bytes(), "File staged");

    let document = match staged.read_document().await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(route = %route, request_id = %request_id.0, error = %e, "Failed to read staged upload");
            return request_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read uploaded file".to_string(),
            );
        }
    };

    if let Some(question) = form.question.as_deref() {
        tracing::debug!(question = %sanitize_prompt(question), "Processing upload question");
    }

    let result = state
        .answer_service
        .answer_document(&document, form.question.as_deref())
        .await;

    if let Err(e) = staged.discard() {
        tracing::warn!(error = %e, "Failed to remove staged upload");
    }

    match result {
        Ok(reply) => {
            tracing::info!(reply_chars = reply.text.chars().count(), "Upload answered");
            (StatusCode::OK, Json(ReplyResponse { reply: reply.text })).into_response()
        }
        Err(e) => {
            tracing::error!(
                route = %route,
                request_id = %request_id.0,
                code = e.code(),
                error = %e,
                "Upload failed"
            );
            pipeline_failure("Upload failed", &e)
        }
    }
}

/// Spools the file part to disk and collects the optional question. A
/// partially staged file is dropped (and deleted) on any error.
async fn read_form(stager: &UploadStager, mut multipart: Multipart) -> Result<UploadForm, Response> {
    let mut form = UploadForm {
        staged: None,
        question: None,
    };

    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return Err(request_failure(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                ));
            }
        };

        let name = field.name().unwrap_or_default().to_string();

        if name == FILE_FIELD {
            let declared_name = field.file_name().unwrap_or("upload").to_string();
            let media_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();

            tracing::debug!(%declared_name, %media_type, "Receiving file");

            let mut staged = stager
                .begin(declared_name, media_type)
                .map_err(staging_failure)?;

            loop {
                match field.chunk().await {
                    Ok(Some(chunk)) => staged.write_chunk(&chunk).await.map_err(staging_failure)?,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return Err(request_failure(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read file: {}", e),
                        ));
                    }
                }
            }

            form.staged = Some(staged);
        } else if QUESTION_FIELDS.contains(&name.as_str()) {
            match field.text().await {
                Ok(text) if !text.trim().is_empty() => form.question = Some(text),
                Ok(_) => {}
                Err(e) => {
                    return Err(request_failure(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read field {}: {}", name, e),
                    ));
                }
            }
        } else {
            tracing::debug!(field = %name, "Ignoring unknown multipart field");
        }
    }

    Ok(form)
}

fn staging_failure(err: StagingError) -> Response {
    match err {
        StagingError::TooLarge { .. } => {
            tracing::warn!(error = %err, "Upload rejected");
            request_failure(StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
        }
        StagingError::Io(_) => {
            tracing::error!(error = %err, "Failed to stage upload");
            request_failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store uploaded file".to_string(),
            )
        }
    }
}

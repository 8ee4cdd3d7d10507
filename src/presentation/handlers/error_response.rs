use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::AnswerError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Every pipeline failure is a 500 carrying the stable code and the cause.
pub fn pipeline_failure(summary: &str, err: &AnswerError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: summary.to_string(),
            code: Some(err.code()),
            details: Some(err.to_string()),
        }),
    )
        .into_response()
}

pub fn request_failure(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message,
            code: None,
            details: None,
        }),
    )
        .into_response()
}

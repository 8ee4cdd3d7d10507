use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::services::AssistantOrchestrator;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    chat_handler, health_handler, liveness_handler, upload_handler,
};
use crate::presentation::state::AppState;

/// Multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<O>(state: AppState<O>) -> Router
where
    O: AssistantOrchestrator + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = usize::try_from(state.upload_stager.max_bytes())
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(liveness_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler::<O>))
        .route("/upload-pdf", post(upload_handler::<O>))
        .route("/upload", post(upload_handler::<O>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

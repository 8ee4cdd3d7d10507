use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use parley::application::ports::{OpticalRecognizer, RecognitionError};
use parley::domain::{ContentType, ImageFormat};
use parley::infrastructure::ocr::{OCR_PROMPT, VisionModelRecognizer};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

async fn spawn_mock(router: Router) -> (String, oneshot::Sender<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .unwrap();
    });

    (format!("http://{addr}"), shutdown_tx)
}

#[tokio::test]
async fn given_image_when_recognizing_then_sends_data_uri_and_returns_transcription() {
    let router = Router::new().route(
        "/chat/completions",
        post(|Json(body): Json<Value>| async move {
            let content = &body["messages"][0]["content"];
            let url = content[0]["image_url"]["url"].as_str().unwrap_or_default();
            assert!(url.starts_with("data:image/png;base64,"));
            assert_eq!(content[1]["text"], OCR_PROMPT);
            assert_eq!(body["model"], "vision-test");
            Json(json!({
                "choices": [{ "message": { "content": "Receipt total  12.50\n\n\n\nThank you" } }]
            }))
        }),
    );
    let (base_url, shutdown) = spawn_mock(router).await;
    let recognizer = VisionModelRecognizer::new(&base_url, "vision-test", "key").unwrap();

    let text = recognizer
        .recognize(PNG_MAGIC, ContentType::Image(ImageFormat::Png))
        .await
        .unwrap();

    assert_eq!(text, "Receipt total 12.50\n\nThank you");
    shutdown.send(()).ok();
}

#[tokio::test]
async fn given_model_error_when_recognizing_then_returns_api_request_failed() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
    );
    let (base_url, shutdown) = spawn_mock(router).await;
    let recognizer = VisionModelRecognizer::new(&base_url, "vision-test", "key").unwrap();

    let result = recognizer
        .recognize(PNG_MAGIC, ContentType::Image(ImageFormat::Png))
        .await;

    assert!(matches!(result, Err(RecognitionError::ApiRequestFailed(_))));
    shutdown.send(()).ok();
}

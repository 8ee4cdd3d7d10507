use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use parley::infrastructure::observability::{REQUEST_ID_HEADER, RequestId, request_id_middleware};

async fn echo_request_id(request_id: RequestId) -> String {
    request_id.0
}

fn app() -> Router {
    Router::new()
        .route("/", get(echo_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_request_id_header_constant_when_accessed_then_is_lowercase() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[tokio::test]
async fn given_incoming_request_id_when_handled_then_extractor_and_response_see_it() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "caller-supplied")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(REQUEST_ID_HEADER).unwrap(),
        "caller-supplied"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"caller-supplied");
}

#[tokio::test]
async fn given_empty_request_id_header_when_handled_then_mints_a_new_one() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let minted = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(minted.len(), 36);
}

#[tokio::test]
async fn given_no_middleware_when_extracting_then_falls_back_to_unknown() {
    let response = Router::new()
        .route("/", get(echo_request_id))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"unknown");
}

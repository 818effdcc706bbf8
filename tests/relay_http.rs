//! HTTP-surface tests for the assembled relay router: statuses, headers,
//! and the bundle fallback, driven with `tower::ServiceExt::oneshot`.

#![cfg(not(target_arch = "wasm32"))]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use isa_portfolio::relay::{self, AppState, Mailer, RelayConfig};
use isa_portfolio::SubmitResponse;
use tempfile::TempDir;
use tower::ServiceExt;

const PEER: &str = "203.0.113.7:4444";

struct Fixture {
    app: Router,
    // Keeps the rate and static directories alive for the test's duration.
    _dirs: (TempDir, TempDir),
}

fn fixture() -> Fixture {
    let rate_dir = TempDir::new().unwrap();
    let static_dir = TempDir::new().unwrap();
    std::fs::write(static_dir.path().join("index.html"), "<!doctype html>portfolio").unwrap();

    let (mailer, _outbox) = Mailer::capture();
    let config = RelayConfig {
        rate_dir: rate_dir.path().to_path_buf(),
        static_dir: static_dir.path().to_path_buf(),
        contact_email: Some("inbox@example.com".into()),
        allowed_origin: "https://example.org".into(),
        ..RelayConfig::default()
    };
    let app = relay::router(Arc::new(AppState::new(config, mailer))).unwrap();
    Fixture {
        app,
        _dirs: (rate_dir, static_dir),
    }
}

fn contact_request(method: Method, body: &str) -> Request<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    // oneshot never opens a socket, so the peer address the extractor
    // would normally see is injected as an extension.
    request
        .extensions_mut()
        .insert(ConnectInfo(PEER.parse::<SocketAddr>().unwrap()));
    request
}

async fn body_json(response: axum::response::Response) -> SubmitResponse {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

const VALID_FORM: &str = "name=Ada&email=ada%40example.com&message=Hello+there&website=";

#[tokio::test]
async fn valid_post_answers_success_json() {
    let fx = fixture();
    let response = fx
        .app
        .oneshot(contact_request(Method::POST, VALID_FORM))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://example.org")
    );
    assert_eq!(body_json(response).await, SubmitResponse::ok());
}

#[tokio::test]
async fn wrong_method_answers_405_with_json_body() {
    let fx = fixture();
    let response = fx
        .app
        .oneshot(contact_request(Method::GET, ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert!(!body.success);
    assert_eq!(body.error.as_deref(), Some("Method not allowed"));
}

#[tokio::test]
async fn preflight_answers_204_with_cors_grants() {
    let fx = fixture();
    let response = fx
        .app
        .oneshot(contact_request(Method::OPTIONS, ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://example.org")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok()),
        Some("POST")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .and_then(|v| v.to_str().ok()),
        Some("Content-Type")
    );
}

#[tokio::test]
async fn invalid_email_answers_400() {
    let fx = fixture();
    let response = fx
        .app
        .oneshot(contact_request(
            Method::POST,
            "name=Ada&email=not-an-email&message=Hi&website=",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body.error.as_deref(), Some("Invalid email address"));
}

#[tokio::test]
async fn sixth_post_answers_429_with_retry_after() {
    let fx = fixture();
    for _ in 0..5 {
        let response = fx
            .app
            .clone()
            .oneshot(contact_request(Method::POST, VALID_FORM))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = fx
        .app
        .oneshot(contact_request(Method::POST, VALID_FORM))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let retry: i64 = response
        .headers()
        .get("Retry-After")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap();
    assert!(retry > 0 && retry <= 3600);
    let body = body_json(response).await;
    assert_eq!(
        body.error.as_deref(),
        Some("Too many requests. Please try again later.")
    );
}

#[tokio::test]
async fn health_reports_the_service() {
    let fx = fixture();
    let response = fx
        .app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "isa-portfolio");
}

#[tokio::test]
async fn unknown_paths_fall_back_to_the_bundle_index() {
    let fx = fixture();
    let response = fx
        .app
        .oneshot(
            Request::builder()
                .uri("/projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("portfolio"));
}

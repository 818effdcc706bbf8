//! End-to-end tests for the contact pipeline, driven through the same
//! `process` function the HTTP handler delegates to, with a capturing
//! mailer standing in for SMTP.

#![cfg(not(target_arch = "wasm32"))]

use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use isa_portfolio::contact::FieldError;
use isa_portfolio::relay::handlers::{process, AppState, RelayError};
use isa_portfolio::relay::{Mailer, RelayConfig};
use isa_portfolio::ContactSubmission;
use lettre::Message;
use tempfile::TempDir;

const CALLER: &str = "203.0.113.7";

fn relay_state(dir: &TempDir) -> (AppState, Arc<Mutex<Vec<Message>>>) {
    let (mailer, outbox) = Mailer::capture();
    let config = RelayConfig {
        rate_dir: dir.path().to_path_buf(),
        contact_email: Some("inbox@example.com".into()),
        ..RelayConfig::default()
    };
    (AppState::new(config, mailer), outbox)
}

fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
    ContactSubmission {
        name: name.into(),
        email: email.into(),
        message: message.into(),
        website: String::new(),
    }
}

#[tokio::test]
async fn valid_submission_reaches_the_outbox() {
    let dir = TempDir::new().unwrap();
    let (state, outbox) = relay_state(&dir);

    let response = process(&state, submission("Ada", "ada@example.com", "Hello there"), CALLER)
        .await
        .unwrap();
    assert!(response.success);
    assert!(response.error.is_none());

    let sent = outbox.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let raw = String::from_utf8(sent[0].formatted()).unwrap();
    assert!(raw.contains("Subject: Portfolio Contact: Ada"));
    assert!(raw.contains("Name: Ada"));
    assert!(raw.contains("ada@example.com"));
    assert!(raw.contains("Hello there"));
}

#[tokio::test]
async fn markup_and_line_breaks_never_reach_the_message() {
    let dir = TempDir::new().unwrap();
    let (state, outbox) = relay_state(&dir);

    let form = submission(
        "<b>Ada</b>\r\nBcc: spy@example.com",
        "ada@example.com",
        "Hi",
    );
    process(&state, form, CALLER).await.unwrap();

    let sent = outbox.lock().unwrap();
    let raw = String::from_utf8(sent[0].formatted()).unwrap();
    assert!(raw.contains("Name: AdaBcc: spy@example.com"));
    assert!(!raw.contains("<b>"));
    assert!(!raw.contains("\nBcc:"));
}

#[tokio::test]
async fn honeypot_submissions_report_success_and_cost_nothing() {
    let dir = TempDir::new().unwrap();
    let (state, outbox) = relay_state(&dir);

    let mut bot = submission("Bot", "bot@example.com", "Buy things");
    bot.website = "https://spam.example".into();
    let response = process(&state, bot, CALLER).await.unwrap();
    assert!(response.success);
    assert!(outbox.lock().unwrap().is_empty());

    // The trap consumed no quota: a full window of real submissions still fits.
    for i in 0..5 {
        let form = submission("Ada", "ada@example.com", &format!("message {i}"));
        assert!(process(&state, form, CALLER).await.is_ok());
    }
    assert_eq!(outbox.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let dir = TempDir::new().unwrap();
    let (state, outbox) = relay_state(&dir);

    let err = process(&state, submission("Ada", "ada@example.com", "   "), CALLER)
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::Field(FieldError::MissingFields)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.to_string(), "All fields are required");
    assert!(outbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_email_is_rejected_without_spending_quota() {
    let dir = TempDir::new().unwrap();
    let (state, _outbox) = relay_state(&dir);

    for _ in 0..6 {
        let err = process(&state, submission("Ada", "not-an-email", "Hi"), CALLER)
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Field(FieldError::InvalidEmail)));
        assert_eq!(err.to_string(), "Invalid email address");
    }

    // Validation runs before the limiter, so a valid submission still lands.
    let form = submission("Ada", "ada@example.com", "Hi");
    assert!(process(&state, form, CALLER).await.is_ok());
}

#[tokio::test]
async fn sixth_submission_in_the_window_is_limited() {
    let dir = TempDir::new().unwrap();
    let (state, outbox) = relay_state(&dir);

    for i in 0..5 {
        let form = submission("Ada", "ada@example.com", &format!("message {i}"));
        assert!(process(&state, form, CALLER).await.is_ok());
    }

    let err = process(&state, submission("Ada", "ada@example.com", "one more"), CALLER)
        .await
        .unwrap_err();
    let retry = match &err {
        RelayError::RateLimited { retry_after_secs } => *retry_after_secs,
        other => panic!("expected rate limit, got {other:?}"),
    };
    assert!(retry > 0 && retry <= 3600);
    assert_eq!(err.to_string(), "Too many requests. Please try again later.");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("Retry-After"));
    assert_eq!(outbox.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn missing_recipient_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    let (mailer, outbox) = Mailer::capture();
    let config = RelayConfig {
        rate_dir: dir.path().to_path_buf(),
        contact_email: None,
        ..RelayConfig::default()
    };
    let state = AppState::new(config, mailer);

    let err = process(&state, submission("Ada", "ada@example.com", "Hi"), CALLER)
        .await
        .unwrap_err();
    assert!(matches!(err, RelayError::NoRecipient));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.to_string(), "Mail configuration error");
    assert!(outbox.lock().unwrap().is_empty());
}

#[tokio::test]
async fn separate_callers_have_separate_budgets() {
    let dir = TempDir::new().unwrap();
    let (state, _outbox) = relay_state(&dir);

    for i in 0..5 {
        let form = submission("Ada", "ada@example.com", &format!("message {i}"));
        assert!(process(&state, form, CALLER).await.is_ok());
    }
    assert!(matches!(
        process(&state, submission("Ada", "ada@example.com", "over"), CALLER).await,
        Err(RelayError::RateLimited { .. })
    ));

    let form = submission("Grace", "grace@example.com", "Hello from elsewhere");
    assert!(process(&state, form, "198.51.100.20").await.is_ok());
}

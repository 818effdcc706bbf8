//! HTTP handlers for the contact API.
//!
//! The submit pipeline mirrors the order the form contract promises:
//! honeypot first (bots get a cheerful success and cost nobody quota),
//! then sanitation + validation, then the rate check, then mail. The
//! pipeline itself is a plain async function over [`AppState`] so the
//! integration tests can drive it without a socket.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::contact::{ContactSubmission, FieldError, SubmitResponse};
use crate::relay::mailer::{self, MailError, Mailer};
use crate::relay::ratelimit::{RateDecision, RateStore};
use crate::relay::RelayConfig;

/// Shared application state.
pub struct AppState {
    pub config: RelayConfig,
    pub store: RateStore,
    pub mailer: Mailer,
}

impl AppState {
    pub fn new(config: RelayConfig, mailer: Mailer) -> Self {
        let store = RateStore::new(
            config.rate_dir.clone(),
            config.rate_limit,
            config.rate_window_secs,
        );
        Self {
            config,
            store,
            mailer,
        }
    }
}

/// Everything that turns a submission into a non-success reply. Display
/// strings are the wire `error` values.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Field(#[from] FieldError),
    #[error("Too many requests. Please try again later.")]
    RateLimited { retry_after_secs: i64 },
    #[error("Mail configuration error")]
    NoRecipient,
    #[error("Failed to send email")]
    Mail(#[source] MailError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Field(_) => StatusCode::BAD_REQUEST,
            RelayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            RelayError::NoRecipient | RelayError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(SubmitResponse::err(self.to_string()));
        match self {
            RelayError::RateLimited { retry_after_secs } => {
                (status, [("Retry-After", retry_after_secs.to_string())], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}

/// `POST /api/contact`
pub async fn submit(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<ContactSubmission>,
) -> Result<Json<SubmitResponse>, RelayError> {
    let caller = caller_addr(&state.config, &headers, addr);
    process(&state, form, &caller).await.map(Json)
}

/// The submission pipeline, separated from the extractors.
pub async fn process(
    state: &AppState,
    form: ContactSubmission,
    caller: &str,
) -> Result<SubmitResponse, RelayError> {
    if form.is_honeypot() {
        info!(caller, "honeypot tripped, reporting success without sending");
        return Ok(SubmitResponse::ok());
    }

    let clean = form.validate()?;

    match state.store.check(caller) {
        RateDecision::Limited { retry_after_secs } => {
            info!(caller, retry_after_secs, "submission rate limited");
            return Err(RelayError::RateLimited { retry_after_secs });
        }
        RateDecision::Allowed { remaining } => {
            debug!(caller, remaining, "within submission limit");
        }
    }

    let to = state
        .config
        .contact_email
        .as_deref()
        .ok_or(RelayError::NoRecipient)?;
    let message =
        mailer::build_message(&clean, to, &state.config.from_addr).map_err(RelayError::Mail)?;
    state.mailer.send(message).await.map_err(|err| {
        warn!(caller, error = %err, "mail delivery failed");
        RelayError::Mail(err)
    })?;

    info!(caller, "contact message relayed");
    Ok(SubmitResponse::ok())
}

/// Resolve the caller address: the socket peer, or the first forwarded
/// entry when the deployment fronts the relay with a trusted proxy.
fn caller_addr(config: &RelayConfig, headers: &HeaderMap, socket: SocketAddr) -> String {
    if config.trust_forwarded {
        if let Some(first) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return first.to_string();
        }
    }
    socket.ip().to_string()
}

/// Plain OPTIONS (and intercepted preflights) get an empty 204; the CORS
/// headers come from the response-header layers on the router.
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> (StatusCode, Json<SubmitResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(SubmitResponse::err("Method not allowed")),
    )
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_contract() {
        assert_eq!(
            RelayError::Field(FieldError::MissingFields).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::Field(FieldError::InvalidEmail).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::RateLimited {
                retry_after_secs: 60
            }
            .status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            RelayError::NoRecipient.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn rate_limit_response_carries_retry_after() {
        let response = RelayError::RateLimited {
            retry_after_secs: 120,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok()),
            Some("120")
        );
    }

    #[test]
    fn forwarded_header_is_ignored_unless_trusted() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "198.51.100.7, 10.0.0.1".parse().unwrap());
        let socket: SocketAddr = "203.0.113.9:4444".parse().unwrap();

        let mut config = RelayConfig::default();
        assert_eq!(caller_addr(&config, &headers, socket), "203.0.113.9");

        config.trust_forwarded = true;
        assert_eq!(caller_addr(&config, &headers, socket), "198.51.100.7");
    }

    #[test]
    fn trusted_but_absent_header_falls_back_to_socket() {
        let config = RelayConfig {
            trust_forwarded: true,
            ..Default::default()
        };
        let socket: SocketAddr = "203.0.113.9:4444".parse().unwrap();
        assert_eq!(
            caller_addr(&config, &HeaderMap::new(), socket),
            "203.0.113.9"
        );
    }
}

//! Contact mail relay.
//!
//! A small axum service that serves the exported web bundle and accepts
//! contact-form submissions on `POST /api/contact`: honeypot check,
//! sanitation and validation (shared with the browser form), per-address
//! rate limiting backed by locked counter files, then mail delivery via
//! SMTP or sendmail. Replies are always `{"success": ..}` JSON with an
//! optional `error` string.

pub mod handlers;
pub mod mailer;
pub mod ratelimit;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;
pub use mailer::Mailer;
pub use ratelimit::{RateDecision, RateStore};

/// Relay configuration. Defaults match the production deployment; every
/// field can be overridden from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Directory holding the exported web bundle (default: dist)
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Directory for per-address rate counter files (default: .rate_limit)
    #[serde(default = "default_rate_dir")]
    pub rate_dir: PathBuf,

    /// Submissions allowed per address per window (default: 5)
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    /// Rate window in seconds (default: 3600)
    #[serde(default = "default_rate_window_secs")]
    pub rate_window_secs: i64,

    /// Origin allowed to call the API (default: https://isahussain.com)
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Destination for contact mail. Unset is a configuration error
    /// reported per request, not at startup.
    #[serde(default)]
    pub contact_email: Option<String>,

    /// Envelope sender (default: noreply@isahussain.com)
    #[serde(default = "default_from_addr")]
    pub from_addr: String,

    /// SMTP relay host; unset falls back to local sendmail.
    #[serde(default)]
    pub smtp_host: Option<String>,
    #[serde(default)]
    pub smtp_user: Option<String>,
    #[serde(default)]
    pub smtp_pass: Option<String>,

    /// Honor the first X-Forwarded-For entry when resolving the caller
    /// address (default: false; enable behind a trusted proxy).
    #[serde(default)]
    pub trust_forwarded: bool,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_rate_dir() -> PathBuf {
    PathBuf::from(".rate_limit")
}

fn default_rate_limit() -> u32 {
    5
}

fn default_rate_window_secs() -> i64 {
    3600
}

fn default_allowed_origin() -> String {
    "https://isahussain.com".to_string()
}

fn default_from_addr() -> String {
    "noreply@isahussain.com".to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            rate_dir: default_rate_dir(),
            rate_limit: default_rate_limit(),
            rate_window_secs: default_rate_window_secs(),
            allowed_origin: default_allowed_origin(),
            contact_email: None,
            from_addr: default_from_addr(),
            smtp_host: None,
            smtp_user: None,
            smtp_pass: None,
            trust_forwarded: false,
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            bind_addr: env("RELAY_BIND_ADDR").unwrap_or_else(default_bind_addr),
            static_dir: env("RELAY_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_static_dir),
            rate_dir: env("RELAY_RATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_rate_dir),
            rate_limit: env("RELAY_RATE_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_rate_limit),
            rate_window_secs: env("RELAY_RATE_WINDOW_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_rate_window_secs),
            allowed_origin: env("RELAY_ALLOWED_ORIGIN").unwrap_or_else(default_allowed_origin),
            contact_email: env("CONTACT_EMAIL"),
            from_addr: env("RELAY_FROM").unwrap_or_else(default_from_addr),
            smtp_host: env("RELAY_SMTP_HOST"),
            smtp_user: env("RELAY_SMTP_USER"),
            smtp_pass: env("RELAY_SMTP_PASS"),
            trust_forwarded: env("RELAY_TRUST_FORWARDED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    pub fn rate_window(&self) -> Duration {
        Duration::from_secs(self.rate_window_secs.max(0) as u64)
    }
}

/// Assemble the service: the contact API with its CORS headers, plus the
/// exported bundle with an index.html fallback for client-side routes.
pub fn router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let origin = HeaderValue::from_str(&state.config.allowed_origin)?;

    let api = Router::new()
        .route(
            "/api/contact",
            post(handlers::submit)
                .options(handlers::preflight)
                .fallback(handlers::method_not_allowed),
        )
        .route("/api/health", get(handlers::health))
        // The same three headers on every API response, preflight included.
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .with_state(state.clone());

    let bundle = ServeDir::new(&state.config.static_dir)
        .fallback(ServeFile::new(state.config.static_dir.join("index.html")));

    Ok(api
        .fallback_service(bundle)
        .layer(TraceLayer::new_for_http()))
}

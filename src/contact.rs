//! Contact-form rules shared by the browser form and the mail relay.
//!
//! Both sides sanitize and validate with the same functions so the client
//! can reject bad input before the network round trip and the relay can
//! enforce the same rules on whatever actually arrives:
//! - tag stripping and trimming on every field
//! - CR/LF removal on single-line fields (header injection)
//! - email syntax: local part, `@`, domain containing a dot, no whitespace
//! - a hidden `website` field as the honeypot
//!
//! The relay's JSON reply shape (`{"success": ..}` plus an optional
//! `"error"`) also lives here so the form parser and the handlers agree.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw fields as posted by the form. `website` is the honeypot: the input
/// is visually hidden, so any content means a bot filled it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub website: String,
}

/// Sanitized, validated fields ready to be mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Field-level rejections. The display strings are the exact messages the
/// form shows, so they double as the wire `error` values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email address")]
    InvalidEmail,
}

impl ContactSubmission {
    pub fn is_honeypot(&self) -> bool {
        !self.website.is_empty()
    }

    /// Sanitize and validate in one step: strip tags and trim everywhere,
    /// drop CR/LF from the single-line fields, then require all fields and
    /// a well-formed email. Validation runs on the sanitized values, so a
    /// field that was only markup counts as missing.
    pub fn validate(&self) -> Result<CleanSubmission, FieldError> {
        let name = sanitize_single_line(&self.name);
        let email = sanitize_single_line(&self.email);
        let message = sanitize_multi_line(&self.message);

        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(FieldError::MissingFields);
        }
        if !is_valid_email(&email) {
            return Err(FieldError::InvalidEmail);
        }

        Ok(CleanSubmission {
            name,
            email,
            message,
        })
    }
}

/// Reply body for `POST /api/contact`. A success carries no `error` key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Remove `<...>` spans. An unterminated `<` swallows the rest of the
/// string rather than leaking a partial tag.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

pub fn sanitize_single_line(input: &str) -> String {
    strip_tags(input)
        .trim()
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect()
}

pub fn sanitize_multi_line(input: &str) -> String {
    strip_tags(input).trim().to_string()
}

/// Syntax check only; deliverability is the mail server's problem.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    // A dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

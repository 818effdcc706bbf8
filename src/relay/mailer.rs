//! Outgoing mail: message construction and transport selection.

use std::sync::{Arc, Mutex};

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{
    AsyncSendmailTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::debug;

use crate::contact::CleanSubmission;
use crate::relay::RelayConfig;

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("bad mail address: {0}")]
    Address(#[from] lettre::address::AddressError),
    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("transport setup failed: {0}")]
    Setup(String),
    #[error("send failed: {0}")]
    Transport(String),
}

/// Build the notification mail for a validated submission. The submitter
/// goes in Reply-To so answering the notification answers them; an address
/// our mail stack cannot represent is simply left off rather than failing
/// the whole send.
pub fn build_message(
    clean: &CleanSubmission,
    to: &str,
    from: &str,
) -> Result<Message, MailError> {
    let mut builder = Message::builder()
        .from(from.parse::<Mailbox>()?)
        .to(to.parse::<Mailbox>()?)
        .subject(format!("{SUBJECT_PREFIX}{}", clean.name))
        .header(ContentType::TEXT_PLAIN);

    match clean.email.parse::<Mailbox>() {
        Ok(reply_to) => builder = builder.reply_to(reply_to),
        Err(err) => debug!(email = %clean.email, error = %err, "skipping reply-to"),
    }

    let body = format!(
        "Name: {}\nEmail: {}\n\nMessage:\n{}",
        clean.name, clean.email, clean.message
    );
    Ok(builder.body(body)?)
}

/// The configured delivery path. `Capture` keeps messages in memory so
/// tests can assert on exactly what would have been sent.
#[derive(Clone)]
pub enum Mailer {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    Sendmail(Arc<AsyncSendmailTransport<Tokio1Executor>>),
    Capture(Arc<Mutex<Vec<Message>>>),
}

impl Mailer {
    /// SMTP relay when a host is configured, local sendmail otherwise.
    pub fn from_config(config: &RelayConfig) -> Result<Self, MailError> {
        match &config.smtp_host {
            Some(host) => {
                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| MailError::Setup(e.to_string()))?;
                if let (Some(user), Some(pass)) = (&config.smtp_user, &config.smtp_pass) {
                    builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
                }
                Ok(Self::Smtp(builder.build()))
            }
            None => Ok(Self::Sendmail(Arc::new(AsyncSendmailTransport::<Tokio1Executor>::new()))),
        }
    }

    pub fn capture() -> (Self, Arc<Mutex<Vec<Message>>>) {
        let sink = Arc::new(Mutex::new(Vec::new()));
        (Self::Capture(sink.clone()), sink)
    }

    pub async fn send(&self, message: Message) -> Result<(), MailError> {
        match self {
            Self::Smtp(transport) => transport
                .send(message)
                .await
                .map(drop)
                .map_err(|e| MailError::Transport(e.to_string())),
            Self::Sendmail(transport) => transport
                .send(message)
                .await
                .map(drop)
                .map_err(|e| MailError::Transport(e.to_string())),
            Self::Capture(sink) => {
                let mut sink = sink
                    .lock()
                    .map_err(|_| MailError::Transport("capture sink poisoned".to_string()))?;
                sink.push(message);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean() -> CleanSubmission {
        CleanSubmission {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "First line.\nSecond line.".to_string(),
        }
    }

    #[test]
    fn message_carries_subject_reply_to_and_body() {
        let message =
            build_message(&clean(), "owner@example.com", "noreply@example.com").unwrap();
        let rendered = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(rendered.contains("Subject: Portfolio Contact: Ada Lovelace"));
        assert!(rendered.contains("Reply-To: ada@example.com"));
        assert!(rendered.contains("From: noreply@example.com"));
        assert!(rendered.contains("To: owner@example.com"));
        assert!(rendered.contains("Name: Ada Lovelace"));
        assert!(rendered.contains("Message:"));
    }

    #[test]
    fn bad_recipient_is_an_error() {
        assert!(build_message(&clean(), "not an address", "noreply@example.com").is_err());
    }

    #[tokio::test]
    async fn capture_mailer_collects_messages() {
        let (mailer, sink) = Mailer::capture();
        let message =
            build_message(&clean(), "owner@example.com", "noreply@example.com").unwrap();
        mailer.send(message).await.unwrap();
        assert_eq!(sink.lock().unwrap().len(), 1);
    }
}

//! Contact form: local checks first, then a form post to the relay.
//!
//! The browser-side checks reuse the same helpers the relay validates
//! with, so a submission that passes here only bounces server-side when
//! something beyond the fields is wrong.

use dioxus::prelude::*;
use tracing::debug;

use crate::contact::{is_valid_email, ContactSubmission, SubmitResponse};

#[derive(Clone, PartialEq)]
enum SubmitStatus {
    Idle,
    Sending,
    Sent,
    Failed(String),
}

#[component]
pub fn ContactForm() -> Element {
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut message = use_signal(String::new);
    let mut website = use_signal(String::new);
    let mut status = use_signal(|| SubmitStatus::Idle);

    let submit = move |evt: Event<FormData>| {
        evt.prevent_default();

        let form = ContactSubmission {
            name: name().trim().to_string(),
            email: email().trim().to_string(),
            message: message().trim().to_string(),
            website: website(),
        };

        if form.name.is_empty() || form.email.is_empty() || form.message.is_empty() {
            status.set(SubmitStatus::Failed("All fields are required.".to_string()));
            return;
        }
        if !is_valid_email(&form.email) {
            status.set(SubmitStatus::Failed(
                "Please enter a valid email address.".to_string(),
            ));
            return;
        }

        status.set(SubmitStatus::Sending);
        spawn(async move {
            match post_submission(&form).await {
                Ok(reply) if reply.success => {
                    name.set(String::new());
                    email.set(String::new());
                    message.set(String::new());
                    status.set(SubmitStatus::Sent);
                }
                Ok(reply) => {
                    let reason = reply
                        .error
                        .unwrap_or_else(|| "Something went wrong.".to_string());
                    status.set(SubmitStatus::Failed(reason));
                }
                Err(err) => {
                    debug!(error = %err, "contact submission failed");
                    status.set(SubmitStatus::Failed(
                        "Could not reach the server. Please try again.".to_string(),
                    ));
                }
            }
        });
    };

    if status() == SubmitStatus::Sent {
        return rsx! {
            div { class: "contact-success",
                p { "Message sent. I’ll be in touch." }
            }
        };
    }

    let sending = status() == SubmitStatus::Sending;
    let failure = match status() {
        SubmitStatus::Failed(reason) => reason,
        _ => String::new(),
    };

    rsx! {
        form { class: "contact-form", novalidate: true, onsubmit: submit,
            // Hidden from people; bots that fill every field give
            // themselves away.
            input {
                r#type: "text",
                name: "website",
                autocomplete: "off",
                tabindex: "-1",
                style: "position: absolute; left: -9999px; opacity: 0",
                value: "{website}",
                oninput: move |evt| website.set(evt.value()),
            }

            div { class: "contact-field",
                label { class: "contact-label", r#for: "name", "Name" }
                input {
                    class: "contact-input",
                    r#type: "text",
                    id: "name",
                    required: true,
                    disabled: sending,
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
            }

            div { class: "contact-field",
                label { class: "contact-label", r#for: "email", "Email" }
                input {
                    class: "contact-input",
                    r#type: "email",
                    id: "email",
                    required: true,
                    disabled: sending,
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }

            div { class: "contact-field",
                label { class: "contact-label", r#for: "message", "Message" }
                textarea {
                    class: "contact-input contact-textarea",
                    id: "message",
                    required: true,
                    disabled: sending,
                    value: "{message}",
                    oninput: move |evt| message.set(evt.value()),
                }
            }

            if !failure.is_empty() {
                p { class: "contact-error", "{failure}" }
            }

            button {
                class: "contact-submit",
                r#type: "submit",
                disabled: sending,
                if sending { "Sending..." } else { "Send Message" }
            }
        }
    }
}

/// Post the submission to the relay. The reply body is the wire format
/// for every status, so it parses whether the relay accepted or not.
async fn post_submission(form: &ContactSubmission) -> Result<SubmitResponse, reqwest::Error> {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    reqwest::Client::new()
        .post(format!("{origin}/api/contact"))
        .form(form)
        .send()
        .await?
        .json::<SubmitResponse>()
        .await
}

//! Contact page.

use dioxus::prelude::*;

use crate::components::contact_form::ContactForm;

const CONTACT_CSS: Asset = asset!("/assets/styling/contact.css");

#[component]
pub fn Contact() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: CONTACT_CSS }
        main { class: "contact-page",
            div { class: "contact-inner",
                div { class: "contact-header",
                    h1 { class: "contact-heading", "Get in Touch" }
                    p { class: "contact-subheading",
                        "Have a project in mind, a question, or just want to say hello? "
                        "Send me a message."
                    }
                }
                ContactForm {}
            }
        }
    }
}

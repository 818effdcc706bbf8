//! Personal portfolio site.
//!
//! The browser half is a Dioxus app (wasm32): four routes, animated route
//! transitions, a WebGL hero background, and the contact form. The native
//! half is a small axum relay that serves the exported bundle and forwards
//! contact-form submissions by mail, rate limited per caller address.
//!
//! Everything the two halves must agree on (form sanitation rules, the
//! response wire format, transition planning, easing and timeline math, the
//! project records) lives in plain modules compiled on both targets so the
//! unit tests run natively.

pub mod choreography;
pub mod contact;
pub mod data;
pub mod motion;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod views;

#[cfg(not(target_arch = "wasm32"))]
pub mod relay;

pub use contact::{ContactSubmission, SubmitResponse};
pub use data::{Project, PROJECTS};

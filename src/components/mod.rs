//! Reusable pieces of the browser app: navigation chrome, the transition
//! overlays and their orchestrator, the hero shader, and the contact form.

pub mod contact_form;
pub mod dom;
pub mod home_intro;
pub mod navbar;
pub mod reveal;
pub mod shader;
pub mod signature;
pub mod transition;
pub mod webgl;
pub mod wipe;

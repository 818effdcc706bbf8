//! Views module - all page components

mod about;
pub use about::About;

mod contact;
pub use contact::Contact;

mod home;
pub use home::Home;

mod projects;
pub use projects::Projects;

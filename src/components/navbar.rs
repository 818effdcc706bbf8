//! Navigation chrome: the signature mark up top and the page links along
//! the bottom. Both fade with [`Stage::navbar_visible`] so transitions can
//! hold them back until a page is actually on screen.

use dioxus::prelude::*;

use crate::app::Route;
use crate::components::signature::Signature;
use crate::components::transition::{Stage, TransitionLink};

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");

#[component]
pub fn TopNavbar() -> Element {
    let stage = use_context::<Stage>();
    let visible = (stage.navbar_visible)();

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        div {
            class: "top-logo",
            style: if visible { "opacity: 1" } else { "opacity: 0" },
            TransitionLink { to: Route::Home {}, class: "top-logo-link", label: "Home",
                Signature { path_id: "top-logo-signature" }
            }
        }
    }
}

#[component]
pub fn BottomNavbar() -> Element {
    let stage = use_context::<Stage>();
    let current = use_route::<Route>();
    let visible = (stage.navbar_visible)();

    let entries = [
        (Route::Home {}, "Home"),
        (Route::About {}, "About"),
        (Route::Projects {}, "Projects"),
        (Route::Contact {}, "Contact"),
    ];

    rsx! {
        nav {
            class: "bottom-navbar",
            style: if visible {
                "opacity: 1; pointer-events: auto"
            } else {
                "opacity: 0; pointer-events: none"
            },
            ul { class: "bottom-navbar-links",
                for (to, text) in entries {
                    li { key: "{text}",
                        TransitionLink {
                            to: to.clone(),
                            class: if to == current {
                                "bottom-navbar-link active"
                            } else {
                                "bottom-navbar-link"
                            },
                            "{text}"
                        }
                    }
                }
            }
        }
    }
}

//! Signature loading screen played on arrivals at the home route.

use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::SvgGeometryElement;

use crate::choreography::{
    HOME_DELAY_MS, HOME_DRAW_MS, HOME_FADE_MS, HOME_HOLD_MS, HOME_SHRINK_MS,
};
use crate::components::dom;
use crate::components::signature::Signature;
use crate::motion::{Ease, Timeline};

const OVERLAY_ID: &str = "loading-screen";
const WRAP_ID: &str = "signature-wrap";
const PATH_ID: &str = "signature-path";

#[component]
pub fn HomeIntroOverlay() -> Element {
    rsx! {
        div { id: OVERLAY_ID, class: "loading-screen", style: "display: none",
            div { id: WRAP_ID, class: "signature",
                Signature { path_id: PATH_ID }
            }
        }
    }
}

/// Build the intro in two halves. The first shows the screen and draws
/// the signature through the shrink; the orchestrator releases the page
/// when it completes and lets the second half (the fade-out) finish on
/// its own, so the hero underneath starts moving while the screen is
/// still dissolving.
pub fn intro_parts() -> Option<(Timeline, Timeline)> {
    let overlay = dom::by_id(OVERLAY_ID)?;
    let wrap = dom::by_id(WRAP_ID)?;
    let path = dom::by_id(PATH_ID)?.dyn_into::<SvgGeometryElement>().ok()?;
    let len = f64::from(path.get_total_length());

    let setup_overlay = overlay.clone();
    let setup_wrap = wrap.clone();
    let setup_path = path.clone();
    let draw = Timeline::new()
        .call(move || {
            dom::remove_class(&setup_wrap, "shrinking");
            dom::set_attr(&setup_path, "stroke-dasharray", &len.to_string());
            dom::set_attr(&setup_path, "stroke-dashoffset", &len.to_string());
            dom::set_style(&setup_overlay, "opacity", "1");
            dom::set_style(&setup_overlay, "display", "flex");
        })
        .wait(HOME_DELAY_MS)
        .tween(HOME_DRAW_MS, Ease::InOutCubic, move |p| {
            dom::set_attr(&path, "stroke-dashoffset", &((1.0 - p) * len).to_string());
        })
        .wait(HOME_HOLD_MS)
        .call(move || dom::add_class(&wrap, "shrinking"))
        .wait(HOME_SHRINK_MS);

    let fade_overlay = overlay.clone();
    let fade = Timeline::new()
        .tween(HOME_FADE_MS, Ease::InOutQuad, move |p| {
            dom::set_style(&fade_overlay, "opacity", &(1.0 - p).to_string());
        })
        .call(move || dom::set_style(&overlay, "display", "none"));

    Some((draw, fade))
}

/// Take the screen down instantly; a navigation interrupted the intro.
pub fn hide() {
    if let Some(overlay) = dom::by_id(OVERLAY_ID) {
        dom::set_style(&overlay, "display", "none");
    }
}

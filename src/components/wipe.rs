//! Full-screen zigzag wipe.
//!
//! A single SVG path snakes across a stretched 0-100 viewBox; drawing it
//! by dash offset covers the screen strip by strip, and pushing the
//! offset past the far end slides the strips off again. The overlay owns
//! no state: the transition orchestrator shows it, plays the timelines,
//! and hides it.

use dioxus::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::SvgGeometryElement;

use crate::choreography::{wipe_path_d, wipe_stroke_width, WIPE_MS, WIPE_SECTIONS};
use crate::components::dom;
use crate::motion::{Ease, Timeline};

const OVERLAY_ID: &str = "page-wipe";
const PATH_ID: &str = "page-wipe-path";

#[component]
pub fn WipeOverlay() -> Element {
    let d = wipe_path_d(WIPE_SECTIONS);
    let stroke_width = wipe_stroke_width(WIPE_SECTIONS);
    rsx! {
        div { id: OVERLAY_ID, class: "wipe-overlay", style: "display: none",
            svg {
                view_box: "0 0 100 100",
                preserve_aspect_ratio: "none",
                path {
                    id: PATH_ID,
                    d,
                    stroke: "rgb(var(--gold))",
                    stroke_width: "{stroke_width}",
                    stroke_linecap: "butt",
                    fill: "none",
                }
            }
        }
    }
}

fn path_element() -> Option<SvgGeometryElement> {
    dom::by_id(PATH_ID)?.dyn_into::<SvgGeometryElement>().ok()
}

/// Draw the strips over the current page. The dash run starts fully off
/// screen, so whatever was visible stays visible until the strips cross.
pub fn cover() -> Option<Timeline> {
    let overlay = dom::by_id(OVERLAY_ID)?;
    let path = path_element()?;
    let len = f64::from(path.get_total_length());

    let setup = path.clone();
    let tl = Timeline::new()
        .call(move || {
            dom::set_attr(&setup, "stroke-dasharray", &len.to_string());
            dom::set_attr(&setup, "stroke-dashoffset", &len.to_string());
            dom::set_style(&overlay, "display", "block");
        })
        .tween(WIPE_MS, Ease::Linear, move |p| {
            dom::set_attr(&path, "stroke-dashoffset", &((1.0 - p) * len).to_string());
        });
    Some(tl)
}

/// Slide the strips off the far side, then hide the overlay. Starts from
/// the current dash offset so an interrupted cover reveals smoothly.
pub fn reveal() -> Option<Timeline> {
    let overlay = dom::by_id(OVERLAY_ID)?;
    let path = path_element()?;
    let len = f64::from(path.get_total_length());
    let from = path
        .get_attribute("stroke-dashoffset")
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0);

    let tl = Timeline::new()
        .tween(WIPE_MS, Ease::Linear, move |p| {
            let offset = from + (-len - from) * p;
            dom::set_attr(&path, "stroke-dashoffset", &offset.to_string());
        })
        .call(move || dom::set_style(&overlay, "display", "none"));
    Some(tl)
}

//! The hand-drawn signature mark.
//!
//! One continuous stroke so the home intro can draw it with a single
//! dash-offset run. The top logo renders the same mark without an id.

use dioxus::prelude::*;

/// Path data for the signature flourish, a looping cursive line with a
/// long underline sweep.
const SIGNATURE_D: &str = "M 38 104 \
C 58 54, 84 26, 96 34 C 108 42, 84 84, 66 102 C 52 116, 44 108, 56 94 \
C 76 70, 112 54, 134 58 C 150 61, 148 82, 136 92 C 126 100, 118 92, 126 80 \
C 136 65, 158 56, 174 62 C 186 67, 184 84, 196 84 C 210 84, 216 62, 232 56 \
C 244 52, 250 62, 246 74 C 242 86, 252 92, 264 86 C 282 77, 300 62, 322 58 \
M 26 122 C 96 110, 220 108, 334 114";

#[component]
pub fn Signature(#[props(into, default)] path_id: Option<String>) -> Element {
    rsx! {
        svg {
            class: "signature-mark",
            view_box: "0 0 360 140",
            fill: "none",
            "aria-hidden": "true",
            path {
                id: path_id,
                class: "signature-mark-path",
                d: SIGNATURE_D,
                stroke: "currentColor",
                stroke_width: "3.5",
                stroke_linecap: "round",
                stroke_linejoin: "round",
            }
        }
    }
}

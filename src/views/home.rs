//! Landing page: the shader hero and the staggered intro.
//!
//! The name renders pre-split into masked word and char spans so the
//! intro can move the chars without touching layout. The intro itself is
//! one master tween; every element maps the master clock into its own
//! window, which is how the overlapping picture (tagline starting before
//! the last chars land, navbar links trailing in) plays on a sequential
//! timeline.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::components::dom;
use crate::components::shader::HeroShader;
use crate::components::transition::Stage;
use crate::motion::player::play;
use crate::motion::{Ease, Stagger, Timeline};

const HOME_CSS: Asset = asset!("/assets/styling/home.css");

const HERO_NAME: &str = "ISA HUSSAIN";
const HERO_TAGLINE: &str = "I build things worth noticing.";

const CHAR_MS: f64 = 600.0;
const CHAR_SPREAD_MS: f64 = 600.0;
const TAGLINE_MS: f64 = 800.0;
const LINK_MS: f64 = 1200.0;
const LINK_EACH_MS: f64 = 120.0;
/// Each block starts this far before the previous one ends.
const OVERLAP_MS: f64 = 200.0;

#[component]
pub fn Home() -> Element {
    let stage = use_context::<Stage>();
    let seen = use_hook(|| Rc::new(Cell::new(*stage.home_ready.peek())));

    // First run hides the hero behind the loading screen; every bump of
    // `home_ready` after that plays the intro. The intro is not stored
    // as the active transition on purpose: leaving the page mid-play
    // lets the navbar links finish fading in, same as staying.
    use_effect(move || {
        let epoch = (stage.home_ready)();
        if epoch == seen.get() {
            hide_hero();
            return;
        }
        seen.set(epoch);
        if let Some(intro) = hero_intro() {
            let _ = play(intro);
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: HOME_CSS }
        main {
            section { class: "hero",
                HeroShader {}
                div { class: "hero-content",
                    h1 { id: "hero-name", class: "hero-name", "aria-label": HERO_NAME,
                        for (wi, word) in HERO_NAME.split_whitespace().enumerate() {
                            span { key: "{wi}", class: "hero-word", "aria-hidden": "true",
                                for (ci, ch) in word.chars().enumerate() {
                                    span { key: "{ci}", class: "hero-char", "{ch}" }
                                }
                            }
                        }
                    }
                    p { id: "hero-tagline", class: "hero-tagline", "{HERO_TAGLINE}" }
                }
            }
        }
    }
}

fn hide_hero() {
    if let Some(name) = dom::by_id("hero-name") {
        dom::set_style(&name, "opacity", "0");
    }
    if let Some(tagline) = dom::by_id("hero-tagline") {
        dom::set_style(&tagline, "opacity", "0");
        dom::set_style(&tagline, "visibility", "hidden");
    }
    for link in dom::query_all(".bottom-navbar-link") {
        dom::set_style(&link, "opacity", "0");
    }
}

/// Chars fly in diagonally from alternating corners in shuffled order,
/// the tagline fades up, the navbar links brighten from the center out.
fn hero_intro() -> Option<Timeline> {
    let name = dom::by_id("hero-name")?;
    let tagline = dom::by_id("hero-tagline")?;
    let chars = dom::query_all(".hero-char");
    let links = dom::query_all(".bottom-navbar-link");

    let char_stagger = Stagger::evenly(chars.len(), CHAR_SPREAD_MS, CHAR_MS).shuffled(0x1517);
    let link_stagger = Stagger::from_center(links.len(), LINK_EACH_MS, LINK_MS);

    let tagline_start = (char_stagger.total_ms() - OVERLAP_MS).max(0.0);
    let links_start = tagline_start + TAGLINE_MS - OVERLAP_MS;
    let total = (links_start + link_stagger.total_ms()).max(char_stagger.total_ms());

    let tl = Timeline::new()
        .call({
            let name = name.clone();
            let tagline = tagline.clone();
            move || {
                dom::set_style(&name, "opacity", "1");
                dom::set_style(&tagline, "visibility", "visible");
            }
        })
        .tween(total, Ease::Linear, move |p| {
            let elapsed = p * total;

            for (i, ch) in chars.iter().enumerate() {
                let v = Ease::OutQuart.apply(char_stagger.local(i, elapsed));
                let sign = if i % 2 == 0 { -1.0 } else { 1.0 };
                let offset = sign * 150.0 * (1.0 - v);
                dom::set_style(
                    ch,
                    "transform",
                    &format!("translate({offset:.3}%, {offset:.3}%)"),
                );
            }

            let raw = ((elapsed - tagline_start) / TAGLINE_MS).clamp(0.0, 1.0);
            let tv = Ease::OutCubic.apply(raw);
            dom::set_style(&tagline, "opacity", &format!("{tv:.4}"));
            dom::set_style(
                &tagline,
                "transform",
                &format!("translateY({:.3}px)", 25.0 * (1.0 - tv)),
            );

            for (i, link) in links.iter().enumerate() {
                let lv = Ease::InOutQuad.apply(link_stagger.local(i, elapsed - links_start));
                dom::set_style(link, "opacity", &format!("{lv:.4}"));
            }
        });

    Some(tl)
}

//! Projects page: the card grid, the expanding detail row, and the hero
//! carousel inside it.
//!
//! Expanding injects a full-width detail row after the clicked card's
//! grid row, so the column count has to be known; it is measured from the
//! grid's computed style and tracked across window resizes. The height
//! animation is measure-then-tween: natural height is read with the panel
//! at `auto`, the tween drives a fixed pixel height, and the end step
//! hands the panel back to the layout.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures::StreamExt;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::app::Route;
use crate::components::dom;
use crate::components::reveal::Reveal;
use crate::components::transition::TransitionLink;
use crate::data::{project_by_id, ContentBlock, Project, PLACEHOLDER_IMAGE, PROJECTS};
use crate::motion::player::{play, TimelineHandle};
use crate::motion::{Ease, Timeline};

const PROJECTS_CSS: Asset = asset!("/assets/styling/projects.css");
const PLACEHOLDER_ASSET: Asset = asset!("/assets/images/placeholder.svg");

/// Project records carry source paths; the bundler rewrites asset names,
/// so the stand-in path maps to its bundled location here.
fn image_src(src: &'static str) -> String {
    if src == PLACEHOLDER_IMAGE {
        PLACEHOLDER_ASSET.to_string()
    } else {
        src.to_string()
    }
}

const EXPAND_MS: f64 = 500.0;
const COLLAPSE_MS: f64 = 400.0;
/// Landing position of the expanded row: 15% down the viewport.
const SCROLL_TO_OFFSET: f64 = 0.15;

const GRID_ID: &str = "projects-grid";
const PANEL_ID: &str = "project-expanded-content";
const PANEL_ROW_ID: &str = "project-card-expanded";

struct ColsListener {
    closure: Closure<dyn FnMut()>,
}

#[component]
pub fn Projects() -> Element {
    let mut expanded: Signal<Option<&'static str>> = use_signal(|| None);
    let mut grid_cols = use_signal(|| 2_usize);
    let mut panel_anim: Signal<Option<TimelineHandle>> = use_signal(|| None);

    let (cols_tx, cols_rx) = use_hook(|| {
        let (tx, rx) = futures::channel::mpsc::unbounded::<()>();
        (tx, Rc::new(RefCell::new(Some(rx))))
    });
    let listener: Rc<RefCell<Option<ColsListener>>> = use_hook(|| Rc::new(RefCell::new(None)));

    // Resize events reach the measurement through a channel; the raw
    // listener closure never touches component state itself.
    let register = Rc::clone(&listener);
    use_effect(move || {
        if register.borrow().is_some() {
            return;
        }
        grid_cols.set(measure_grid_cols());
        let tx = cols_tx.clone();
        let closure = Closure::new(move || {
            let _ = tx.unbounded_send(());
        });
        if let Some(window) = web_sys::window() {
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        }
        *register.borrow_mut() = Some(ColsListener { closure });
    });

    use_future(move || {
        let rx = cols_rx.borrow_mut().take();
        async move {
            let Some(mut rx) = rx else { return };
            while rx.next().await.is_some() {
                grid_cols.set(measure_grid_cols());
            }
        }
    });

    use_drop(move || {
        if let Some(cols) = listener.borrow_mut().take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    cols.closure.as_ref().unchecked_ref(),
                );
            }
        }
    });

    // Runs after the detail row has mounted for the chosen project.
    use_effect(move || {
        if expanded().is_none() {
            return;
        }
        let Some(panel) = dom::by_id(PANEL_ID) else {
            return;
        };
        if let Some(handle) = panel_anim.write().take() {
            handle.kill();
        }
        let Some(tl) = expand_timeline(&panel) else {
            return;
        };
        let (handle, _done) = play(tl);
        panel_anim.set(Some(handle));
        scroll_to_panel();
    });

    let toggle = move |id: &'static str| {
        if expanded() == Some(id) {
            if let Some(handle) = panel_anim.write().take() {
                handle.kill();
            }
            let Some(panel) = dom::by_id(PANEL_ID) else {
                expanded.set(None);
                return;
            };
            let Some(tl) = collapse_timeline(&panel) else {
                expanded.set(None);
                return;
            };
            let (handle, done) = play(tl);
            panel_anim.set(Some(handle));
            spawn(async move {
                if done.await {
                    expanded.set(None);
                }
            });
        } else {
            expanded.set(Some(id));
        }
    };

    let cols = grid_cols().max(1);
    let expanded_id = expanded();
    let expanded_project = expanded_id.and_then(project_by_id);
    // The detail row lands after the last card of the clicked card's row.
    let insert_after = expanded_id
        .and_then(|id| PROJECTS.iter().position(|p| p.id == id))
        .map(|i| ((i / cols) * cols + cols - 1).min(PROJECTS.len() - 1));

    let detail = expanded_project.map(|project| {
        rsx! {
            ProjectDetail { key: "{project.id}", project }
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: PROJECTS_CSS }
        main { class: "projects-page",
            div { class: "projects-inner",
                h1 { class: "projects-heading", "Projects" }
                div { class: "projects-grid", id: GRID_ID,
                    for (i, project) in PROJECTS.iter().enumerate() {
                        ProjectCard {
                            key: "{project.id}",
                            project,
                            active: expanded_id == Some(project.id),
                            on_toggle: move |id| toggle(id),
                        }
                        if Some(i) == insert_after {
                            {detail.clone()}
                        }
                    }
                    TransitionLink { to: Route::Contact {}, class: "projects-cta",
                        span { class: "projects-cta-text", "Have a project in mind?" }
                        span { class: "projects-cta-link", "Get in touch →" }
                    }
                }
            }
        }
    }
}

#[component]
fn ProjectCard(
    project: &'static Project,
    active: bool,
    on_toggle: EventHandler<&'static str>,
) -> Element {
    let face = if project.nda {
        rsx! {
            div { class: "project-card-nda",
                span { class: "project-card-nda-label", "NDA" }
            }
        }
    } else if let Some(src) = project.image {
        rsx! {
            img { src: image_src(src), alt: "{project.title}" }
        }
    } else {
        rsx! {
            div { class: "project-card-placeholder" }
        }
    };

    rsx! {
        button {
            class: if active { "project-card project-card--active" } else { "project-card" },
            "aria-label": "View {project.title}",
            "aria-expanded": "{active}",
            onclick: move |_| on_toggle.call(project.id),
            div { class: "project-card-image", {face} }
            div { class: "project-card-body",
                h2 { class: "project-card-title", "{project.title}" }
                p { class: "project-card-desc", "{project.short_desc}" }
            }
        }
    }
}

/// The expanded detail row. Remounts per project id, which also resets
/// the carousel to the first slide.
#[component]
fn ProjectDetail(project: &'static Project) -> Element {
    let mut slide = use_signal(|| 0_usize);
    let count = project.hero_images.len();
    let shift = slide() * 100;

    let role = project.role.map(|role| {
        rsx! {
            Reveal {
                p { class: "project-expanded-role", "{role}" }
            }
        }
    });

    let links = (!project.links.is_empty()).then(|| {
        rsx! {
            Reveal {
                div { class: "project-expanded-links",
                    for link in project.links.iter() {
                        a {
                            key: "{link.url}",
                            class: "project-expanded-link",
                            href: "{link.url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "{link.label}"
                        }
                    }
                }
            }
        }
    });

    rsx! {
        div { class: "project-card-expanded", id: PANEL_ROW_ID,
            div { class: "project-expanded-content", id: PANEL_ID,
                div { class: "project-expanded-inner",
                    if count > 0 {
                        div { class: "project-expanded-hero",
                            if count > 1 {
                                button {
                                    class: "project-expanded-hero-btn project-expanded-hero-btn--prev",
                                    "aria-label": "Previous image",
                                    onclick: move |evt| {
                                        evt.stop_propagation();
                                        slide.set(if slide() == 0 { count - 1 } else { slide() - 1 });
                                    },
                                    svg {
                                        view_box: "0 0 24 100",
                                        preserve_aspect_ratio: "none",
                                        fill: "none",
                                        stroke: "currentColor",
                                        stroke_width: "1.5",
                                        stroke_linecap: "round",
                                        polyline { points: "18,5 6,50 18,95" }
                                    }
                                }
                            }
                            div { class: "project-expanded-hero-viewport",
                                div {
                                    class: "project-expanded-hero-track",
                                    style: "transform: translateX(-{shift}%)",
                                    for (idx, src) in project.hero_images.iter().copied().enumerate() {
                                        div { key: "{idx}", class: "project-expanded-hero-slide",
                                            img {
                                                src: image_src(src),
                                                alt: "{project.title} hero {idx + 1}",
                                            }
                                        }
                                    }
                                }
                                if count > 1 {
                                    div { class: "project-expanded-hero-dots",
                                        for idx in 0..count {
                                            button {
                                                key: "{idx}",
                                                class: if idx == slide() {
                                                    "project-expanded-hero-dot project-expanded-hero-dot--active"
                                                } else {
                                                    "project-expanded-hero-dot"
                                                },
                                                "aria-label": "Go to image {idx + 1}",
                                                onclick: move |evt| {
                                                    evt.stop_propagation();
                                                    slide.set(idx);
                                                },
                                            }
                                        }
                                    }
                                }
                            }
                            if count > 1 {
                                button {
                                    class: "project-expanded-hero-btn project-expanded-hero-btn--next",
                                    "aria-label": "Next image",
                                    onclick: move |evt| {
                                        evt.stop_propagation();
                                        slide.set((slide() + 1) % count);
                                    },
                                    svg {
                                        view_box: "0 0 24 100",
                                        preserve_aspect_ratio: "none",
                                        fill: "none",
                                        stroke: "currentColor",
                                        stroke_width: "1.5",
                                        stroke_linecap: "round",
                                        polyline { points: "6,5 18,50 6,95" }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "project-expanded-text",
                        Reveal {
                            h2 { class: "project-expanded-title", "{project.title}" }
                        }
                        {role}
                        div { class: "project-expanded-body",
                            for (idx, block) in project.content.iter().enumerate() {
                                {content_block(idx, block)}
                            }
                        }
                        {links}
                    }
                }
            }
        }
    }
}

fn content_block(idx: usize, block: &'static ContentBlock) -> Element {
    match *block {
        ContentBlock::Text(text) => rsx! {
            Reveal { key: "{idx}",
                p { "{text}" }
            }
        },
        ContentBlock::Image { src, alt } => rsx! {
            Reveal { key: "{idx}", class: "project-expanded-inline-img",
                img { src: image_src(src), alt: "{alt}" }
            }
        },
    }
}

fn measure_grid_cols() -> usize {
    let fallback = 2;
    let Some(grid) = dom::by_id(GRID_ID) else {
        return fallback;
    };
    let Some(window) = web_sys::window() else {
        return fallback;
    };
    window
        .get_computed_style(&grid)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("grid-template-columns").ok())
        .map(|v| v.split_whitespace().count())
        .filter(|n| *n > 0)
        .unwrap_or(fallback)
}

fn expand_timeline(panel: &web_sys::Element) -> Option<Timeline> {
    let html = panel.dyn_ref::<web_sys::HtmlElement>()?;
    dom::set_style(panel, "height", "auto");
    let natural = f64::from(html.offset_height());
    dom::set_style(panel, "height", "0px");

    let target = panel.clone();
    let settle = panel.clone();
    Some(
        Timeline::new()
            .tween(EXPAND_MS, Ease::OutCubic, move |p| {
                dom::set_style(&target, "height", &format!("{:.2}px", natural * p));
                dom::set_style(&target, "opacity", &format!("{p:.4}"));
            })
            // A fixed height would clip everything that reveals below the
            // fold; hand the panel back to the layout once it has landed.
            .call(move || dom::set_style(&settle, "height", "auto")),
    )
}

fn collapse_timeline(panel: &web_sys::Element) -> Option<Timeline> {
    let html = panel.dyn_ref::<web_sys::HtmlElement>()?;
    let from = f64::from(html.offset_height());
    let target = panel.clone();
    Some(
        Timeline::new().tween(COLLAPSE_MS, Ease::InOutCubic, move |p| {
            dom::set_style(&target, "height", &format!("{:.2}px", from * (1.0 - p)));
            dom::set_style(&target, "opacity", &format!("{:.4}", 1.0 - p));
        }),
    )
}

fn scroll_to_panel() {
    let Some(row) = dom::by_id(PANEL_ROW_ID) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };
    let rect = row.get_bounding_client_rect();
    let offset = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
        * SCROLL_TO_OFFSET;
    window.scroll_by_with_x_and_y(0.0, rect.top() - offset);
}

//! Scroll-triggered reveal wrapper.
//!
//! Each instance owns one `IntersectionObserver` on its own block. The
//! first time the block scrolls into view it gets the `visible` class and
//! observation stops; the styling does the rest. Blocks start revealed
//! when observers are unsupported.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry};

use crate::components::dom;

fn next_reveal_id() -> u32 {
    thread_local! {
        static NEXT: Cell<u32> = const { Cell::new(0) };
    }
    NEXT.with(|next| {
        let id = next.get().wrapping_add(1);
        next.set(id);
        id
    })
}

struct ObserverRig {
    observer: IntersectionObserver,
    _hit: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

#[component]
pub fn Reveal(#[props(into, default)] class: String, children: Element) -> Element {
    let id = use_hook(|| format!("reveal-{}", next_reveal_id()));
    let rig: Rc<RefCell<Option<ObserverRig>>> = use_hook(|| Rc::new(RefCell::new(None)));

    let observe_rig = Rc::clone(&rig);
    let observe_id = id.clone();
    use_effect(move || {
        if observe_rig.borrow().is_some() {
            return;
        }
        let Some(el) = dom::by_id(&observe_id) else {
            return;
        };
        let hit = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        dom::add_class(&target, "visible");
                        observer.unobserve(&target);
                    }
                }
            },
        );
        match IntersectionObserver::new(hit.as_ref().unchecked_ref()) {
            Ok(observer) => {
                observer.observe(&el);
                *observe_rig.borrow_mut() = Some(ObserverRig {
                    observer,
                    _hit: hit,
                });
            }
            Err(_) => dom::add_class(&el, "visible"),
        }
    });

    use_drop(move || {
        if let Some(rig) = rig.borrow_mut().take() {
            rig.observer.disconnect();
        }
    });

    let class = if class.is_empty() {
        String::from("reveal")
    } else {
        format!("reveal {class}")
    };

    rsx! {
        div { id: "{id}", class: "{class}", {children} }
    }
}

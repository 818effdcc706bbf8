//! `requestAnimationFrame` loop with cooperative cancellation.
//!
//! The callback re-requests itself each frame and owns its own lifetime:
//! when it returns `false`, or its [`RafLoop`] handle has been cancelled,
//! the closure takes itself out of the keep-alive slot and the loop ends.
//! Cancellation does not tear the queued frame down mid-air; the next
//! frame observes the flag and exits, which keeps the closure from being
//! freed while the browser still holds it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Handle to a running frame loop.
#[derive(Clone)]
pub struct RafLoop {
    alive: Rc<Cell<bool>>,
}

impl RafLoop {
    /// Stop the loop. The frame already queued runs once more as a no-op.
    pub fn cancel(&self) {
        self.alive.set(false);
    }

    pub fn is_cancelled(&self) -> bool {
        !self.alive.get()
    }
}

/// Run `frame` once per animation frame with the DOM timestamp in
/// milliseconds, until it returns `false` or the handle is cancelled.
pub fn start(mut frame: impl FnMut(f64) -> bool + 'static) -> RafLoop {
    let alive = Rc::new(Cell::new(true));
    let slot: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

    let tick_alive = Rc::clone(&alive);
    let tick_slot = Rc::clone(&slot);
    *slot.borrow_mut() = Some(Closure::new(move |now: f64| {
        if !tick_alive.get() || !frame(now) {
            // Last call: let go of ourselves once this invocation returns.
            let _ = tick_slot.borrow_mut().take();
            return;
        }
        request_frame(&tick_slot);
    }));
    request_frame(&slot);

    RafLoop { alive }
}

fn request_frame(slot: &Rc<RefCell<Option<FrameClosure>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(closure) = slot.borrow().as_ref() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

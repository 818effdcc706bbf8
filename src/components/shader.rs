//! Canvas host for the hero background.
//!
//! Mounts a [`HeroRenderer`] on the canvas once it is in the document and
//! drives it from the frame scheduler. Mouse position and resize events
//! land in shared cells that the frame callback polls, so the listeners
//! never touch the renderer directly. When WebGL2 is missing the canvas
//! simply stays blank over the page background.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use dioxus::prelude::*;
use tracing::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::components::dom;
use crate::components::webgl::{GlSetupError, HeroRenderer};
use crate::motion::raf::{self, RafLoop};

const CANVAS_ID: &str = "hero-shader";

struct ShaderRig {
    frames: RafLoop,
    mouse_move: Closure<dyn FnMut(MouseEvent)>,
    resize: Closure<dyn FnMut()>,
    canvas: HtmlCanvasElement,
}

impl ShaderRig {
    /// Stop the frame loop and detach the listeners. The renderer itself
    /// lives inside the frame closure and is dropped with it.
    fn teardown(&self) {
        self.frames.cancel();
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.mouse_move.as_ref().unchecked_ref(),
        );
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.resize.as_ref().unchecked_ref(),
            );
        }
    }
}

fn mount(canvas: HtmlCanvasElement) -> Result<ShaderRig, GlSetupError> {
    let mut renderer = HeroRenderer::new(canvas.clone())?;

    // Center until the cursor moves, matching the shader's neutral light.
    let mouse = Rc::new(Cell::new((0.5_f32, 0.5_f32)));
    let stale_size = Rc::new(Cell::new(false));

    let mouse_move = {
        let mouse = Rc::clone(&mouse);
        let canvas = canvas.clone();
        Closure::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return;
            }
            let x = (f64::from(event.client_x()) - rect.left()) / rect.width();
            let y = 1.0 - (f64::from(event.client_y()) - rect.top()) / rect.height();
            mouse.set((x as f32, y as f32));
        })
    };
    let _ = canvas
        .add_event_listener_with_callback("mousemove", mouse_move.as_ref().unchecked_ref());

    let resize = {
        let stale_size = Rc::clone(&stale_size);
        Closure::new(move || stale_size.set(true))
    };
    if let Some(window) = web_sys::window() {
        let _ =
            window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref());
    }

    let frames = {
        let mouse = Rc::clone(&mouse);
        raf::start(move |now| {
            if stale_size.replace(false) {
                renderer.resize();
            }
            renderer.frame(now, mouse.get());
            true
        })
    };

    Ok(ShaderRig {
        frames,
        mouse_move,
        resize,
        canvas,
    })
}

#[component]
pub fn HeroShader() -> Element {
    let rig: Rc<RefCell<Option<ShaderRig>>> = use_hook(|| Rc::new(RefCell::new(None)));

    let mount_rig = Rc::clone(&rig);
    use_effect(move || {
        if mount_rig.borrow().is_some() {
            return;
        }
        let Some(canvas) = dom::by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            return;
        };
        match mount(canvas) {
            Ok(rig) => *mount_rig.borrow_mut() = Some(rig),
            Err(err) => warn!(error = %err, "hero shader disabled"),
        }
    });

    use_drop(move || {
        if let Some(rig) = rig.borrow_mut().take() {
            rig.teardown();
        }
    });

    rsx! {
        canvas { id: CANVAS_ID, class: "hero-shader", "aria-hidden": "true" }
    }
}

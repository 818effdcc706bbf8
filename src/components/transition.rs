//! Route-transition orchestration.
//!
//! [`Shell`] is the router layout: it owns the shared [`Stage`] state,
//! renders the two overlays and the navigation chrome, and reacts to
//! route changes with whatever plan `choreography` picks. Playback runs
//! on the frame scheduler; the spawned tasks here only await completion
//! futures and then write signals or push routes, so nothing touches the
//! component runtime from inside a frame callback.

use dioxus::prelude::*;

use crate::app::Route;
use crate::choreography::{
    classify_click, plan_route_change, ClickAction, LinkClick, Phase, RoutePlan,
};
use crate::components::home_intro::{self, HomeIntroOverlay};
use crate::components::navbar::{BottomNavbar, TopNavbar};
use crate::components::wipe::{self, WipeOverlay};
use crate::motion::player::{play, TimelineHandle};

const TRANSITION_CSS: Asset = asset!("/assets/styling/transition.css");

/// Shared transition state, provided as context by [`Shell`].
#[derive(Clone, Copy)]
pub struct Stage {
    pub phase: Signal<Phase>,
    /// An intercepted link has covered the screen and its push has not
    /// landed yet.
    pub nav_pending: Signal<bool>,
    pub navbar_visible: Signal<bool>,
    /// Bumped every time an arrival at home finishes; the hero intro
    /// keys off it.
    pub home_ready: Signal<u32>,
    active: Signal<Option<TimelineHandle>>,
}

impl Stage {
    fn new() -> Self {
        Self {
            phase: Signal::new(Phase::Idle),
            nav_pending: Signal::new(false),
            navbar_visible: Signal::new(false),
            home_ready: Signal::new(0),
            active: Signal::new(None),
        }
    }

    fn kill_active(mut self) {
        if let Some(handle) = self.active.write().take() {
            handle.kill();
        }
    }

    fn store_active(mut self, handle: TimelineHandle) {
        self.active.set(Some(handle));
    }

    fn mark_home_ready(mut self) {
        self.phase.set(Phase::Idle);
        self.navbar_visible.set(true);
        self.home_ready += 1;
    }

    /// Intercepted link click: cover the screen over the current page,
    /// then push. The route-change handler takes it from there.
    pub fn begin_covered_nav(mut self, to: Route) {
        self.kill_active();
        self.nav_pending.set(true);
        self.phase.set(Phase::Covering);

        let nav = navigator();
        let Some(cover) = wipe::cover() else {
            nav.push(to);
            return;
        };
        let (handle, done) = play(cover);
        self.store_active(handle);
        spawn(async move {
            if done.await {
                nav.push(to);
            }
        });
    }

    /// The route actually changed; kill whatever is in flight and play
    /// the plan for this arrival.
    fn on_route_change(mut self, route: Route) {
        let is_home = matches!(route, Route::Home {});
        let pending = *self.nav_pending.peek();
        self.nav_pending.set(false);
        self.kill_active();

        let plan = plan_route_change(is_home, pending);
        self.navbar_visible.set(plan.navbar_during());

        match plan {
            RoutePlan::RevealOnly => self.spawn_reveal(is_home),
            RoutePlan::HomeIntro => self.spawn_home_intro(),
            RoutePlan::CoverAndReveal => self.spawn_cover_and_reveal(),
        }
    }

    fn spawn_reveal(mut self, is_home: bool) {
        home_intro::hide();
        self.phase.set(Phase::Revealing);
        let Some(tl) = wipe::reveal() else {
            self.phase.set(Phase::Idle);
            if is_home {
                self.mark_home_ready();
            }
            return;
        };
        let (handle, done) = play(tl);
        self.store_active(handle);
        spawn(async move {
            if done.await {
                self.phase.set(Phase::Idle);
                if is_home {
                    self.mark_home_ready();
                }
            }
        });
    }

    fn spawn_home_intro(mut self) {
        self.phase.set(Phase::Covering);
        let Some((draw, fade)) = home_intro::intro_parts() else {
            self.mark_home_ready();
            return;
        };
        let (handle, done) = play(draw);
        self.store_active(handle);
        spawn(async move {
            if !done.await {
                return;
            }
            // Release the page while the screen is still dissolving; the
            // fade is killable like anything else.
            self.mark_home_ready();
            let (fade_handle, _) = play(fade);
            self.store_active(fade_handle);
        });
    }

    fn spawn_cover_and_reveal(mut self) {
        home_intro::hide();
        self.phase.set(Phase::Covering);
        let Some(cover) = wipe::cover() else {
            self.phase.set(Phase::Idle);
            return;
        };
        let (handle, done) = play(cover);
        self.store_active(handle);
        spawn(async move {
            if !done.await {
                return;
            }
            self.phase.set(Phase::Revealing);
            let Some(tl) = wipe::reveal() else {
                self.phase.set(Phase::Idle);
                return;
            };
            let (handle, done) = play(tl);
            self.store_active(handle);
            if done.await {
                self.phase.set(Phase::Idle);
            }
        });
    }
}

/// Router layout: overlays, chrome, and the page outlet.
#[component]
pub fn Shell() -> Element {
    let stage = use_context_provider(Stage::new);
    let route = use_route::<Route>();

    use_effect(use_reactive!(|route| stage.on_route_change(route)));

    rsx! {
        document::Link { rel: "stylesheet", href: TRANSITION_CSS }

        HomeIntroOverlay {}
        WipeOverlay {}

        TopNavbar {}
        BottomNavbar {}

        Outlet::<Route> {}
    }
}

/// Internal link that runs clicks through the transition rules. Modified
/// clicks keep their browser behavior, so this renders a plain anchor and
/// only takes over when the plan says to.
#[component]
pub fn TransitionLink(
    to: Route,
    #[props(into, default)] class: String,
    #[props(into, default)] label: String,
    children: Element,
) -> Element {
    let stage = use_context::<Stage>();
    let current = use_route::<Route>();
    let href = to.to_string();

    rsx! {
        a {
            href: "{href}",
            class: if !class.is_empty() { "{class}" },
            "aria-label": if !label.is_empty() { "{label}" },
            onclick: move |evt| {
                let modifiers = evt.modifiers();
                let click = LinkClick {
                    modifier_held: modifiers.ctrl()
                        || modifiers.meta()
                        || modifiers.shift()
                        || modifiers.alt(),
                    target_is_current: to == current,
                    target_is_home: matches!(to, Route::Home {}),
                    nav_pending: *stage.nav_pending.peek(),
                };
                match classify_click(click) {
                    ClickAction::Browser => {}
                    ClickAction::Ignore => evt.prevent_default(),
                    ClickAction::Navigate => {
                        evt.prevent_default();
                        navigator().push(to.clone());
                    }
                    ClickAction::Intercept => {
                        evt.prevent_default();
                        stage.begin_covered_nav(to.clone());
                    }
                }
            },
            {children}
        }
    }
}

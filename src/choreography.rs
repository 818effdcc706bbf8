//! Route-transition planning.
//!
//! The browser orchestrator is thin: link clicks and route changes are
//! classified here, and the component just plays whatever this module
//! decides. Keeping the decisions pure makes the awkward cases (a link
//! clicked while a wipe is mid-flight, a modified click that should open a
//! new tab) checkable without a browser.

/// Where the stage currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    /// Strips are covering the screen (or the signature screen is up).
    Covering,
    /// Strips are sliding away from the new page.
    Revealing,
}

/// What to play when the route actually changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePlan {
    /// An intercepted link already covered the screen; just reveal.
    RevealOnly,
    /// Landing on home: signature draw with the chrome hidden until done.
    HomeIntro,
    /// Fresh arrival on a subpage (direct load, back/forward): cover the
    /// new content, then reveal it.
    CoverAndReveal,
}

impl RoutePlan {
    /// Whether the navigation chrome shows while the plan runs. Only the
    /// home intro hides it; wipes play over a visible navbar.
    pub fn navbar_during(self) -> bool {
        !matches!(self, RoutePlan::HomeIntro)
    }

    /// Every plan ends with the chrome visible.
    pub fn navbar_after(self) -> bool {
        true
    }
}

/// Decide the plan for a route change. `nav_pending` means a link click
/// already played the cover and pushed this route.
pub fn plan_route_change(is_home: bool, nav_pending: bool) -> RoutePlan {
    if nav_pending {
        RoutePlan::RevealOnly
    } else if is_home {
        RoutePlan::HomeIntro
    } else {
        RoutePlan::CoverAndReveal
    }
}

/// A click on one of our internal links.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkClick {
    /// Any of ctrl/meta/shift/alt was held.
    pub modifier_held: bool,
    /// The link points at the route we are already on.
    pub target_is_current: bool,
    pub target_is_home: bool,
    /// A previous intercepted navigation has not landed yet.
    pub nav_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Cover the screen first, push the route when the cover is done.
    Intercept,
    /// Push the route immediately; the route-change handler picks the plan.
    Navigate,
    /// Leave the event alone so the browser does its default thing.
    Browser,
    /// Swallow the click.
    Ignore,
}

pub fn classify_click(click: LinkClick) -> ClickAction {
    if click.modifier_held {
        return ClickAction::Browser;
    }
    if click.target_is_current {
        return ClickAction::Ignore;
    }
    // Home links always go straight through, even over a pending wipe; the
    // route-change handler sorts the overlap out.
    if click.target_is_home {
        return ClickAction::Navigate;
    }
    // A second click while a wipe is still covering skips the cover and
    // navigates at once; the pending flag downgrades the arrival to a
    // reveal.
    if click.nav_pending {
        return ClickAction::Navigate;
    }
    ClickAction::Intercept
}

/// Zigzag strip count of the wipe overlay.
pub const WIPE_SECTIONS: usize = 10;
/// One wipe direction (cover or reveal), in milliseconds.
pub const WIPE_MS: f64 = 800.0;

/// Signature intro timing.
pub const HOME_DELAY_MS: f64 = 500.0;
pub const HOME_DRAW_MS: f64 = 1500.0;
pub const HOME_HOLD_MS: f64 = 500.0;
pub const HOME_SHRINK_MS: f64 = 600.0;
pub const HOME_FADE_MS: f64 = 600.0;

/// Stroke width that makes `sections` horizontal strips overlap enough to
/// leave no gaps in a 0-100 viewBox.
pub fn wipe_stroke_width(sections: usize) -> f64 {
    140.0 / sections as f64 * 1.5
}

/// Path data for the wipe: a horizontal zigzag across a 0-100 viewBox, so
/// a stroke-dash draw sweeps the screen strip by strip.
pub fn wipe_path_d(sections: usize) -> String {
    let step = 100.0 / sections as f64;
    let mut points = (0..=sections).map(|i| {
        let x = if i % 2 == 0 { 100.0 } else { 0.0 };
        format!("{x},{y}", y = i as f64 * step)
    });
    let first = points.next().unwrap_or_default();
    let rest: Vec<String> = points.collect();
    format!("M {first} L {}", rest.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_navigation_only_reveals() {
        assert_eq!(plan_route_change(false, true), RoutePlan::RevealOnly);
        // A home click that lands while a wipe is still covering gets the
        // reveal too, not a second intro.
        assert_eq!(plan_route_change(true, true), RoutePlan::RevealOnly);
    }

    #[test]
    fn fresh_arrivals() {
        assert_eq!(plan_route_change(true, false), RoutePlan::HomeIntro);
        assert_eq!(plan_route_change(false, false), RoutePlan::CoverAndReveal);
    }

    #[test]
    fn only_the_home_intro_hides_the_chrome() {
        assert!(!RoutePlan::HomeIntro.navbar_during());
        assert!(RoutePlan::RevealOnly.navbar_during());
        assert!(RoutePlan::CoverAndReveal.navbar_during());
    }

    #[test]
    fn every_plan_ends_navbar_visible() {
        for plan in [
            RoutePlan::RevealOnly,
            RoutePlan::HomeIntro,
            RoutePlan::CoverAndReveal,
        ] {
            assert!(plan.navbar_after());
        }
    }

    #[test]
    fn modified_clicks_stay_with_the_browser() {
        let action = classify_click(LinkClick {
            modifier_held: true,
            target_is_home: true,
            ..Default::default()
        });
        assert_eq!(action, ClickAction::Browser);
    }

    #[test]
    fn current_route_clicks_are_swallowed() {
        let action = classify_click(LinkClick {
            target_is_current: true,
            ..Default::default()
        });
        assert_eq!(action, ClickAction::Ignore);
    }

    #[test]
    fn home_clicks_skip_the_wipe() {
        assert_eq!(
            classify_click(LinkClick {
                target_is_home: true,
                ..Default::default()
            }),
            ClickAction::Navigate
        );
        // Even while another navigation is pending.
        assert_eq!(
            classify_click(LinkClick {
                target_is_home: true,
                nav_pending: true,
                ..Default::default()
            }),
            ClickAction::Navigate
        );
    }

    #[test]
    fn subpage_clicks_are_intercepted_once() {
        assert_eq!(classify_click(LinkClick::default()), ClickAction::Intercept);
        // Only the first click pays for a cover; later ones jump straight
        // to the push and land on the already-covered screen.
        assert_eq!(
            classify_click(LinkClick {
                nav_pending: true,
                ..Default::default()
            }),
            ClickAction::Navigate
        );
    }

    #[test]
    fn wipe_path_zigzags_across_the_viewbox() {
        let d = wipe_path_d(10);
        assert!(d.starts_with("M 100,0 L 0,10 100,20"));
        // 11 points for 10 strips.
        assert_eq!(d.matches(',').count(), 11);
        assert!(d.ends_with("0,90 100,100"));
    }

    #[test]
    fn wipe_stroke_overlaps_strips() {
        // Strips are 10 units tall in the viewBox; the stroke must be wider.
        assert!(wipe_stroke_width(WIPE_SECTIONS) > 100.0 / WIPE_SECTIONS as f64);
    }
}

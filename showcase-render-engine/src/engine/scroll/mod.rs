//! Scroll-linked interpolation of model and light transforms.
//!
//! A [`binding::ScrollBinding`] says "while the page scrolls through section
//! S, move field F of viewport V from `from` to `to`". The registrar resolves
//! each binding to an entity when the viewport is built; the timeline then
//! samples every binding against [`crate::page::layout::PageLayout`] once per
//! frame, with optional scrub smoothing.
//!
//! ## Markers
//!
//! Start and end are written the same way page authors are used to:
//! `"<element edge> <viewport edge>"`, where an edge is `top`, `center`,
//! `bottom` or a percentage. `"top bottom"` → `"bottom top"` covers the whole
//! time the section is visible.

/// Binding targets, easing and scrub.
pub mod binding;

/// Binding registration against built viewports.
pub mod registrar;

/// Per-frame evaluation of registered bindings.
pub mod timeline;

/// Scroll markers and trigger regions.
pub mod trigger;

use bevy::prelude::*;

pub struct ScrollPlugin;

impl Plugin for ScrollPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<timeline::ScrollTimeline>().add_systems(
            Update,
            timeline::advance_scroll_timeline.in_set(crate::engine::ShowcaseSet::Scroll),
        );
    }
}

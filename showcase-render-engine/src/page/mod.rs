//! Bridge between the hosting page and the engine.
//!
//! The orchestrator never talks to the DOM or to winit directly. Both platform
//! bridges translate their raw input into the same three page events, and keep
//! [`PageLayout`] in sync with section geometry:
//!
//! ```text
//! wasm:   document mousemove ─┐            ┌─> PagePointerMoved
//!         window scroll ──────┼─ queue ────┼─> PageScrolled
//!         window resize ──────┘            └─> PageResized
//!
//! native: CursorMoved / MouseWheel / WindowResized ──> same events
//! ```
//!
//! Section geometry comes from `getBoundingClientRect` on the web and from a
//! stacked, one-screen-per-section layout natively.

/// Page geometry resource consumed by scroll triggers.
pub mod layout;

/// Per-character splitting of the marquee heading.
pub mod marquee;

/// Native translation of winit input into page events.
#[cfg(not(target_arch = "wasm32"))]
pub mod native_page;

/// DOM listeners feeding page events through a shared queue.
#[cfg(target_arch = "wasm32")]
pub mod web_page;

use bevy::prelude::*;

use crate::engine::config::ShowcaseConfig;
use layout::PageLayout;

/// Pointer position in page pixels, origin top-left.
#[derive(Event, Debug, Clone, Copy)]
pub struct PagePointerMoved {
    pub position: Vec2,
    pub page_size: Vec2,
}

/// Absolute vertical scroll offset of the page.
#[derive(Event, Debug, Clone, Copy)]
pub struct PageScrolled {
    pub scroll_y: f32,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PageResized {
    pub width: f32,
    pub height: f32,
}

/// Page events and layout, without any platform input source.
pub struct PagePlugin;

impl Plugin for PagePlugin {
    fn build(&self, app: &mut App) {
        let sections = app
            .world()
            .get_resource::<ShowcaseConfig>()
            .map(|config| config.sections.clone())
            .unwrap_or_default();

        app.add_event::<PagePointerMoved>()
            .add_event::<PageScrolled>()
            .add_event::<PageResized>()
            .insert_resource(PageLayout::stacked(&sections, PageLayout::default().viewport_height))
            .add_systems(Update, apply_page_scroll.in_set(crate::engine::ShowcaseSet::Page));
    }
}

/// Platform input source for the page events.
pub struct PageBridgePlugin;

impl Plugin for PageBridgePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, web_page::setup_page_listeners)
            .add_systems(
                Update,
                (web_page::drain_page_signals, web_page::measure_sections)
                    .chain()
                    .in_set(crate::engine::ShowcaseSet::Input),
            );

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(
            Update,
            (
                native_page::forward_cursor,
                native_page::forward_wheel,
                native_page::forward_resize,
                native_page::restack_sections,
            )
                .chain()
                .in_set(crate::engine::ShowcaseSet::Input),
        );
    }
}

fn apply_page_scroll(mut scrolled: EventReader<PageScrolled>, mut layout: ResMut<PageLayout>) {
    if let Some(last) = scrolled.read().last() {
        layout.scroll_y = last.scroll_y;
    }
}

//! Scene orchestration for the multi-canvas showcase.
//!
//! ## Frame order
//!
//! ```text
//! Build        model load polling, viewport factory
//! Input        platform bridges, orbit gestures
//! Page         page scroll applied to the layout
//! Interaction  pointer queue → pointer flush → light tweens, resize fan-out
//! Scroll       scroll timeline writes model/light transforms
//! Render       controller update, camera activation
//! ```
//!
//! Bevy renders every active camera after `Update`, so a viewport's controller
//! always moves before its frame is drawn.

/// Showcase configuration and its sources.
pub mod config;

/// Application setup, state machine and window configuration.
pub mod core;

/// Error types for loading and configuration.
pub mod error;

/// Pointer and resize fan-out to all viewports.
pub mod interaction;

/// Shared model loading.
pub mod loading;

/// Scroll-linked interpolations.
pub mod scroll;

/// Viewport construction, orbit control and render loops.
pub mod viewport;

use bevy::prelude::*;

use crate::engine::core::app_state::{AppState, transition_to_running};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShowcaseSet {
    Build,
    Input,
    Page,
    Interaction,
    Scroll,
    Render,
}

/// Orchestration without platform input or asset loading: the part that can
/// run headless.
pub struct ShowcasePlugin;

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                ShowcaseSet::Build,
                ShowcaseSet::Input,
                ShowcaseSet::Page,
                ShowcaseSet::Interaction,
                ShowcaseSet::Scroll,
                ShowcaseSet::Render,
            )
                .chain(),
        )
        .add_event::<loading::ModelLoadResolved>()
        .init_state::<AppState>()
        .add_plugins((
            crate::page::PagePlugin,
            viewport::ViewportPlugin,
            interaction::InteractionPlugin,
            scroll::ScrollPlugin,
        ))
        .add_systems(
            Update,
            transition_to_running
                .after(ShowcaseSet::Build)
                .run_if(in_state(AppState::Loading)),
        );
    }
}

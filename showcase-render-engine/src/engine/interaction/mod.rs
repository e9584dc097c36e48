//! Page-wide input fanned out to every viewport.
//!
//! Pointer moves retarget each viewport's light, coalesced so that no more
//! than one update is pending per frame. Page resizes refresh each viewport's
//! projection and surface size.

/// Smoothed light transitions.
pub mod light_tween;

/// Pointer normalisation and coalesced light fan-out.
pub mod pointer;

/// Projection and surface refresh on resize.
pub mod resize;

use bevy::prelude::*;

use crate::engine::ShowcaseSet;

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<pointer::PointerFanout>()
            .add_event::<bevy::window::WindowResized>()
            .add_systems(
                Update,
                (
                    pointer::queue_pointer_updates,
                    pointer::flush_pointer_update,
                    light_tween::advance_light_tweens,
                    resize::follow_surface_resize,
                    resize::fan_out_resize,
                )
                    .chain()
                    .in_set(ShowcaseSet::Interaction),
            );
    }
}

//! Shared model loading.
//!
//! The model scene is requested exactly once at startup. Every viewport spawns
//! its own instance from the same [`SharedModel`] handle, so the file is
//! fetched and decoded a single time however many canvases show it.

/// Model request and load-state polling.
pub mod model_loader;

use bevy::prelude::*;

pub use model_loader::{ModelLoadResolved, SharedModel};

/// Requests the shared model and reports when it resolves.
pub struct ModelLoadingPlugin;

impl Plugin for ModelLoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, model_loader::start_model_load)
            .add_systems(
                Update,
                model_loader::poll_model_load
                    .in_set(crate::engine::ShowcaseSet::Build)
                    .before(crate::engine::viewport::factory::build_viewports),
            );
    }
}

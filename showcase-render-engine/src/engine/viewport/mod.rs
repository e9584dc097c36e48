//! Viewports: one canvas, camera, light, controller and model clone each.
//!
//! Surfaces (canvas-bound windows) exist from startup so the app has
//! something to keep alive while the model loads. Once the load resolves the
//! factory wires a camera, point light, orbit controller and model clone into
//! every surface and records the result in [`Viewports`], which every
//! fan-out handler iterates.
//!
//! Each viewport draws only its own [`RenderLayers`] layer, so a model or
//! light added to viewport A is invisible to viewport B.

/// Damped orbit controller and the input routing for it.
pub mod controller;

/// Viewport construction once the shared model resolves.
pub mod factory;

/// Per-frame controller update and cancellable render activity.
pub mod render_loop;

use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::controller::{HERO_MAX_DISTANCE, HERO_MIN_DISTANCE};

use controller::ControllerConfig;
use render_loop::RenderLoopHandle;

/// Role of a viewport on the page, bound by position in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportRole {
    /// First canvas: fixed angle, zoom within a short range.
    Hero,
    /// Fixed camera, interactivity comes from the pointer light alone.
    Detail,
    /// Third canvas: horizontal look-around only.
    Panorama,
}

impl ViewportRole {
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => Self::Hero,
            2 => Self::Panorama,
            _ => Self::Detail,
        }
    }

    pub fn controller_config(self) -> ControllerConfig {
        match self {
            Self::Hero => ControllerConfig {
                enable_zoom: true,
                distance_limits: Some((HERO_MIN_DISTANCE, HERO_MAX_DISTANCE)),
                ..ControllerConfig::LOCKED
            },
            Self::Detail => ControllerConfig::LOCKED,
            Self::Panorama => ControllerConfig::HORIZONTAL_ORBIT,
        }
    }
}

/// Window entity bound to one page canvas.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewportSurface {
    pub index: usize,
}

#[derive(Component, Debug, Clone)]
pub struct ViewportCamera {
    pub viewport: usize,
    /// Output surface size after the last resize, in physical pixels.
    pub surface_size: UVec2,
    /// Number of projection updates issued by the resize handler.
    pub projection_updates: u32,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct ViewportLight {
    pub viewport: usize,
}

/// Root of one viewport's clone of the shared model.
#[derive(Component, Debug, Clone, Copy)]
pub struct ViewportModel {
    pub viewport: usize,
}

/// Everything one canvas needs, by entity.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub index: usize,
    /// Canvas selector the surface is bound to.
    pub id: String,
    pub role: ViewportRole,
    pub surface: Entity,
    pub camera: Entity,
    pub light: Entity,
    /// `None` when the model failed to load.
    pub model: Option<Entity>,
    pub layer: usize,
    pub render_loop: RenderLoopHandle,
}

impl Viewport {
    pub fn render_layers(&self) -> RenderLayers {
        RenderLayers::layer(self.layer)
    }

    /// Stop this viewport's render loop. The camera switches off next frame.
    pub fn stop(&self) {
        self.render_loop.cancel();
    }
}

/// All viewports, in canvas order.
#[derive(Resource, Debug, Default)]
pub struct Viewports {
    list: Vec<Viewport>,
}

impl Viewports {
    pub fn push(&mut self, viewport: Viewport) {
        self.list.push(viewport);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Viewport> {
        self.list.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Viewport> {
        self.list.get(index)
    }

    pub fn by_surface(&self, surface: Entity) -> Option<&Viewport> {
        self.list.iter().find(|v| v.surface == surface)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn stop_all(&self) {
        for viewport in &self.list {
            viewport.stop();
        }
    }
}

/// Viewport surfaces, factory, controllers and render loops.
pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        use crate::engine::ShowcaseSet;

        app.init_resource::<Viewports>()
            .add_systems(Startup, factory::spawn_surfaces)
            .add_systems(Update, factory::build_viewports.in_set(ShowcaseSet::Build))
            .add_systems(
                Update,
                render_loop::drive_render_loops.in_set(ShowcaseSet::Render),
            )
            .add_systems(Last, render_loop::stop_on_exit);
    }
}

/// Mouse gestures for the orbit controllers; needs windowing input.
pub struct OrbitInputPlugin;

impl Plugin for OrbitInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            controller::orbit_input.in_set(crate::engine::ShowcaseSet::Input),
        );
    }
}

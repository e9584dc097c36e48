//! Surface sizes are owned by Bevy: winit (and `fit_canvas_to_parent` on the
//! web) resizes each window. These systems only keep the cameras in step with
//! their window.

use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::engine::viewport::factory::aspect_ratio;
use crate::engine::viewport::{ViewportCamera, Viewports};
use crate::page::PageResized;

/// Set the perspective aspect for a `width` x `height` surface. Returns
/// `false` and leaves the projection alone for a collapsed surface.
pub fn update_projection(projection: &mut Projection, width: f32, height: f32) -> bool {
    let Some(aspect) = aspect_ratio(width, height) else {
        return false;
    };
    match projection {
        Projection::Perspective(perspective) => {
            perspective.aspect_ratio = aspect;
            true
        }
        _ => false,
    }
}

/// For each page resize, refresh every viewport's projection and surface size
/// from its own window.
pub fn fan_out_resize(
    mut resized: EventReader<PageResized>,
    viewports: Res<Viewports>,
    windows: Query<&Window>,
    mut cameras: Query<(&mut Projection, &mut ViewportCamera)>,
) {
    for _ in resized.read() {
        for viewport in viewports.iter() {
            let Ok(window) = windows.get(viewport.surface) else {
                continue;
            };
            let Ok((mut projection, mut camera)) = cameras.get_mut(viewport.camera) else {
                continue;
            };
            if update_projection(&mut projection, window.width(), window.height()) {
                camera.projection_updates += 1;
            }
            camera.surface_size = window.physical_size();
        }
    }
}

/// A page resize can arrive before winit has resized a canvas, leaving the
/// page handler with a stale size. Follow the window's own resize as well. This
/// does not count as a page-driven projection update.
pub fn follow_surface_resize(
    mut resized: EventReader<WindowResized>,
    viewports: Res<Viewports>,
    windows: Query<&Window>,
    mut cameras: Query<(&mut Projection, &mut ViewportCamera)>,
) {
    for ev in resized.read() {
        let Some(viewport) = viewports.by_surface(ev.window) else {
            continue;
        };
        let Ok((mut projection, mut camera)) = cameras.get_mut(viewport.camera) else {
            continue;
        };
        update_projection(&mut projection, ev.width, ev.height);
        if let Ok(window) = windows.get(ev.window) {
            camera.surface_size = window.physical_size();
        }
    }
}

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;

use super::Viewports;
use super::controller::OrbitController;

/// Cancel handle for one viewport's render loop. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct RenderLoopHandle(Arc<AtomicBool>);

impl RenderLoopHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-camera frame bookkeeping.
#[derive(Component, Debug, Default)]
pub struct RenderLoop {
    pub frames: u64,
}

/// Per frame and per viewport: advance the controller, then leave the camera
/// active so it renders this frame. Cancelled loops switch the camera off.
pub fn drive_render_loops(
    viewports: Res<Viewports>,
    mut cameras: Query<(&mut OrbitController, &mut Transform, &mut Camera, &mut RenderLoop)>,
) {
    for viewport in viewports.iter() {
        let Ok((mut controller, mut transform, mut camera, mut render_loop)) =
            cameras.get_mut(viewport.camera)
        else {
            continue;
        };

        if viewport.render_loop.is_cancelled() {
            if camera.is_active {
                info!("Render loop for {} stopped", viewport.id);
                camera.is_active = false;
            }
            continue;
        }

        controller.update(&mut transform);
        camera.is_active = true;
        render_loop.frames += 1;
    }
}

/// Cancel every render loop once the app is asked to exit.
pub fn stop_on_exit(mut exit: EventReader<AppExit>, viewports: Res<Viewports>) {
    if exit.read().last().is_some() {
        viewports.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelling_a_clone_cancels_the_original() {
        let handle = RenderLoopHandle::default();
        let clone = handle.clone();
        assert!(!handle.is_cancelled());
        clone.cancel();
        assert!(handle.is_cancelled());
    }
}

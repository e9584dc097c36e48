use bevy::prelude::*;
use bevy::window::PresentMode;

/// Window bound to one page canvas.
pub fn create_surface_window(canvas: &str, index: usize) -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = index;
        Window {
            canvas: Some(canvas.into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: format!("Atlas showcase {} ({})", index + 1, canvas),
            transparent: true,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

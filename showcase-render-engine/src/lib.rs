//! Multi-canvas glTF showcase: one shared model rendered into several page
//! canvases, with pointer-following lights and scroll-driven transitions.

pub mod engine;
pub mod page;

pub use engine::core::app_setup::create_app;

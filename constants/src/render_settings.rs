use bevy::math::Vec3;

/// Vertical field of view of every viewport camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;

pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

/// Hero camera start position, looking at the model origin.
pub const HERO_CAMERA_POSITION: Vec3 = Vec3::new(4.0, -2.5, 5.0);

/// Default model placement shared by all viewports unless overridden.
pub const MODEL_POSITION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const MODEL_SCALE: f32 = 1.0;

/// Number of canvases the page lays out.
pub const VIEWPORT_COUNT: usize = 3;

/// First render layer handed to viewport 0; layer 0 stays unused so stray
/// entities never leak into a viewport.
pub const FIRST_VIEWPORT_LAYER: usize = 1;

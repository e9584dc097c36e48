use bevy::math::Vec3;

/// Very dim white fill, roughly three.js ambient intensity 0.05.
pub const AMBIENT_BRIGHTNESS: f32 = 40.0;

/// Point light intensity in lumens when a viewport config omits it.
pub const DEFAULT_POINT_LIGHT_INTENSITY: f32 = 250_000.0;

pub const POINT_LIGHT_RANGE: f32 = 10.0;

/// Where the light sits before the first pointer move.
pub const POINT_LIGHT_START: Vec3 = Vec3::new(0.0, 3.0, 3.0);

/// Environment map intensity when one is configured.
pub const ENVIRONMENT_MAP_INTENSITY: f32 = 900.0;

/// Orbit damping per update.
pub const DAMPING_FACTOR: f32 = 0.05;

/// Hero viewport zoom clamp.
pub const HERO_MIN_DISTANCE: f32 = 4.5;
pub const HERO_MAX_DISTANCE: f32 = 6.0;

/// Radians of azimuth per pixel of drag, scaled by surface height.
pub const ROTATE_SPEED: f32 = 1.0;

/// Zoom scale applied per wheel line.
pub const ZOOM_STEP: f32 = 0.95;

pub const PAN_SPEED: f32 = 1.0;

/// Keeps the polar angle off the poles when no lock is configured.
pub const POLAR_EPSILON: f32 = 1.0e-4;

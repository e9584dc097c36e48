/// Normalised pointer coordinates are multiplied by this to place the light.
pub const LIGHT_TRAVEL: f32 = 5.0;

/// Fixed depth of the pointer-driven light.
pub const LIGHT_DEPTH: f32 = 5.0;

/// Duration of the smoothed light transition, in seconds.
pub const LIGHT_TWEEN_SECONDS: f32 = 0.5;

/// Shared model scene, decoded once and cloned into every viewport.
pub const MODEL_SCENE_PATH: &str = "atlas.glb#Scene0";

/// Environment variable that points native builds at an alternative config.
pub const CONFIG_OVERRIDE_ENV: &str = "SHOWCASE_CONFIG";

/// Selector of the heading split into per-character spans.
pub const MARQUEE_SELECTOR: &str = ".marquee h1";

pub const MARQUEE_CHAR_CLASS: &str = "marquee-char";

use bevy::prelude::*;
use constants::lighting::{AMBIENT_BRIGHTNESS, DEFAULT_POINT_LIGHT_INTENSITY, ENVIRONMENT_MAP_INTENSITY};
use constants::path::{MARQUEE_SELECTOR, MODEL_SCENE_PATH};
use constants::render_settings::{HERO_CAMERA_POSITION, MODEL_POSITION, MODEL_SCALE, VIEWPORT_COUNT};
use serde::{Deserialize, Serialize};

use crate::engine::error::ConfigError;
use crate::engine::scroll::binding::ScrollBinding;

/// Page config shipped with the wasm bundle.
pub const EMBEDDED_CONFIG: &str = include_str!("../../assets/showcase.json");

/// Everything the page tells the engine: which canvases exist, where the
/// model sits in each, and which scroll bindings drive it.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub model_path: String,
    pub environment_map: Option<EnvironmentMapConfig>,
    pub ambient_brightness: f32,
    pub marquee_selector: String,
    /// Trigger sections in document order.
    pub sections: Vec<String>,
    pub viewports: Vec<ViewportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentMapConfig {
    pub diffuse: String,
    pub specular: String,
    #[serde(default = "default_environment_intensity")]
    pub intensity: f32,
}

fn default_environment_intensity() -> f32 {
    ENVIRONMENT_MAP_INTENSITY
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Canvas selector, e.g. `#canvas2`.
    pub canvas: String,
    pub light_intensity: f32,
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub placement: Placement,
    pub bindings: Vec<ScrollBinding>,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            canvas: "#canvas".into(),
            light_intensity: DEFAULT_POINT_LIGHT_INTENSITY,
            camera_position: Vec3::new(0.0, 0.0, 5.0),
            camera_target: Vec3::ZERO,
            placement: Placement::default(),
            bindings: Vec::new(),
        }
    }
}

/// Per-viewport transform applied to that viewport's clone of the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: MODEL_POSITION,
            rotation: Vec3::ZERO,
            scale: MODEL_SCALE,
        }
    }
}

impl Placement {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
            .with_rotation(Quat::from_euler(
                EulerRot::XYZ,
                self.rotation.x,
                self.rotation.y,
                self.rotation.z,
            ))
            .with_scale(Vec3::splat(self.scale))
    }
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            model_path: MODEL_SCENE_PATH.into(),
            environment_map: None,
            ambient_brightness: AMBIENT_BRIGHTNESS,
            marquee_selector: MARQUEE_SELECTOR.into(),
            sections: vec![
                ".section-one".into(),
                ".section-two".into(),
                ".section-three".into(),
            ],
            viewports: vec![
                ViewportConfig {
                    canvas: "#canvas".into(),
                    camera_position: HERO_CAMERA_POSITION,
                    ..default()
                },
                ViewportConfig {
                    canvas: "#canvas2".into(),
                    ..default()
                },
                ViewportConfig {
                    canvas: "#canvas3".into(),
                    ..default()
                },
            ],
        }
    }
}

/// Where the active config came from, reported once logging is up.
#[derive(Resource, Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Embedded,
    File(String),
    /// Config was rejected; the message says why.
    Defaults(String),
}

impl ShowcaseConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.viewports.is_empty() {
            return Err(ConfigError::NoViewports { found: 0 });
        }
        Ok(config)
    }

    /// Resolve the config for this run. Never fails: a broken config falls
    /// back to the built-in defaults.
    pub fn load() -> (Self, ConfigSource) {
        match Self::load_source() {
            Ok(loaded) => loaded,
            Err(err) => (Self::default(), ConfigSource::Defaults(err.to_string())),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn load_source() -> Result<(Self, ConfigSource), ConfigError> {
        use constants::path::CONFIG_OVERRIDE_ENV;

        match std::env::var(CONFIG_OVERRIDE_ENV) {
            Ok(path) => {
                let json = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                Ok((Self::from_json(&json)?, ConfigSource::File(path)))
            }
            Err(_) => Ok((Self::from_json(EMBEDDED_CONFIG)?, ConfigSource::Embedded)),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn load_source() -> Result<(Self, ConfigSource), ConfigError> {
        Ok((Self::from_json(EMBEDDED_CONFIG)?, ConfigSource::Embedded))
    }
}

pub fn report_config_source(source: Res<ConfigSource>, config: Res<ShowcaseConfig>) {
    match source.as_ref() {
        ConfigSource::Embedded => info!(
            "Using embedded showcase config ({} viewports)",
            config.viewports.len()
        ),
        ConfigSource::File(path) => info!(
            "Using showcase config from {} ({} viewports)",
            path,
            config.viewports.len()
        ),
        ConfigSource::Defaults(reason) => {
            warn!("Showcase config rejected, using defaults: {}", reason)
        }
    }
    if config.viewports.len() != VIEWPORT_COUNT {
        warn!(
            "Page lays out {} canvases, config has {} viewports",
            VIEWPORT_COUNT,
            config.viewports.len()
        );
    }
}

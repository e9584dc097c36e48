use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;
use bevy::render::camera::RenderTarget;
use bevy::render::view::RenderLayers;
use bevy::scene::SceneInstanceReady;
use bevy::window::WindowRef;
use constants::lighting::{POINT_LIGHT_RANGE, POINT_LIGHT_START};
use constants::render_settings::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, FIRST_VIEWPORT_LAYER};

use super::controller::OrbitController;
use super::render_loop::{RenderLoop, RenderLoopHandle};
use super::{Viewport, ViewportCamera, ViewportLight, ViewportModel, ViewportRole, ViewportSurface, Viewports};
use crate::engine::config::{ShowcaseConfig, ViewportConfig};
use crate::engine::core::window_config::create_surface_window;
use crate::engine::interaction::light_tween::LightTween;
use crate::engine::loading::ModelLoadResolved;
use crate::engine::scroll::binding::EulerRotation;
use crate::engine::scroll::registrar::register_bindings;
use crate::engine::scroll::timeline::ScrollTimeline;

/// Environment map images shared by every viewport camera.
#[derive(Debug, Clone)]
pub struct EnvironmentHandles {
    pub diffuse: Handle<Image>,
    pub specular: Handle<Image>,
    pub intensity: f32,
}

/// Width over height, or `None` for a collapsed surface.
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    (width > 0.0 && height > 0.0).then(|| width / height)
}

pub fn perspective(aspect_ratio: f32) -> PerspectiveProjection {
    PerspectiveProjection {
        fov: CAMERA_FOV_DEGREES.to_radians(),
        aspect_ratio,
        near: CAMERA_NEAR,
        far: CAMERA_FAR,
    }
}

/// One window per configured canvas, spawned up front.
pub fn spawn_surfaces(mut commands: Commands, config: Res<ShowcaseConfig>) {
    for (index, viewport) in config.viewports.iter().enumerate() {
        commands.spawn((
            create_surface_window(&viewport.canvas, index),
            ViewportSurface { index },
            Name::new(format!("surface {}", viewport.canvas)),
        ));
    }
}

/// Wire camera, light, controller and model clone into one surface.
pub fn spawn_viewport(
    commands: &mut Commands,
    index: usize,
    surface: Entity,
    window: &Window,
    config: &ViewportConfig,
    model: Option<&Handle<Scene>>,
    environment: Option<&EnvironmentHandles>,
) -> Viewport {
    let layer = FIRST_VIEWPORT_LAYER + index;
    let layers = RenderLayers::layer(layer);
    let role = ViewportRole::for_index(index);
    let aspect = aspect_ratio(window.width(), window.height()).unwrap_or(1.0);

    let mut camera = commands.spawn((
        Name::new(format!("{} camera", config.canvas)),
        Camera3d::default(),
        Camera {
            target: RenderTarget::Window(WindowRef::Entity(surface)),
            clear_color: ClearColorConfig::Custom(Color::NONE),
            order: index as isize,
            ..default()
        },
        Projection::Perspective(perspective(aspect)),
        Transform::from_translation(config.camera_position).looking_at(config.camera_target, Vec3::Y),
        OrbitController::new(
            role.controller_config(),
            config.camera_position,
            config.camera_target,
        ),
        ViewportCamera {
            viewport: index,
            surface_size: window.physical_size(),
            projection_updates: 0,
        },
        RenderLoop::default(),
        layers.clone(),
    ));
    if let Some(env) = environment {
        camera.insert(EnvironmentMapLight {
            diffuse_map: env.diffuse.clone(),
            specular_map: env.specular.clone(),
            intensity: env.intensity,
            ..default()
        });
    }
    let camera = camera.id();

    let light = commands
        .spawn((
            Name::new(format!("{} light", config.canvas)),
            PointLight {
                intensity: config.light_intensity,
                range: POINT_LIGHT_RANGE,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(POINT_LIGHT_START),
            EulerRotation::default(),
            LightTween::resting_at(POINT_LIGHT_START),
            ViewportLight { viewport: index },
            layers.clone(),
        ))
        .id();

    let model = model.map(|scene| {
        commands
            .spawn((
                Name::new(format!("{} model", config.canvas)),
                SceneRoot(scene.clone()),
                config.placement.transform(),
                EulerRotation(config.placement.rotation),
                ViewportModel { viewport: index },
                layers.clone(),
            ))
            .observe(adopt_viewport_layer)
            .id()
    });

    Viewport {
        index,
        id: config.canvas.clone(),
        role,
        surface,
        camera,
        light,
        model,
        layer,
        render_loop: RenderLoopHandle::default(),
    }
}

/// Scene instances spawn their meshes as children of the root; copy the
/// root's layer down so only the owning viewport draws them.
fn adopt_viewport_layer(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    children: Query<&Children>,
    layers: Query<&RenderLayers>,
) {
    let root = trigger.target();
    let Ok(layer) = layers.get(root) else {
        return;
    };
    for descendant in children.iter_descendants(root) {
        commands.entity(descendant).insert(layer.clone());
    }
}

/// Build every viewport once the shared model resolves. A failed load still
/// builds the viewports; they just have no model.
pub fn build_viewports(
    mut commands: Commands,
    mut resolved: EventReader<ModelLoadResolved>,
    config: Res<ShowcaseConfig>,
    surfaces: Query<(Entity, &ViewportSurface, &Window)>,
    asset_server: Option<Res<AssetServer>>,
    mut viewports: ResMut<Viewports>,
    mut timeline: ResMut<ScrollTimeline>,
) {
    let Some(ModelLoadResolved(outcome)) = resolved.read().last() else {
        return;
    };
    if !viewports.is_empty() {
        return;
    }

    let model = outcome.as_ref().ok();

    let environment = match (&config.environment_map, asset_server) {
        (Some(env), Some(server)) => Some(EnvironmentHandles {
            diffuse: server.load(&env.diffuse),
            specular: server.load(&env.specular),
            intensity: env.intensity,
        }),
        _ => None,
    };

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: config.ambient_brightness,
        ..default()
    });

    let mut ordered: Vec<_> = surfaces.iter().collect();
    ordered.sort_by_key(|(_, surface, _)| surface.index);

    for (entity, surface, window) in ordered {
        let Some(viewport_config) = config.viewports.get(surface.index) else {
            continue;
        };
        let viewport = spawn_viewport(
            &mut commands,
            surface.index,
            entity,
            window,
            viewport_config,
            model,
            environment.as_ref(),
        );
        let registered = register_bindings(&viewport, viewport_config, &mut timeline);
        info!(
            "Viewport {} ready ({:?}, {} scroll bindings, model: {})",
            viewport.id,
            viewport.role,
            registered,
            viewport.model.is_some()
        );
        viewports.push(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_rejects_collapsed_surfaces() {
        assert_eq!(aspect_ratio(1600.0, 800.0), Some(2.0));
        assert_eq!(aspect_ratio(800.0, 0.0), None);
        assert_eq!(aspect_ratio(0.0, 600.0), None);
    }

    #[test]
    fn perspective_uses_fixed_lens() {
        let projection = perspective(1.5);
        assert!((projection.fov - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(projection.near, 0.1);
        assert_eq!(projection.far, 1000.0);
        assert_eq!(projection.aspect_ratio, 1.5);
    }
}

use std::time::Duration;

use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::window::WindowResized;
use constants::lighting::POINT_LIGHT_START;

use showcase_render_engine::engine::ShowcasePlugin;
use showcase_render_engine::engine::config::{EMBEDDED_CONFIG, ShowcaseConfig};
use showcase_render_engine::engine::core::app_state::AppState;
use showcase_render_engine::engine::error::LoadError;
use showcase_render_engine::engine::interaction::light_tween::LightTween;
use showcase_render_engine::engine::interaction::pointer::{PointerFanout, light_target, normalize_pointer};
use showcase_render_engine::engine::loading::ModelLoadResolved;
use showcase_render_engine::engine::scroll::binding::{EulerRotation, ScrollBinding};
use showcase_render_engine::engine::scroll::timeline::ScrollTimeline;
use showcase_render_engine::engine::viewport::render_loop::RenderLoop;
use showcase_render_engine::engine::viewport::{ViewportCamera, ViewportSurface, Viewports};
use showcase_render_engine::page::{PagePointerMoved, PageResized, PageScrolled};

const SHARED_MODEL: Handle<Scene> = Handle::weak_from_u128(0x5ca1_ab1e_a71a_5000);

fn embedded_config() -> ShowcaseConfig {
    ShowcaseConfig::from_json(EMBEDDED_CONFIG).unwrap()
}

fn headless_app_with(config: ShowcaseConfig) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
        .insert_resource(config)
        .add_plugins(ShowcasePlugin);
    app.update();
    app
}

fn headless_app() -> App {
    headless_app_with(embedded_config())
}

fn resolve(app: &mut App, outcome: Result<Handle<Scene>, LoadError>) {
    app.world_mut().send_event(ModelLoadResolved(outcome));
    app.update();
}

fn loaded_app_with(config: ShowcaseConfig) -> App {
    let mut app = headless_app_with(config);
    resolve(&mut app, Ok(SHARED_MODEL));
    app.update();
    app
}

fn loaded_app() -> App {
    loaded_app_with(embedded_config())
}

fn scroll_to(app: &mut App, scroll_y: f32) {
    app.world_mut().send_event(PageScrolled { scroll_y });
}

fn euler(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<EulerRotation>(entity).unwrap().0
}

fn model_of(app: &App, index: usize) -> Entity {
    app.world()
        .resource::<Viewports>()
        .get(index)
        .unwrap()
        .model
        .unwrap()
}

fn viewport_entities(app: &App) -> Vec<(Entity, Entity, Entity, Option<Entity>)> {
    app.world()
        .resource::<Viewports>()
        .iter()
        .map(|v| (v.surface, v.camera, v.light, v.model))
        .collect()
}

fn transform(app: &App, entity: Entity) -> Transform {
    *app.world().get::<Transform>(entity).unwrap()
}

#[test]
fn surfaces_exist_before_the_model_resolves() {
    let mut app = headless_app();
    let surfaces = app
        .world_mut()
        .query::<&ViewportSurface>()
        .iter(app.world())
        .count();
    assert_eq!(surfaces, 3);
    assert!(app.world().resource::<Viewports>().is_empty());
    assert_eq!(
        app.world().resource::<State<AppState>>().get(),
        &AppState::Loading
    );
}

#[test]
fn loaded_model_brings_three_viewports_to_life() {
    let mut app = loaded_app();
    app.update();

    assert_eq!(
        app.world().resource::<State<AppState>>().get(),
        &AppState::Running
    );

    let viewports = viewport_entities(&app);
    assert_eq!(viewports.len(), 3);
    for (_, camera, _, model) in &viewports {
        let camera_state = app.world().get::<Camera>(*camera).unwrap();
        assert!(camera_state.is_active);
        assert!(app.world().get::<RenderLoop>(*camera).unwrap().frames > 0);

        let model = model.expect("model attached");
        assert_eq!(
            app.world().get::<SceneRoot>(model).unwrap().0,
            SHARED_MODEL
        );
    }
}

#[test]
fn each_viewport_draws_its_own_layer() {
    let app = loaded_app();
    let mut seen = Vec::new();
    for viewport in app.world().resource::<Viewports>().iter() {
        let (camera, light, model) = (viewport.camera, viewport.light, viewport.model);
        let layers = app.world().get::<RenderLayers>(camera).unwrap().clone();
        assert_eq!(layers, viewport.render_layers());
        assert_eq!(app.world().get::<RenderLayers>(light), Some(&layers));
        assert_eq!(app.world().get::<RenderLayers>(model.unwrap()), Some(&layers));
        assert!(!seen.contains(&layers));
        seen.push(layers);
    }
}

#[test]
fn model_clones_are_independent() {
    let mut app = loaded_app();
    let models: Vec<Entity> = viewport_entities(&app)
        .into_iter()
        .map(|(_, _, _, model)| model.unwrap())
        .collect();
    let before: Vec<Transform> = models.iter().map(|m| transform(&app, *m)).collect();

    app.world_mut()
        .get_mut::<Transform>(models[1])
        .unwrap()
        .translation
        .z = 9.0;
    app.world_mut().get_mut::<Transform>(models[1]).unwrap().scale = Vec3::splat(3.0);
    app.update();

    assert_eq!(transform(&app, models[1]).translation.z, 9.0);
    assert_eq!(transform(&app, models[1]).scale, Vec3::splat(3.0));
    for i in [0, 2] {
        let after = transform(&app, models[i]);
        assert_eq!(after.translation.z, before[i].translation.z);
        assert_eq!(after.scale, before[i].scale);
    }
}

#[test]
fn failed_load_builds_empty_viewports() {
    let mut app = headless_app();
    resolve(
        &mut app,
        Err(LoadError::Failed {
            path: "atlas.glb#Scene0".into(),
            reason: "file not found".into(),
        }),
    );

    let viewports = app.world().resource::<Viewports>();
    assert_eq!(viewports.len(), 3);
    assert!(viewports.iter().all(|v| v.model.is_none()));
    // Every configured binding targets a model, so nothing is registered.
    assert!(app.world().resource::<ScrollTimeline>().is_empty());
}

#[test]
fn pointer_before_viewports_is_a_no_op() {
    let mut app = headless_app();
    app.world_mut().send_event(PagePointerMoved {
        position: Vec2::new(10.0, 10.0),
        page_size: Vec2::new(100.0, 100.0),
    });
    app.update();
    assert!(!app.world().resource::<PointerFanout>().is_pending());
}

#[test]
fn pointer_burst_moves_every_light_once() {
    let mut app = loaded_app();
    let page = Vec2::new(1200.0, 800.0);
    let scheduled_before = app.world().resource::<PointerFanout>().scheduled();

    for i in 0..25 {
        app.world_mut().send_event(PagePointerMoved {
            position: Vec2::new(40.0 * i as f32, 20.0 * i as f32),
            page_size: page,
        });
    }
    app.update();

    let fanout = app.world().resource::<PointerFanout>();
    assert_eq!(fanout.scheduled() - scheduled_before, 1);
    assert!(!fanout.is_pending());

    let last = normalize_pointer(Vec2::new(40.0 * 24.0, 20.0 * 24.0), page).unwrap();
    for (_, _, light, _) in viewport_entities(&app) {
        let tween = app.world().get::<LightTween>(light).unwrap();
        assert_eq!(tween.destination(), light_target(last));
    }

    for _ in 0..60 {
        app.update();
    }
    for (_, _, light, _) in viewport_entities(&app) {
        assert!(transform(&app, light).translation.distance(light_target(last)) < 1e-4);
    }
}

#[test]
fn resize_updates_each_projection_once_per_event() {
    let mut app = loaded_app();
    let viewports = viewport_entities(&app);

    for (surface, _, _, _) in &viewports {
        app.world_mut()
            .get_mut::<Window>(*surface)
            .unwrap()
            .resolution
            .set(1000.0, 400.0);
    }
    app.world_mut().send_event(PageResized {
        width: 1000.0,
        height: 400.0,
    });
    app.update();

    for (_, camera, _, _) in &viewports {
        let Projection::Perspective(perspective) = app.world().get::<Projection>(*camera).unwrap()
        else {
            panic!("viewport cameras use perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, 1000.0 / 400.0);
        let camera = app.world().get::<ViewportCamera>(*camera).unwrap();
        assert_eq!(camera.projection_updates, 1);
        assert_eq!(camera.surface_size, UVec2::new(1000, 400));
    }

    // Two resizes in one frame, two updates per viewport. Same size again,
    // same aspect.
    for _ in 0..2 {
        app.world_mut().send_event(PageResized {
            width: 1000.0,
            height: 400.0,
        });
    }
    app.update();
    for (_, camera, _, _) in &viewports {
        assert_eq!(
            app.world().get::<ViewportCamera>(*camera).unwrap().projection_updates,
            3
        );
        let Projection::Perspective(perspective) = app.world().get::<Projection>(*camera).unwrap()
        else {
            panic!("viewport cameras use perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, 2.5);
    }
}

#[test]
fn scrolling_section_one_drives_the_hero_model_toward_its_target() {
    let mut app = loaded_app();
    let hero = app.world().resource::<Viewports>().get(0).unwrap().model.unwrap();
    let timeline = app.world().resource::<ScrollTimeline>();
    assert_eq!(timeline.for_viewport(0).count(), 2);
    assert!(timeline.for_viewport(0).all(|b| b.entity == hero));
    let start = transform(&app, hero);
    assert_eq!(start.translation.x, 0.0);

    let target_x = -2.5;
    let mut last_x = start.translation.x;
    let mut last_yaw = 0.0;

    // Section one spans the first 720 px of scroll.
    for step in 1..=12 {
        app.world_mut().send_event(PageScrolled {
            scroll_y: step as f32 * 60.0,
        });
        for _ in 0..5 {
            app.update();
            let current = transform(&app, hero);
            let (_, yaw, _) = current.rotation.to_euler(EulerRot::XYZ);
            assert!(current.translation.x <= last_x + 1e-6);
            assert!(current.translation.x >= target_x - 1e-6);
            assert!(yaw >= last_yaw - 1e-6);
            last_x = current.translation.x;
            last_yaw = yaw;
        }
    }

    for _ in 0..300 {
        app.update();
    }
    let end = transform(&app, hero);
    assert!((end.translation.x - target_x).abs() < 1e-3);
    let (_, yaw, _) = end.rotation.to_euler(EulerRot::XYZ);
    assert!((yaw - 0.8).abs() < 1e-3);

    // Other viewports are bound to later sections and have not moved.
    let detail = app.world().resource::<Viewports>().get(1).unwrap().model.unwrap();
    assert_eq!(transform(&app, detail).translation.x, 0.0);
}

#[test]
fn stopped_render_loop_switches_its_camera_off() {
    let mut app = loaded_app();
    let (camera_1, camera_2) = {
        let viewports = app.world().resource::<Viewports>();
        viewports.get(1).unwrap().stop();
        (
            viewports.get(1).unwrap().camera,
            viewports.get(2).unwrap().camera,
        )
    };
    app.update();
    let frozen = app.world().get::<RenderLoop>(camera_1).unwrap().frames;
    let running = app.world().get::<RenderLoop>(camera_2).unwrap().frames;
    app.update();

    assert!(!app.world().get::<Camera>(camera_1).unwrap().is_active);
    assert_eq!(app.world().get::<RenderLoop>(camera_1).unwrap().frames, frozen);
    assert!(app.world().get::<Camera>(camera_2).unwrap().is_active);
    assert_eq!(
        app.world().get::<RenderLoop>(camera_2).unwrap().frames,
        running + 1
    );
}

#[test]
fn exit_request_stops_every_render_loop() {
    let mut app = loaded_app();
    app.world_mut().send_event(AppExit::Success);
    app.update();
    app.update();
    for (_, camera, _, _) in viewport_entities(&app) {
        assert!(!app.world().get::<Camera>(camera).unwrap().is_active);
    }
}

#[test]
fn surface_resize_keeps_its_camera_in_step() {
    let mut app = loaded_app();
    let viewports = viewport_entities(&app);
    let (surface, camera, _, _) = viewports[0];

    app.world_mut()
        .get_mut::<Window>(surface)
        .unwrap()
        .resolution
        .set(900.0, 300.0);
    app.world_mut().send_event(WindowResized {
        window: surface,
        width: 900.0,
        height: 300.0,
    });
    app.update();

    let Projection::Perspective(perspective) = app.world().get::<Projection>(camera).unwrap() else {
        panic!("viewport cameras use perspective projection");
    };
    assert_eq!(perspective.aspect_ratio, 3.0);
    let state = app.world().get::<ViewportCamera>(camera).unwrap();
    assert_eq!(state.surface_size, UVec2::new(900, 300));
    assert_eq!(state.projection_updates, 0);

    // Other surfaces did not resize.
    for (_, other, _, _) in &viewports[1..] {
        let Projection::Perspective(perspective) = app.world().get::<Projection>(*other).unwrap()
        else {
            panic!("viewport cameras use perspective projection");
        };
        assert_eq!(perspective.aspect_ratio, 1280.0 / 720.0);
    }
}

#[test]
fn scrolling_section_three_spins_the_panorama_half_a_turn() {
    let mut app = loaded_app();
    let panorama = model_of(&app, 2);
    let half_turn = std::f32::consts::PI;

    // Section three sits at 1440..2160; its markers meet the viewport
    // center between 1080 and 1800.
    let mut last_yaw = euler(&app, panorama).y;
    let mut last_rotation = transform(&app, panorama).rotation;
    assert_eq!(last_yaw, 0.0);

    for step in 0..=18 {
        scroll_to(&mut app, 1080.0 + step as f32 * 40.0);
        for _ in 0..2 {
            app.update();
            let yaw = euler(&app, panorama).y;
            let rotation = transform(&app, panorama).rotation;

            assert!(yaw >= last_yaw);
            assert!(rotation.angle_between(Quat::from_rotation_y(yaw)) < 2e-3);
            // Each scroll step turns the model by π/18 at most, with no fold
            // back once the yaw passes a quarter turn.
            assert!(rotation.angle_between(last_rotation) <= half_turn / 18.0 + 2e-3);

            last_yaw = yaw;
            last_rotation = rotation;
        }
    }

    assert!((last_yaw - half_turn).abs() < 1e-4);
    assert!(last_rotation.angle_between(Quat::from_rotation_y(half_turn)) < 2e-3);
}

#[test]
fn scrolling_section_two_turns_and_lowers_the_detail_model() {
    let mut app = loaded_app();
    let detail = model_of(&app, 1);
    assert!((euler(&app, detail).y + 0.6).abs() < 1e-6);
    assert_eq!(transform(&app, detail).translation.y, -1.0);

    let mut last_yaw = euler(&app, detail).y;
    let mut last_height = transform(&app, detail).translation.y;

    // Section two is in view from 0 to 1440 px of scroll.
    for (scroll_y, yaw, height) in [(720.0, 0.0, -0.75), (1440.0, 0.6, -0.5)] {
        scroll_to(&mut app, scroll_y);
        for _ in 0..400 {
            app.update();
            let current_yaw = euler(&app, detail).y;
            let current_height = transform(&app, detail).translation.y;
            assert!(current_yaw >= last_yaw - 1e-6);
            assert!(current_height >= last_height - 1e-6);
            last_yaw = current_yaw;
            last_height = current_height;
        }
        assert!((last_yaw - yaw).abs() < 1e-3);
        assert!((last_height - height).abs() < 1e-3);
    }

    // The hero's own section was scrolled past, so it sits at its target.
    let hero = model_of(&app, 0);
    assert!((transform(&app, hero).translation.x + 2.5).abs() < 1e-3);
}

#[test]
fn scroll_bound_light_axis_wins_over_the_pointer_tween() {
    let mut config = embedded_config();
    let light_binding: ScrollBinding = serde_json::from_str(
        r#"{
            "target": { "subject": "light", "property": "position", "axis": "y" },
            "trigger": { "section": ".section-one", "start": "top top", "end": "bottom top" },
            "to": -1.0,
            "scrub": true
        }"#,
    )
    .unwrap();
    config.viewports[0].bindings.push(light_binding);

    let mut app = loaded_app_with(config);
    let light = app.world().resource::<Viewports>().get(0).unwrap().light;

    let registered: Vec<_> = app
        .world()
        .resource::<ScrollTimeline>()
        .for_viewport(0)
        .filter(|b| b.entity == light)
        .map(|b| b.from)
        .collect();
    assert_eq!(registered, vec![POINT_LIGHT_START.y]);

    // Halfway through section one, in the same frame as a pointer burst.
    let page = Vec2::new(1000.0, 1000.0);
    scroll_to(&mut app, 360.0);
    for i in 0..10 {
        app.world_mut().send_event(PagePointerMoved {
            position: Vec2::new(100.0 * i as f32, 50.0 * i as f32),
            page_size: page,
        });
    }
    app.update();

    let pointer_target = light_target(normalize_pointer(Vec2::new(900.0, 450.0), page).unwrap());
    let expected_y = POINT_LIGHT_START.y + (-1.0 - POINT_LIGHT_START.y) * 0.5;
    assert_eq!(
        app.world().get::<LightTween>(light).unwrap().destination(),
        pointer_target
    );
    assert!((transform(&app, light).translation.y - expected_y).abs() < 1e-5);

    for _ in 0..60 {
        app.update();
        assert!((transform(&app, light).translation.y - expected_y).abs() < 1e-5);
    }
    let settled = transform(&app, light).translation;
    assert!((settled.x - pointer_target.x).abs() < 1e-4);
    assert!((settled.z - pointer_target.z).abs() < 1e-4);

    // Lights of the other viewports have no binding and follow the pointer fully.
    let other = app.world().resource::<Viewports>().get(1).unwrap().light;
    assert!(transform(&app, other).translation.distance(pointer_target) < 1e-4);
}

use bevy::asset::AssetMetaCheck;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::ExitCondition;

use crate::engine::ShowcasePlugin;
use crate::engine::config::{ShowcaseConfig, report_config_source};
use crate::engine::loading::ModelLoadingPlugin;
use crate::engine::viewport::OrbitInputPlugin;
use crate::page::PageBridgePlugin;
use crate::page::marquee::split_marquee_heading;

pub fn create_app() -> App {
    let (config, source) = ShowcaseConfig::load();

    let mut app = App::new();

    // Config must be in place before the plugins that read it are built.
    app.insert_resource(config)
        .insert_resource(source)
        .add_plugins(create_default_plugins())
        .add_plugins(ShowcasePlugin)
        .add_plugins(ModelLoadingPlugin)
        .add_plugins(OrbitInputPlugin)
        .add_plugins(PageBridgePlugin)
        .add_systems(Startup, (report_config_source, split_marquee_heading));

    app
}

fn create_default_plugins() -> impl PluginGroup {
    // Surfaces are spawned per canvas, there is no primary window.
    let window_config = WindowPlugin {
        primary_window: None,
        exit_condition: ExitCondition::OnAllClosed,
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: "wgpu=error,naga=warn,bevy_render=warn".into(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}

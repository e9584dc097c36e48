use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::engine::config::ShowcaseConfig;
use crate::engine::error::LoadError;

/// The one decoded copy of the model every viewport clones from.
#[derive(Resource, Debug, Clone)]
pub struct SharedModel {
    pub path: String,
    pub handle: Handle<Scene>,
}

/// Fired once, when the shared model finishes loading or fails.
#[derive(Event, Debug, Clone)]
pub struct ModelLoadResolved(pub Result<Handle<Scene>, LoadError>);

pub fn start_model_load(
    mut commands: Commands,
    config: Res<ShowcaseConfig>,
    asset_server: Res<AssetServer>,
) {
    info!("Loading model from: {}", config.model_path);
    let handle: Handle<Scene> = asset_server.load(&config.model_path);
    commands.insert_resource(SharedModel {
        path: config.model_path.clone(),
        handle,
    });
}

/// Map an asset load state onto the showcase's load result. `None` while the
/// load is still in flight.
pub fn resolve_load_state(
    model: &SharedModel,
    state: &LoadState,
) -> Option<Result<Handle<Scene>, LoadError>> {
    match state {
        LoadState::Loaded => Some(Ok(model.handle.clone())),
        LoadState::Failed(err) => Some(Err(LoadError::Failed {
            path: model.path.clone(),
            reason: err.to_string(),
        })),
        _ => None,
    }
}

pub fn poll_model_load(
    model: Option<Res<SharedModel>>,
    asset_server: Res<AssetServer>,
    mut resolved: EventWriter<ModelLoadResolved>,
    mut reported: Local<bool>,
) {
    if *reported {
        return;
    }

    let outcome = match model {
        Some(model) => match asset_server.get_load_state(&model.handle) {
            Some(state) => resolve_load_state(&model, &state),
            None => Some(Err(LoadError::NotRequested {
                path: model.path.clone(),
            })),
        },
        None => return,
    };

    if let Some(outcome) = outcome {
        match &outcome {
            Ok(_) => info!("✓ Model loaded"),
            Err(e) => error!("Error loading the model: {}", e),
        }
        resolved.write(ModelLoadResolved(outcome));
        *reported = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SharedModel {
        SharedModel {
            path: "atlas.glb#Scene0".into(),
            handle: Handle::default(),
        }
    }

    #[test]
    fn pending_states_do_not_resolve() {
        assert!(resolve_load_state(&model(), &LoadState::Loading).is_none());
        assert!(resolve_load_state(&model(), &LoadState::NotLoaded).is_none());
    }

    #[test]
    fn loaded_state_hands_out_the_shared_handle() {
        let model = model();
        let resolved = resolve_load_state(&model, &LoadState::Loaded).unwrap();
        assert_eq!(resolved.unwrap(), model.handle);
    }
}

use bevy::prelude::*;

use crate::engine::viewport::Viewports;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

pub fn transition_to_running(viewports: Res<Viewports>, mut next_state: ResMut<NextState<AppState>>) {
    if !viewports.is_empty() {
        info!("→ {} viewports built, transitioning to Running state", viewports.len());
        next_state.set(AppState::Running);
    }
}

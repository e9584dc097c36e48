use bevy::prelude::*;
use constants::lighting::POINT_LIGHT_START;

use super::binding::{BindingSubject, EulerRotation};
use super::timeline::{ActiveBinding, ScrollTimeline};
use crate::engine::config::ViewportConfig;
use crate::engine::viewport::Viewport;

/// Resolve a viewport's configured bindings to its entities and hand them to
/// the timeline. Returns how many were registered.
///
/// Bindings on the model are skipped when the viewport has no model.
pub fn register_bindings(
    viewport: &Viewport,
    config: &ViewportConfig,
    timeline: &mut ScrollTimeline,
) -> usize {
    let model_start = (config.placement.transform(), EulerRotation(config.placement.rotation));
    let light_start = (
        Transform::from_translation(POINT_LIGHT_START),
        EulerRotation::default(),
    );
    let mut registered = 0;

    for binding in &config.bindings {
        let (entity, start) = match binding.target.subject {
            BindingSubject::Model => match viewport.model {
                Some(model) => (model, &model_start),
                None => continue,
            },
            BindingSubject::Light => (viewport.light, &light_start),
        };

        let from = binding.from.unwrap_or_else(|| binding.target.read(&start.0, &start.1));
        timeline.push(ActiveBinding::new(viewport.index, entity, binding.clone(), from));
        registered += 1;
    }

    registered
}

use bevy::prelude::*;

use super::binding::{EulerRotation, ScrollBinding};
use crate::page::layout::PageLayout;

/// A binding attached to the entity it animates.
#[derive(Debug, Clone)]
pub struct ActiveBinding {
    pub viewport: usize,
    pub entity: Entity,
    pub binding: ScrollBinding,
    pub from: f32,
    /// Smoothed progress actually applied, lags scroll progress when scrubbed.
    pub progress: f32,
    missing_section_reported: bool,
}

impl ActiveBinding {
    pub fn new(viewport: usize, entity: Entity, binding: ScrollBinding, from: f32) -> Self {
        Self {
            viewport,
            entity,
            binding,
            from,
            progress: 0.0,
            missing_section_reported: false,
        }
    }

    /// Step toward the page's current scroll progress. `None` if the trigger
    /// section is not on the page.
    pub fn advance(&mut self, layout: &PageLayout, dt: f32) -> Option<f32> {
        let section = layout.section(&self.binding.trigger.section)?;
        let target =
            self.binding
                .trigger
                .progress(layout.scroll_y, section, layout.viewport_height);
        self.progress = self.binding.scrub.approach(self.progress, target, dt);
        Some(self.binding.sample(self.from, self.progress))
    }
}

/// Every registered scroll binding, evaluated each frame.
#[derive(Resource, Debug, Default)]
pub struct ScrollTimeline {
    bindings: Vec<ActiveBinding>,
}

impl ScrollTimeline {
    pub fn push(&mut self, binding: ActiveBinding) {
        self.bindings.push(binding);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn for_viewport(&self, viewport: usize) -> impl Iterator<Item = &ActiveBinding> {
        self.bindings.iter().filter(move |b| b.viewport == viewport)
    }
}

pub fn advance_scroll_timeline(
    time: Res<Time>,
    layout: Res<PageLayout>,
    mut timeline: ResMut<ScrollTimeline>,
    mut transforms: Query<(&mut Transform, &mut EulerRotation)>,
) {
    let dt = time.delta_secs();
    for active in timeline.bindings.iter_mut() {
        let Some(value) = active.advance(&layout, dt) else {
            if !active.missing_section_reported {
                warn!(
                    "Scroll trigger section {} not found, binding on viewport {} skipped",
                    active.binding.trigger.section, active.viewport
                );
                active.missing_section_reported = true;
            }
            continue;
        };

        if let Ok((mut transform, mut euler)) = transforms.get_mut(active.entity) {
            active.binding.target.write(&mut transform, &mut euler, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scroll::binding::{
        Axis, BindingProperty, BindingSubject, BindingTarget, Easing, Scrub,
    };
    use crate::engine::scroll::trigger::TriggerRegion;

    fn binding(scrub: Scrub) -> ScrollBinding {
        ScrollBinding {
            target: BindingTarget {
                subject: BindingSubject::Model,
                property: BindingProperty::Position,
                axis: Axis::X,
            },
            trigger: TriggerRegion {
                section: ".section-one".into(),
                start: "top top".parse().unwrap(),
                end: "bottom top".parse().unwrap(),
            },
            from: None,
            to: -2.5,
            ease: Easing::Linear,
            scrub,
        }
    }

    fn layout(scroll_y: f32) -> PageLayout {
        let mut layout = PageLayout::stacked(&[".section-one".to_string()], 800.0);
        layout.scroll_y = scroll_y;
        layout
    }

    #[test]
    fn immediate_binding_tracks_scroll() {
        let mut active = ActiveBinding::new(0, Entity::PLACEHOLDER, binding(Scrub::Immediate), 0.0);
        assert_eq!(active.advance(&layout(0.0), 0.016), Some(0.0));
        let half = active.advance(&layout(400.0), 0.016).unwrap();
        assert!((half + 1.25).abs() < 1e-5);
    }

    #[test]
    fn scrubbed_binding_lags_behind() {
        let mut active =
            ActiveBinding::new(0, Entity::PLACEHOLDER, binding(Scrub::Smoothed(1.0)), 0.0);
        let value = active.advance(&layout(800.0), 0.016).unwrap();
        assert!(value < 0.0 && value > -2.5);
    }

    #[test]
    fn missing_section_yields_nothing() {
        let mut active = ActiveBinding::new(0, Entity::PLACEHOLDER, binding(Scrub::Immediate), 0.0);
        let empty = PageLayout::default();
        assert_eq!(active.advance(&empty, 0.016), None);
    }
}

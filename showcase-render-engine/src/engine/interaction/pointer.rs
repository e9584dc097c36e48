use bevy::prelude::*;
use constants::pointer::{LIGHT_DEPTH, LIGHT_TRAVEL};

use super::light_tween::LightTween;
use crate::engine::viewport::Viewports;
use crate::page::PagePointerMoved;

/// Pointer position mapped to `[-1, 1]` on both axes, +Y up.
///
/// The page's top-left corner maps to `(-1, 1)` and its bottom-right corner to
/// `(1, -1)`. Positions outside the page are clamped.
pub fn normalize_pointer(position: Vec2, page_size: Vec2) -> Option<Vec2> {
    if page_size.x <= 0.0 || page_size.y <= 0.0 {
        return None;
    }
    let x = position.x / page_size.x * 2.0 - 1.0;
    let y = -(position.y / page_size.y) * 2.0 + 1.0;
    Some(Vec2::new(x, y).clamp(Vec2::NEG_ONE, Vec2::ONE))
}

/// Light position for a normalised pointer.
pub fn light_target(ndc: Vec2) -> Vec3 {
    Vec3::new(ndc.x * LIGHT_TRAVEL, ndc.y * LIGHT_TRAVEL, LIGHT_DEPTH)
}

/// Coalesces pointer moves into at most one pending light update per frame.
#[derive(Resource, Debug, Default)]
pub struct PointerFanout {
    pending: Option<Vec2>,
    scheduled: u64,
}

impl PointerFanout {
    /// Record a pointer move. Returns `true` if this scheduled a new update,
    /// `false` if it folded into the one already pending.
    pub fn request(&mut self, ndc: Vec2) -> bool {
        let newly_scheduled = self.pending.is_none();
        if newly_scheduled {
            self.scheduled += 1;
        }
        self.pending = Some(ndc);
        newly_scheduled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn take(&mut self) -> Option<Vec2> {
        self.pending.take()
    }

    /// Total updates ever scheduled.
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }
}

pub fn queue_pointer_updates(
    mut moved: EventReader<PagePointerMoved>,
    mut fanout: ResMut<PointerFanout>,
) {
    for ev in moved.read() {
        if let Some(ndc) = normalize_pointer(ev.position, ev.page_size) {
            fanout.request(ndc);
        }
    }
}

/// Once per frame: send every viewport's light toward the pending target.
/// Before the viewports exist the pending update is dropped.
pub fn flush_pointer_update(
    mut fanout: ResMut<PointerFanout>,
    viewports: Res<Viewports>,
    mut lights: Query<(&mut LightTween, &Transform)>,
) {
    let Some(ndc) = fanout.take() else {
        return;
    };
    let destination = light_target(ndc);
    for viewport in viewports.iter() {
        if let Ok((mut tween, transform)) = lights.get_mut(viewport.light) {
            tween.retarget(transform.translation, destination);
        }
    }
}

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::WindowResized;

use super::layout::PageLayout;
use super::{PagePointerMoved, PageResized, PageScrolled};
use crate::engine::config::ShowcaseConfig;

/// Pixels of page scroll per wheel line.
const LINE_HEIGHT_PX: f32 = 40.0;

/// Cursor position inside whichever viewport window it is over, measured
/// against that window's size.
pub fn forward_cursor(
    mut cursor_moved: EventReader<CursorMoved>,
    windows: Query<&Window>,
    mut pointer: EventWriter<PagePointerMoved>,
) {
    for cursor in cursor_moved.read() {
        let Ok(window) = windows.get(cursor.window) else {
            continue;
        };
        pointer.write(PagePointerMoved {
            position: cursor.position,
            page_size: Vec2::new(window.width(), window.height()),
        });
    }
}

/// The wheel scrolls a virtual page through the configured sections.
pub fn forward_wheel(
    mut wheel: EventReader<MouseWheel>,
    layout: Res<PageLayout>,
    mut scrolled: EventWriter<PageScrolled>,
) {
    let delta: f32 = wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => -ev.y * LINE_HEIGHT_PX,
            MouseScrollUnit::Pixel => -ev.y,
        })
        .sum();

    if delta.abs() > f32::EPSILON {
        scrolled.write(PageScrolled {
            scroll_y: layout.clamped_scroll(delta),
        });
    }
}

pub fn forward_resize(mut resized: EventReader<WindowResized>, mut page: EventWriter<PageResized>) {
    for ev in resized.read() {
        page.write(PageResized {
            width: ev.width,
            height: ev.height,
        });
    }
}

pub fn restack_sections(
    config: Res<ShowcaseConfig>,
    mut resized: EventReader<PageResized>,
    mut layout: ResMut<PageLayout>,
) {
    if let Some(last) = resized.read().last() {
        if last.height > 0.0 {
            layout.restack(&config.sections, last.height);
        }
    }
}

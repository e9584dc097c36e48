use std::collections::HashMap;

use bevy::prelude::*;

/// Vertical extent of a page section in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SectionBox {
    pub top: f32,
    pub height: f32,
}

/// Scroll position and section geometry of the hosting page.
///
/// On the web this mirrors the DOM; native builds simulate a page where every
/// configured section is one viewport tall, stacked in order.
#[derive(Resource, Debug, Clone)]
pub struct PageLayout {
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub document_height: f32,
    sections: HashMap<String, SectionBox>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            viewport_height: 720.0,
            document_height: 720.0,
            sections: HashMap::new(),
        }
    }
}

impl PageLayout {
    /// Native page: `selectors` stacked top to bottom, each `viewport_height` tall.
    pub fn stacked(selectors: &[String], viewport_height: f32) -> Self {
        let mut layout = Self {
            viewport_height,
            ..default()
        };
        layout.restack(selectors, viewport_height);
        layout
    }

    pub fn restack(&mut self, selectors: &[String], viewport_height: f32) {
        self.viewport_height = viewport_height;
        self.sections.clear();
        for (i, selector) in selectors.iter().enumerate() {
            self.sections.insert(
                selector.clone(),
                SectionBox {
                    top: i as f32 * viewport_height,
                    height: viewport_height,
                },
            );
        }
        self.document_height = (selectors.len().max(1)) as f32 * viewport_height;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn set_section(&mut self, selector: impl Into<String>, section: SectionBox) {
        self.sections.insert(selector.into(), section);
    }

    pub fn section(&self, selector: &str) -> Option<SectionBox> {
        self.sections.get(selector).copied()
    }

    pub fn max_scroll(&self) -> f32 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    /// Scroll offset after moving by `delta` pixels, clamped to the document.
    pub fn clamped_scroll(&self, delta: f32) -> f32 {
        (self.scroll_y + delta).clamp(0.0, self.max_scroll())
    }
}

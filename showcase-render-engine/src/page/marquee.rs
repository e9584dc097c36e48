use bevy::prelude::*;

use crate::engine::config::ShowcaseConfig;

/// One character of the marquee heading, rendered as its own wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub index: usize,
    pub text: String,
}

/// Decompose heading text into per-character glyphs. Whitespace is kept as
/// its own glyph so the joined text is unchanged.
pub fn split_glyphs(text: &str) -> Vec<Glyph> {
    text.chars()
        .enumerate()
        .map(|(index, c)| Glyph {
            index,
            text: c.to_string(),
        })
        .collect()
}

pub fn join_glyphs(glyphs: &[Glyph]) -> String {
    glyphs.iter().map(|g| g.text.as_str()).collect()
}

/// Startup system: split the configured heading into character spans.
pub fn split_marquee_heading(config: Res<ShowcaseConfig>) {
    #[cfg(target_arch = "wasm32")]
    {
        match dom::split_heading(&config.marquee_selector) {
            Ok(Some(count)) => info!("Marquee split into {} characters", count),
            Ok(None) => info!("Marquee {} already split", config.marquee_selector),
            Err(e) => error!("Marquee split failed: {:?}", e),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        debug!(
            "No DOM on native builds, marquee {} left untouched",
            config.marquee_selector
        );
    }
}

#[cfg(target_arch = "wasm32")]
mod dom {
    use constants::path::MARQUEE_CHAR_CLASS;
    use wasm_bindgen::JsValue;
    use web_sys::window;

    use super::split_glyphs;

    const SPLIT_MARKER: &str = "data-split";

    /// Returns the number of wrappers created, or `None` if the heading was
    /// already split.
    pub fn split_heading(selector: &str) -> Result<Option<usize>, JsValue> {
        let document = window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document not available"))?;
        let heading = document
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("{selector} not found")))?;

        if heading.get_attribute(SPLIT_MARKER).as_deref() == Some("true") {
            return Ok(None);
        }

        let text = heading.text_content().unwrap_or_default();
        let glyphs = split_glyphs(&text);
        heading.set_text_content(None);

        for glyph in &glyphs {
            let span = document.create_element("span")?;
            span.set_class_name(MARQUEE_CHAR_CLASS);
            span.set_attribute("style", &format!("--char-index: {}", glyph.index))?;
            span.set_text_content(Some(&glyph.text));
            heading.append_child(&span)?;
        }
        heading.set_attribute(SPLIT_MARKER, "true")?;
        Ok(Some(glyphs.len()))
    }
}

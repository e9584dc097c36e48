use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::error::MarkerParseError;
use crate::page::layout::SectionBox;

/// A horizontal line on either the trigger element or the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Percentage of the height, measured from the top.
    Percent(f32),
}

impl Edge {
    pub fn fraction(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
            Self::Percent(p) => p / 100.0,
        }
    }
}

impl FromStr for Edge {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => other
                .strip_suffix('%')
                .and_then(|p| p.parse::<f32>().ok())
                .map(Self::Percent)
                .ok_or_else(|| MarkerParseError::Edge(other.to_string())),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Center => f.write_str("center"),
            Self::Bottom => f.write_str("bottom"),
            Self::Percent(p) => write!(f, "{p}%"),
        }
    }
}

/// Scroll marker written as `"<element edge> <viewport edge>"`.
///
/// `"top bottom"` fires when the top of the section reaches the bottom of the
/// visible page, `"bottom top"` when the section's bottom leaves through the
/// top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Marker {
    pub element: Edge,
    pub viewport: Edge,
}

impl Marker {
    pub const fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Document scroll offset at which this marker is crossed.
    pub fn scroll_offset(&self, section: SectionBox, viewport_height: f32) -> f32 {
        section.top + self.element.fraction() * section.height
            - self.viewport.fraction() * viewport_height
    }
}

impl FromStr for Marker {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(element), Some(viewport), None) => Ok(Self {
                element: element.parse()?,
                viewport: viewport.parse()?,
            }),
            _ => Err(MarkerParseError::Shape(s.to_string())),
        }
    }
}

impl TryFrom<String> for Marker {
    type Error = MarkerParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        format!("{} {}", marker.element, marker.viewport)
    }
}

/// Page section whose scroll range drives a binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRegion {
    /// CSS selector of the section, e.g. `.section-one`.
    pub section: String,
    pub start: Marker,
    pub end: Marker,
}

impl TriggerRegion {
    pub fn scroll_range(&self, section: SectionBox, viewport_height: f32) -> (f32, f32) {
        (
            self.start.scroll_offset(section, viewport_height),
            self.end.scroll_offset(section, viewport_height),
        )
    }

    /// Progress in `[0, 1]` of `scroll_y` through the region.
    pub fn progress(&self, scroll_y: f32, section: SectionBox, viewport_height: f32) -> f32 {
        let (start, end) = self.scroll_range(section, viewport_height);
        if end <= start {
            return if scroll_y >= start { 1.0 } else { 0.0 };
        }
        ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }
}

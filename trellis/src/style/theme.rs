//! Theme registry.
//!
//! Maps symbolic color slots (`"Window.Background"`, `"Widget.Text"`) to
//! concrete colors. Styles reference slots through [`StyleColor::Themed`];
//! swapping a registered value re-colors every element that uses the slot on
//! the next frame without touching any style instance.

use std::collections::HashMap;

use super::{Style, StyleColor};
use crate::error::ConfigError;
use crate::primitives::Color;

/// A palette of named colors. Owned by the host and passed into each frame.
#[derive(Debug, Clone, Default)]
pub struct ThemeRegistry {
    colors: HashMap<String, Color>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a palette from a JSON object mapping slot names to colors
    /// (`"#RRGGBB"`, `"#RRGGBBAA"` or `[r, g, b, a]`).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let colors: HashMap<String, Color> = serde_json::from_str(json)?;
        Ok(Self { colors })
    }

    /// Register or replace a slot. Returns the previous value.
    pub fn register(&mut self, slot: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(slot.into(), color)
    }

    pub fn remove(&mut self, slot: &str) -> Option<Color> {
        self.colors.remove(slot)
    }

    pub fn get(&self, slot: &str) -> Option<Color> {
        self.colors.get(slot).copied()
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.colors.contains_key(slot)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.colors.iter().map(|(slot, color)| (slot.as_str(), *color))
    }

    /// Resolve one color in place. Unregistered slots keep their last value.
    pub fn resolve(&self, color: &mut StyleColor) {
        if let StyleColor::Themed { slot, resolved } = color {
            if let Some(value) = self.colors.get(slot.as_str()) {
                *resolved = *value;
            }
        }
    }

    /// Resolve every themed color of a style in place.
    pub fn resolve_style(&self, style: &mut Style) {
        if self.colors.is_empty() {
            return;
        }
        for color in style.colors_mut() {
            self.resolve(color);
        }
    }
}

//! Engine configuration.
//!
//! Held by an [`ElementTree`](crate::ElementTree) and consulted each frame.
//! Every field has a default, so a partial JSON document is valid.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::primitives::Color;
use crate::style::{FontId, Style};

/// Font size used when neither the config nor any style sets one.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layout debugging overlay.
    pub debug: DebugConfig,

    /// Font used when no element in the ancestry sets one.
    #[serde(deserialize_with = "deserialize_font")]
    pub default_font: FontId,

    /// Font size used when no element in the ancestry sets one.
    pub default_font_size: f32,

    /// Text color used when no element in the ancestry sets one.
    pub default_text_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debug: DebugConfig::default(),
            default_font: FontId(0),
            default_font_size: DEFAULT_FONT_SIZE,
            default_text_color: Color::WHITE,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The style every root cascades from.
    pub fn base_style(&self) -> Style {
        Style {
            text_color: Some(self.default_text_color.into()),
            font: Some(self.default_font),
            font_size: Some(self.default_font_size),
            ..Default::default()
        }
    }
}

/// Settings for the layout debugging overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Draw bounding and content boxes for every element.
    pub enabled: bool,
    /// Draw name, position and size labels for hovered elements.
    pub labels: bool,
    pub bounding_color: Color,
    pub content_color: Color,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            labels: true,
            bounding_color: Color::rgba(1.0, 0.2, 0.2, 0.8),
            content_color: Color::rgba(0.2, 0.6, 1.0, 0.6),
        }
    }
}

fn deserialize_font<'de, D>(deserializer: D) -> Result<FontId, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u16::deserialize(deserializer).map(FontId)
}

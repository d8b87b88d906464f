//! Style model.
//!
//! A [`Style`] is a sparse bag of optional visual properties. Each element
//! owns one as its overrides; the cascade (see [`cascade`]) merges it with
//! the parent's computed style to produce the element's computed style for
//! the frame, after theme slots are resolved through a [`ThemeRegistry`].

pub mod cascade;
pub mod theme;

pub use cascade::{CascadeRule, Combine, StyleProperty, CASCADE_RULES};
pub use theme::ThemeRegistry;

use crate::backend::FontSpec;
use crate::config::DEFAULT_FONT_SIZE;
use crate::layout::Anchor;
use crate::primitives::{Color, Point, Spacing};

/// A color as written in a style: a literal value or a named theme slot.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleColor {
    Literal(Color),
    /// A theme slot and the value it resolved to last.
    Themed { slot: String, resolved: Color },
}

impl StyleColor {
    /// Reference a theme slot. Transparent until first resolved.
    pub fn themed(slot: impl Into<String>) -> Self {
        StyleColor::Themed {
            slot: slot.into(),
            resolved: Color::TRANSPARENT,
        }
    }

    /// The color to draw with.
    #[inline]
    pub fn value(&self) -> Color {
        match self {
            StyleColor::Literal(color) => *color,
            StyleColor::Themed { resolved, .. } => *resolved,
        }
    }

    /// The theme slot name, for themed colors.
    pub fn slot(&self) -> Option<&str> {
        match self {
            StyleColor::Literal(_) => None,
            StyleColor::Themed { slot, .. } => Some(slot),
        }
    }
}

impl From<Color> for StyleColor {
    fn from(color: Color) -> Self {
        StyleColor::Literal(color)
    }
}

/// Gradient direction for background fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradientDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// A two-stop background gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub direction: GradientDirection,
    pub start: StyleColor,
    pub end: StyleColor,
}

/// Which corners a rounding applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_right: bool,
    pub bottom_left: bool,
}

impl Corners {
    pub const ALL: Self = Self {
        top_left: true,
        top_right: true,
        bottom_right: true,
        bottom_left: true,
    };
    pub const NONE: Self = Self {
        top_left: false,
        top_right: false,
        bottom_right: false,
        bottom_left: false,
    };
}

impl Default for Corners {
    fn default() -> Self {
        Self::ALL
    }
}

/// Per-side border colors.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderColor {
    pub top: StyleColor,
    pub right: StyleColor,
    pub bottom: StyleColor,
    pub left: StyleColor,
}

impl BorderColor {
    /// The same color on every side.
    pub fn all(color: impl Into<StyleColor>) -> Self {
        let color = color.into();
        Self {
            top: color.clone(),
            right: color.clone(),
            bottom: color.clone(),
            left: color,
        }
    }
}

/// A drop shadow drawn behind the element's bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Shadow {
    /// How far the shadow extends past each edge.
    pub size: Spacing,
    pub color: StyleColor,
    pub offset: Point,
}

/// A font handle understood by the drawing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u16);

/// An image understood by the drawing backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ImageSource {
    /// A numeric icon id from the host's icon set.
    Icon(u32),
    /// A texture path resolved by the host.
    Texture(String),
}

/// Sparse visual overrides for one element.
///
/// `None` means "not set here": inheritable properties then come from the
/// parent's computed style, everything else falls back to the backend's
/// default (nothing drawn).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    // Text
    pub text_color: Option<StyleColor>,
    pub text_align: Option<Anchor>,
    pub text_offset: Option<Point>,
    pub font: Option<FontId>,
    pub font_size: Option<f32>,
    pub outline_color: Option<StyleColor>,
    pub outline_width: Option<f32>,

    // Background
    pub background_color: Option<StyleColor>,
    pub background_gradient: Option<Gradient>,
    pub background_rounding: Option<f32>,
    pub rounded_corners: Option<Corners>,
    pub background_border_color: Option<StyleColor>,
    pub background_border_width: Option<f32>,

    // Borders
    pub border_color: Option<BorderColor>,
    pub border_width: Option<Spacing>,

    pub shadow: Option<Shadow>,

    // Image
    pub image: Option<ImageSource>,
    pub image_color: Option<StyleColor>,
    pub image_grayscale: Option<bool>,
    pub image_brightness: Option<f32>,
    pub image_contrast: Option<f32>,
    pub image_rounding: Option<f32>,
    pub image_inset: Option<Spacing>,
    pub image_offset: Option<Point>,

    pub opacity: Option<f32>,
}

impl Style {
    /// Every color field that is set, for theme resolution.
    pub fn colors_mut(&mut self) -> Vec<&mut StyleColor> {
        let mut colors = Vec::new();
        colors.extend(self.text_color.as_mut());
        colors.extend(self.outline_color.as_mut());
        colors.extend(self.background_color.as_mut());
        colors.extend(self.background_border_color.as_mut());
        colors.extend(self.image_color.as_mut());
        if let Some(gradient) = self.background_gradient.as_mut() {
            colors.push(&mut gradient.start);
            colors.push(&mut gradient.end);
        }
        if let Some(border) = self.border_color.as_mut() {
            colors.push(&mut border.top);
            colors.push(&mut border.right);
            colors.push(&mut border.bottom);
            colors.push(&mut border.left);
        }
        if let Some(shadow) = self.shadow.as_mut() {
            colors.push(&mut shadow.color);
        }
        colors
    }

    /// Effective opacity, 1.0 when unset.
    #[inline]
    pub fn opacity_or_default(&self) -> f32 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }

    /// Font to measure and draw text with. Computed styles always carry
    /// both fields; the fallbacks only matter for detached styles.
    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            font: self.font.unwrap_or_default(),
            size: self.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        }
    }

    /// Whether two computed styles would measure text differently.
    pub(crate) fn text_metrics_differ(&self, other: &Style) -> bool {
        self.font != other.font || self.font_size != other.font_size
    }
}

//! Core primitive types for Trellis.
//!
//! Geometry and color value types shared by the layout engine, the style
//! model and the drawing backend.

use std::ops::{Add, Sub};

use serde::Deserialize;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 2D size.
///
/// A zero on an axis means "auto" on that axis: the layout engine derives
/// the extent from text or children instead.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Auto on both axes. Also the value of a never-computed size.
    pub const AUTO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both axes carry an explicit extent.
    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Both axes are auto.
    #[inline]
    pub fn is_auto(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    #[inline]
    pub fn is_auto_width(&self) -> bool {
        self.width == 0.0
    }

    #[inline]
    pub fn is_auto_height(&self) -> bool {
        self.height == 0.0
    }

    /// Encloses no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

impl Add for Size {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            width: self.width + rhs.width,
            height: self.height + rhs.height,
        }
    }
}

/// Four-sided spacing, used for padding, margin and border widths.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create spacing with explicit values for each side.
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform spacing on all sides.
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric spacing (horizontal, vertical).
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal spacing.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical spacing.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Combined extent as a size.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }
}

impl Add for Spacing {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

/// A rectangle defined by its min (top-left) and max (bottom-right) corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const ZERO: Self = Self {
        min: Point::ORIGIN,
        max: Point::ORIGIN,
    };

    #[inline]
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            min: origin,
            max: Point::new(origin.x + size.width, origin.y + size.height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Get the center point of this rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Check if a point is inside this rectangle (max edges exclusive).
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Move every edge inward by the given spacing.
    ///
    /// Opposite edges never cross: a rect shrunk past zero collapses onto
    /// the point where the edges meet.
    pub fn shrink(&self, spacing: Spacing) -> Rect {
        let min_x = self.min.x + spacing.left;
        let min_y = self.min.y + spacing.top;
        let max_x = (self.max.x - spacing.right).max(min_x);
        let max_y = (self.max.y - spacing.bottom).max(min_y);
        Rect::new(Point::new(min_x, min_y), Point::new(max_x, max_y))
    }

    /// Move every edge outward by the given spacing.
    pub fn expand(&self, spacing: Spacing) -> Rect {
        Rect::new(
            Point::new(self.min.x - spacing.left, self.min.y - spacing.top),
            Point::new(self.max.x + spacing.right, self.max.y + spacing.bottom),
        )
    }

    /// Uniform inset; collapses instead of inverting when too small.
    #[inline]
    pub fn inset(&self, amount: f32) -> Rect {
        if self.width() > amount * 2.0 && self.height() > amount * 2.0 {
            self.shrink(Spacing::all(amount))
        } else {
            *self
        }
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "ColorValue")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Create a color from RGB values (0.0-1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values (0.0-1.0).
    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from RGBA values (0-255).
    #[inline]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from a packed `0xRRGGBBAA` value.
    #[inline]
    pub fn from_hex(packed: u32) -> Self {
        Self::rgba8(
            (packed >> 24) as u8,
            (packed >> 16) as u8,
            (packed >> 8) as u8,
            packed as u8,
        )
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (leading `#` optional).
    pub fn parse_hex(input: &str) -> Option<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        let packed = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_hex((packed << 8) | 0xFF)),
            8 => Some(Self::from_hex(packed)),
            _ => None,
        }
    }

    /// Return this color with a different alpha value.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Scale the alpha channel, e.g. by an element's computed opacity.
    #[inline]
    pub fn multiply_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Serialized forms accepted for a [`Color`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// `"#RRGGBB"` or `"#RRGGBBAA"`.
    Hex(String),
    /// `[r, g, b, a]` in 0.0-1.0.
    Channels([f32; 4]),
}

impl TryFrom<ColorValue> for Color {
    type Error = String;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Hex(hex) => {
                Color::parse_hex(&hex).ok_or_else(|| format!("invalid hex color: {hex}"))
            }
            ColorValue::Channels([r, g, b, a]) => Ok(Color::rgba(r, g, b, a)),
        }
    }
}

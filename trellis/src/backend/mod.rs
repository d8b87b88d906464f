//! Drawing backend seam.
//!
//! The engine never rasterizes anything itself. It drives an immediate-mode
//! backend through [`DrawBackend`]: primitive draw calls, text measurement,
//! the current frame's input state and scoped input regions.
//!
//! [`DrawList`] is a recording implementation for headless hosts and tests.

pub mod draw_list;

pub use draw_list::{DrawCommand, DrawList};

use crate::error::DrawError;
use crate::primitives::{Color, Point, Rect, Size, Spacing};
use crate::style::{Corners, FontId, GradientDirection, ImageSource};

/// Font selection for measuring and drawing text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub font: FontId,
    pub size: f32,
}

/// A resolved background fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(Color),
    Gradient {
        direction: GradientDirection,
        start: Color,
        end: Color,
    },
}

/// Resolved image adjustments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageAdjust {
    pub tint: Color,
    pub grayscale: bool,
    pub brightness: f32,
    pub contrast: f32,
    pub rounding: f32,
}

impl Default for ImageAdjust {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            grayscale: false,
            brightness: 1.0,
            contrast: 1.0,
            rounding: 0.0,
        }
    }
}

/// A text outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub color: Color,
    pub width: f32,
}

/// Mouse buttons the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    #[inline]
    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// The backend's input state for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub pointer: Point,
    down: [bool; 3],
    pressed: [bool; 3],
    released: [bool; 3],
}

impl InputState {
    /// Pointer at `position`, no buttons involved.
    pub fn at(position: Point) -> Self {
        Self {
            pointer: position,
            ..Default::default()
        }
    }

    /// Mark a button as pressed this frame (and held).
    pub fn with_pressed(mut self, button: MouseButton) -> Self {
        self.pressed[button.index()] = true;
        self.down[button.index()] = true;
        self
    }

    /// Mark a button as released this frame.
    pub fn with_released(mut self, button: MouseButton) -> Self {
        self.released[button.index()] = true;
        self.down[button.index()] = false;
        self
    }

    /// Mark a button as held without a transition this frame.
    pub fn with_down(mut self, button: MouseButton) -> Self {
        self.down[button.index()] = true;
        self
    }

    #[inline]
    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down[button.index()]
    }

    /// The button went down this frame.
    #[inline]
    pub fn was_pressed(&self, button: MouseButton) -> bool {
        self.pressed[button.index()]
    }

    /// The button went up this frame.
    #[inline]
    pub fn was_released(&self, button: MouseButton) -> bool {
        self.released[button.index()]
    }

    /// Drop the per-frame edges, keeping held buttons.
    pub fn settle(&mut self) {
        self.pressed = [false; 3];
        self.released = [false; 3];
    }
}

/// Hit-test state of an input region for the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionState {
    /// The pointer is over the region and nothing above it captures input.
    pub hovered: bool,
    /// The region holds input focus.
    pub focused: bool,
}

/// Text measurement, needed by layout for text-sized elements.
pub trait TextMeasure {
    fn measure_text(&mut self, text: &str, font: FontSpec) -> Size;
}

/// An immediate-mode drawing backend.
pub trait DrawBackend: TextMeasure {
    /// Fill a rectangle, optionally rounded on the given corners.
    fn fill_rect(&mut self, rect: Rect, fill: Fill, rounding: f32, corners: Corners)
    -> Result<(), DrawError>;

    /// Stroke the outline of a rectangle.
    fn stroke_rect(
        &mut self,
        rect: Rect,
        color: Color,
        width: f32,
        rounding: f32,
        corners: Corners,
    ) -> Result<(), DrawError>;

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32)
    -> Result<(), DrawError>;

    /// Draw a soft shadow extending `size` past each edge of `rect`.
    fn draw_shadow(
        &mut self,
        rect: Rect,
        size: Spacing,
        color: Color,
        rounding: f32,
    ) -> Result<(), DrawError>;

    fn draw_image(
        &mut self,
        rect: Rect,
        image: &ImageSource,
        adjust: ImageAdjust,
    ) -> Result<(), DrawError>;

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        font: FontSpec,
        color: Color,
        outline: Option<Outline>,
    ) -> Result<(), DrawError>;

    /// Input state for the current frame.
    fn input(&self) -> InputState;

    /// Open an independent input capture region over `rect`.
    fn begin_region(&mut self, name: &str, rect: Rect) -> RegionState;

    /// Close the most recently opened region.
    fn end_region(&mut self);
}

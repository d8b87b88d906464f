//! Draw List - recording backend.
//!
//! Records every draw call as a [`DrawCommand`] in submission order instead of
//! rasterizing. Text is measured with fixed per-character metrics scaled by
//! font size, and input is scripted per frame. Useful for headless hosts,
//! snapshotting and tests.

use crate::error::DrawError;
use crate::primitives::{Color, Point, Rect, Size, Spacing};
use crate::style::{Corners, ImageSource};

use super::{DrawBackend, Fill, FontSpec, ImageAdjust, InputState, Outline, RegionState, TextMeasure};

// Reference metrics at the base size; other sizes scale linearly.
pub const CHAR_WIDTH: f32 = 8.4;
pub const LINE_HEIGHT: f32 = 18.0;
pub const BASE_FONT_SIZE: f32 = 14.0;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        fill: Fill,
        rounding: f32,
        corners: Corners,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
        rounding: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    },
    Shadow {
        rect: Rect,
        size: Spacing,
        color: Color,
    },
    Image {
        rect: Rect,
        image: ImageSource,
        adjust: ImageAdjust,
    },
    Text {
        origin: Point,
        text: String,
        font: FontSpec,
        color: Color,
        outline: Option<Outline>,
    },
    BeginRegion {
        name: String,
        rect: Rect,
    },
    EndRegion,
}

/// A recording [`DrawBackend`].
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    input: InputState,
    regions: Vec<(String, Rect)>,
    focused: Option<String>,
    failing_text: Option<String>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame: drop recorded commands and install this frame's
    /// input. A left press clears focus; the region under the pointer
    /// takes it back when it is opened.
    pub fn begin_frame(&mut self, input: InputState) {
        self.commands.clear();
        self.regions.clear();
        self.input = input;
        if input.was_pressed(super::MouseButton::Left) {
            self.focused = None;
        }
    }

    /// Make every `draw_text` call whose text contains `needle` fail.
    pub fn fail_text_containing(&mut self, needle: impl Into<String>) {
        self.failing_text = Some(needle.into());
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drawn text runs, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of the regions opened this frame, in order.
    pub fn region_names(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::BeginRegion { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl TextMeasure for DrawList {
    fn measure_text(&mut self, text: &str, font: FontSpec) -> Size {
        if text.is_empty() {
            return Size::AUTO;
        }
        let scale = font.size / BASE_FONT_SIZE;
        let lines = text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
        Size::new(
            widest as f32 * CHAR_WIDTH * scale,
            count as f32 * LINE_HEIGHT * scale,
        )
    }
}

impl DrawBackend for DrawList {
    fn fill_rect(
        &mut self,
        rect: Rect,
        fill: Fill,
        rounding: f32,
        corners: Corners,
    ) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::FillRect {
            rect,
            fill,
            rounding,
            corners,
        });
        Ok(())
    }

    fn stroke_rect(
        &mut self,
        rect: Rect,
        color: Color,
        width: f32,
        rounding: f32,
        _corners: Corners,
    ) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            width,
            rounding,
        });
        Ok(())
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        color: Color,
        width: f32,
    ) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
        Ok(())
    }

    fn draw_shadow(
        &mut self,
        rect: Rect,
        size: Spacing,
        color: Color,
        _rounding: f32,
    ) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::Shadow { rect, size, color });
        Ok(())
    }

    fn draw_image(
        &mut self,
        rect: Rect,
        image: &ImageSource,
        adjust: ImageAdjust,
    ) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::Image {
            rect,
            image: image.clone(),
            adjust,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        origin: Point,
        text: &str,
        font: FontSpec,
        color: Color,
        outline: Option<Outline>,
    ) -> Result<(), DrawError> {
        if let Some(needle) = &self.failing_text {
            if text.contains(needle.as_str()) {
                return Err(DrawError::Backend(format!("cannot draw text '{text}'")));
            }
        }
        self.commands.push(DrawCommand::Text {
            origin,
            text: text.to_owned(),
            font,
            color,
            outline,
        });
        Ok(())
    }

    fn input(&self) -> InputState {
        self.input
    }

    fn begin_region(&mut self, name: &str, rect: Rect) -> RegionState {
        let hovered = rect.contains(self.input.pointer);
        if hovered && self.input.was_pressed(super::MouseButton::Left) {
            self.focused = Some(name.to_owned());
        }
        let focused = self.focused.as_deref() == Some(name);
        self.regions.push((name.to_owned(), rect));
        self.commands.push(DrawCommand::BeginRegion {
            name: name.to_owned(),
            rect,
        });
        RegionState { hovered, focused }
    }

    fn end_region(&mut self) {
        self.regions.pop();
        self.commands.push(DrawCommand::EndRegion);
    }
}

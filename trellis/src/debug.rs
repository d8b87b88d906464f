//! Layout debugging overlay.
//!
//! When [`DebugConfig::enabled`] is set, every drawn element gets its
//! bounding box and content box outlined after its children. Nested boxes
//! are inset one pixel per depth level so coincident edges stay visible as
//! a staircase. The hovered element also gets a label with its fully
//! qualified name, position and size.

use crate::backend::{DrawBackend, Outline};
use crate::config::DebugConfig;
use crate::error::DrawError;
use crate::primitives::{Color, Point, Rect};
use crate::style::Corners;
use crate::tree::Element;

const LINE_WIDTH: f32 = 1.0;

/// One element's overlay geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugRect {
    pub bounds: Rect,
    pub content: Rect,
    pub label: String,
    pub depth: u32,
}

impl DebugRect {
    pub fn new(element: &Element, name: String, depth: u32) -> Self {
        Self {
            bounds: element.bounding_box().inset(depth as f32),
            content: element.content_box(),
            label: format!(
                "{name} @ {:.0},{:.0} {:.0}x{:.0}",
                element.position().x,
                element.position().y,
                element.computed_size().width,
                element.computed_size().height,
            ),
            depth,
        }
    }

    /// Stroke the boxes, and the label when `pointer` is over the element.
    pub fn draw(
        &self,
        backend: &mut dyn DrawBackend,
        config: &DebugConfig,
        element: &Element,
        pointer: Point,
    ) -> Result<(), DrawError> {
        backend.stroke_rect(self.bounds, config.bounding_color, LINE_WIDTH, 0.0, Corners::NONE)?;
        if self.content != element.bounding_box() {
            backend.stroke_rect(self.content, config.content_color, LINE_WIDTH, 0.0, Corners::NONE)?;
        }

        if config.labels && element.bounding_box().contains(pointer) {
            let outline = Outline {
                color: Color::BLACK,
                width: 1.0,
            };
            backend.draw_text(
                self.bounds.min,
                &self.label,
                element.computed_style().font_spec(),
                config.bounding_color.with_alpha(1.0),
                Some(outline),
            )?;
        }
        Ok(())
    }
}

//! Frame rendering.
//!
//! One call to [`ElementTree::render`] with a position is a whole frame:
//! cascade, layout, draw, then deliver the pointer events the frame
//! produced. Each element's own draw sequence is isolated: a failing
//! backend call or render hook is logged with the element's fully
//! qualified name and the rest of the tree still draws.

use super::{ElementId, ElementTree};
use crate::backend::{DrawBackend, Fill, ImageAdjust, Outline, RegionState};
use crate::debug::DebugRect;
use crate::error::DrawError;
use crate::event::{QueuedEvent, RenderContext};
use crate::layout::Anchor;
use crate::primitives::{Color, Point, Rect, Size, Spacing};
use crate::style::{Corners, Style, ThemeRegistry};

impl ElementTree {
    /// Draw the subtree at `id`.
    ///
    /// With `Some(position)` styles are cascaded and the subtree is laid
    /// out at `position` first. With `None` the last computed boxes and
    /// styles are drawn as they are.
    pub fn render(
        &mut self,
        id: ElementId,
        backend: &mut dyn DrawBackend,
        theme: &ThemeRegistry,
        position: Option<Point>,
    ) {
        if let Some(position) = position {
            self.compute_style(id, theme);
            self.compute_layout(id, position, &mut *backend);
        }

        let depth = self.depth(id) as u32;
        let mut queue = Vec::new();
        self.render_element(id, backend, None, depth, &mut queue);
        self.dispatch_all(queue);
    }

    fn render_element(
        &mut self,
        id: ElementId,
        backend: &mut dyn DrawBackend,
        host: Option<RegionState>,
        depth: u32,
        queue: &mut Vec<QueuedEvent>,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            let pointer = backend.input().pointer;
            self.release_subtree_interaction(id, pointer, queue);
            return;
        }

        let name = self.fully_qualified_name(id);
        let interactive = node.is_interactive();
        let opens_region = interactive && host.is_none();
        let region = if opens_region {
            Some(backend.begin_region(&name, node.bounding_box))
        } else {
            host
        };

        if let Err(err) = self.draw_element(id, backend) {
            tracing::error!(element = %name, error = %err, "failed to draw element");
        }

        let children = self.children(id).to_vec();
        for child in children {
            self.render_element(child, backend, region, depth + 1, queue);
        }

        if self.config.debug.enabled {
            if let Some(node) = self.nodes.get(id) {
                let overlay = DebugRect::new(node, name.clone(), depth);
                let pointer = backend.input().pointer;
                if let Err(err) = overlay.draw(backend, &self.config.debug, node, pointer) {
                    tracing::error!(element = %name, error = %err, "failed to draw debug overlay");
                }
            }
        }

        let input = backend.input();
        match region.filter(|_| interactive) {
            Some(state) => self.update_interaction(id, input, state, queue),
            None => self.release_interaction(id, input.pointer, queue),
        }
        if opens_region {
            backend.end_region();
        }
    }

    /// The element's own visuals, in paint order, then its render hooks.
    fn draw_element(&mut self, id: ElementId, backend: &mut dyn DrawBackend) -> Result<(), DrawError> {
        let Some(node) = self.nodes.get(id) else {
            return Ok(());
        };
        let style = &node.computed_style;
        let opacity = style.opacity_or_default();
        if opacity > 0.0 {
            let bounds = node.bounding_box;
            draw_shadow(backend, style, bounds, opacity)?;
            draw_background(backend, style, bounds, opacity)?;
            draw_image(backend, style, bounds, opacity)?;
            draw_borders(backend, style, bounds, opacity)?;
            if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
                draw_text(backend, style, node.content_box, text, opacity)?;
            }
        }
        self.run_render_hooks(id, backend)
    }

    fn run_render_hooks(&mut self, id: ElementId, backend: &mut dyn DrawBackend) -> Result<(), DrawError> {
        let Some(node) = self.nodes.get_mut(id) else {
            return Ok(());
        };
        if !node.handlers.has_render_hooks() {
            return Ok(());
        }
        let mut hooks = node.handlers.take_render_hooks();

        let node = &self.nodes[id];
        let mut result = Ok(());
        {
            let mut ctx = RenderContext {
                backend,
                element: id,
                bounding_box: node.bounding_box,
                content_box: node.content_box,
                style: &node.computed_style,
            };
            for (_, hook) in hooks.iter_mut() {
                if let Err(err) = hook(&mut ctx) {
                    result = Err(DrawError::Callback(err));
                    break;
                }
            }
        }

        self.nodes[id].handlers.restore_render_hooks(hooks);
        result
    }
}

// =============================================================================
// Paint steps
// =============================================================================

fn draw_shadow(
    backend: &mut dyn DrawBackend,
    style: &Style,
    bounds: Rect,
    opacity: f32,
) -> Result<(), DrawError> {
    let Some(shadow) = &style.shadow else {
        return Ok(());
    };
    backend.draw_shadow(
        bounds.translate(shadow.offset),
        shadow.size,
        shadow.color.value().multiply_alpha(opacity),
        style.background_rounding.unwrap_or(0.0),
    )
}

fn draw_background(
    backend: &mut dyn DrawBackend,
    style: &Style,
    bounds: Rect,
    opacity: f32,
) -> Result<(), DrawError> {
    let rounding = style.background_rounding.unwrap_or(0.0);
    let corners = style.rounded_corners.unwrap_or(Corners::ALL);

    let fill = match (&style.background_gradient, &style.background_color) {
        (Some(gradient), _) => Some(Fill::Gradient {
            direction: gradient.direction,
            start: gradient.start.value().multiply_alpha(opacity),
            end: gradient.end.value().multiply_alpha(opacity),
        }),
        (None, Some(color)) => Some(Fill::Solid(color.value().multiply_alpha(opacity))),
        (None, None) => None,
    };
    if let Some(fill) = fill {
        backend.fill_rect(bounds, fill, rounding, corners)?;
    }

    let width = style.background_border_width.unwrap_or(0.0);
    if let Some(color) = style.background_border_color.as_ref().filter(|_| width > 0.0) {
        backend.stroke_rect(bounds, color.value().multiply_alpha(opacity), width, rounding, corners)?;
    }
    Ok(())
}

fn draw_image(
    backend: &mut dyn DrawBackend,
    style: &Style,
    bounds: Rect,
    opacity: f32,
) -> Result<(), DrawError> {
    let Some(image) = &style.image else {
        return Ok(());
    };
    let defaults = ImageAdjust::default();
    let adjust = ImageAdjust {
        tint: style
            .image_color
            .as_ref()
            .map_or(defaults.tint, |c| c.value())
            .multiply_alpha(opacity),
        grayscale: style.image_grayscale.unwrap_or(defaults.grayscale),
        brightness: style.image_brightness.unwrap_or(defaults.brightness),
        contrast: style.image_contrast.unwrap_or(defaults.contrast),
        rounding: style.image_rounding.unwrap_or(defaults.rounding),
    };
    let rect = bounds
        .shrink(style.image_inset.unwrap_or(Spacing::ZERO))
        .translate(style.image_offset.unwrap_or(Point::ORIGIN));
    backend.draw_image(rect, image, adjust)
}

/// Per-side border lines, each centered on its stroke width inside the box.
fn draw_borders(
    backend: &mut dyn DrawBackend,
    style: &Style,
    bounds: Rect,
    opacity: f32,
) -> Result<(), DrawError> {
    let (Some(colors), Some(widths)) = (&style.border_color, style.border_width) else {
        return Ok(());
    };
    let Rect { min, max } = bounds;

    let sides = [
        (
            widths.top,
            &colors.top,
            Point::new(min.x, min.y + widths.top / 2.0),
            Point::new(max.x, min.y + widths.top / 2.0),
        ),
        (
            widths.right,
            &colors.right,
            Point::new(max.x - widths.right / 2.0, min.y),
            Point::new(max.x - widths.right / 2.0, max.y),
        ),
        (
            widths.bottom,
            &colors.bottom,
            Point::new(min.x, max.y - widths.bottom / 2.0),
            Point::new(max.x, max.y - widths.bottom / 2.0),
        ),
        (
            widths.left,
            &colors.left,
            Point::new(min.x + widths.left / 2.0, min.y),
            Point::new(min.x + widths.left / 2.0, max.y),
        ),
    ];
    for (width, color, from, to) in sides {
        if width > 0.0 {
            backend.draw_line(from, to, color.value().multiply_alpha(opacity), width)?;
        }
    }
    Ok(())
}

fn draw_text(
    backend: &mut dyn DrawBackend,
    style: &Style,
    content: Rect,
    text: &str,
    opacity: f32,
) -> Result<(), DrawError> {
    let font = style.font_spec();
    let measured = backend.measure_text(text, font);
    let origin = align_in(content, measured, style.text_align.unwrap_or_default())
        + style.text_offset.unwrap_or(Point::ORIGIN);

    let color = style
        .text_color
        .as_ref()
        .map_or(Color::WHITE, |c| c.value())
        .multiply_alpha(opacity);
    let outline = match (&style.outline_color, style.outline_width) {
        (Some(color), Some(width)) if width > 0.0 => Some(Outline {
            color: color.value().multiply_alpha(opacity),
            width,
        }),
        _ => None,
    };
    backend.draw_text(origin, text, font, color, outline)
}

/// Top-left corner of a `size` box aligned inside `area`.
fn align_in(area: Rect, size: Size, align: Anchor) -> Point {
    let x = if align.is_center() {
        area.center().x - size.width / 2.0
    } else if align.is_right() {
        area.max.x - size.width
    } else {
        area.min.x
    };
    let y = if align.is_middle() {
        area.center().y - size.height / 2.0
    } else if align.is_bottom() {
        area.max.y - size.height
    } else {
        area.min.y
    };
    Point::new(x, y)
}

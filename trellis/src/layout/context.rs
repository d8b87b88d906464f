//! Layout context threaded through one layout pass.
//!
//! Carries what every element needs while it is sized and placed:
//! - The text measurer
//! - The pass number that keys per-pass size memoization
//! - The current depth, for indented trace output
//! - Collected layout warnings

use crate::backend::{FontSpec, TextMeasure};
use crate::primitives::{Point, Size};

/// A layout warning, for example text that overflows a fixed size.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutWarning {
    pub depth: u32,
    pub element: String,
    pub message: String,
}

/// State for one top-level layout call.
pub struct LayoutContext<'a, M: TextMeasure + ?Sized> {
    measurer: &'a mut M,
    pass: u64,
    depth: u32,
    warnings: Vec<LayoutWarning>,
}

impl<'a, M: TextMeasure + ?Sized> LayoutContext<'a, M> {
    pub fn new(measurer: &'a mut M, pass: u64) -> Self {
        Self {
            measurer,
            pass,
            depth: 0,
            warnings: Vec::new(),
        }
    }

    #[inline]
    pub fn pass(&self) -> u64 {
        self.pass
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn measure(&mut self, text: &str, font: FontSpec) -> Size {
        self.measurer.measure_text(text, font)
    }

    /// Enter a child level.
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Leave a child level.
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Trace where an element ended up.
    pub fn log_layout(&self, element: &str, position: Point, size: Size) {
        tracing::trace!(
            pass = self.pass,
            "{}{} @ ({:.0}, {:.0}) -> {{w:{:.0}, h:{:.0}}}",
            "  ".repeat(self.depth as usize),
            element,
            position.x,
            position.y,
            size.width,
            size.height,
        );
    }

    /// Warn when measured content exceeds an element's fixed extent.
    pub fn warn_overflow(&mut self, element: &str, axis: &str, content: f32, available: f32) {
        if content <= available {
            return;
        }
        let warning = LayoutWarning {
            depth: self.depth,
            element: element.to_owned(),
            message: format!("{element} content needs {content:.0} {axis} but only {available:.0} available"),
        };
        tracing::debug!(element, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn take_warnings(&mut self) -> Vec<LayoutWarning> {
        std::mem::take(&mut self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DrawList;
    use crate::style::FontId;

    #[test]
    fn test_depth_tracking() {
        let mut list = DrawList::new();
        let mut ctx = LayoutContext::new(&mut list, 3);
        assert_eq!(ctx.pass(), 3);
        ctx.enter();
        ctx.enter();
        assert_eq!(ctx.depth(), 2);
        ctx.exit();
        ctx.exit();
        ctx.exit();
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_measure_delegates() {
        let mut list = DrawList::new();
        let mut ctx = LayoutContext::new(&mut list, 1);
        let font = FontSpec {
            font: FontId(0),
            size: 14.0,
        };
        assert_eq!(ctx.measure("ab", font), Size::new(16.8, 18.0));
    }

    #[test]
    fn test_overflow_warnings() {
        let mut list = DrawList::new();
        let mut ctx = LayoutContext::new(&mut list, 1);
        ctx.warn_overflow("label", "width", 10.0, 20.0);
        assert!(ctx.take_warnings().is_empty());
        ctx.warn_overflow("label", "width", 30.0, 20.0);
        let warnings = ctx.take_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].element, "label");
    }
}

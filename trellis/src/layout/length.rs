//! Flow direction and axis types.
//!
//! A container's [`Flow`] decides how its visible children are arranged
//! inside each anchor bucket.

use crate::primitives::Size;

/// The direction along which a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Children are placed side by side, left to right (or right to left
    /// for right-anchored buckets).
    #[default]
    Horizontal,
    /// Children are stacked top to bottom (or bottom to top for
    /// bottom-anchored buckets).
    Vertical,
    /// Children share the anchor origin and may overlap.
    None,
}

impl Flow {
    /// The axis children advance along, if any.
    #[inline]
    pub fn main_axis(self) -> Option<Axis> {
        match self {
            Flow::Horizontal => Some(Axis::Horizontal),
            Flow::Vertical => Some(Axis::Vertical),
            Flow::None => None,
        }
    }

    /// The axis perpendicular to the flow, if any.
    #[inline]
    pub fn cross_axis(self) -> Option<Axis> {
        self.main_axis().map(Axis::cross)
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Extent of a size along this axis.
    #[inline]
    pub fn of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Overwrite the extent of `size` along this axis.
    #[inline]
    pub fn set(self, size: &mut Size, value: f32) {
        match self {
            Axis::Horizontal => size.width = value,
            Axis::Vertical => size.height = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_axes() {
        assert_eq!(Flow::Horizontal.main_axis(), Some(Axis::Horizontal));
        assert_eq!(Flow::Horizontal.cross_axis(), Some(Axis::Vertical));
        assert_eq!(Flow::Vertical.main_axis(), Some(Axis::Vertical));
        assert_eq!(Flow::None.main_axis(), None);
        assert_eq!(Flow::None.cross_axis(), None);
    }

    #[test]
    fn axis_get_and_set() {
        let mut size = Size::new(10.0, 20.0);
        assert_eq!(Axis::Horizontal.of(size), 10.0);
        assert_eq!(Axis::Vertical.of(size), 20.0);
        Axis::Vertical.set(&mut size, 5.0);
        assert_eq!(size, Size::new(10.0, 5.0));
    }
}

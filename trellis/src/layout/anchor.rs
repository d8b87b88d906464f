//! The nine-way anchor and its classification helpers.

/// Where a child originates within its parent's content box.
///
/// Each of the nine anchored values forms an independent layout bucket:
/// siblings with different anchors never affect each other's position.
/// [`Anchor::None`] children are stretched over the parent's whole content
/// box instead.
///
/// The same type doubles as the nine-way text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleCenter,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
    None,
}

impl Anchor {
    /// The nine layout buckets, row by row.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::MiddleCenter,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Bucket rows (top, middle, bottom), each left to right.
    pub const ROWS: [[Anchor; 3]; 3] = [
        [Anchor::TopLeft, Anchor::TopCenter, Anchor::TopRight],
        [Anchor::MiddleLeft, Anchor::MiddleCenter, Anchor::MiddleRight],
        [Anchor::BottomLeft, Anchor::BottomCenter, Anchor::BottomRight],
    ];

    /// Bucket columns (left, center, right), each top to bottom.
    pub const COLUMNS: [[Anchor; 3]; 3] = [
        [Anchor::TopLeft, Anchor::MiddleLeft, Anchor::BottomLeft],
        [Anchor::TopCenter, Anchor::MiddleCenter, Anchor::BottomCenter],
        [Anchor::TopRight, Anchor::MiddleRight, Anchor::BottomRight],
    ];

    /// Position of this anchor in [`Anchor::ALL`], `None` for [`Anchor::None`].
    #[inline]
    pub fn bucket(self) -> Option<usize> {
        Self::ALL.iter().position(|anchor| *anchor == self)
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self == Anchor::None
    }

    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::MiddleLeft | Anchor::BottomLeft)
    }

    #[inline]
    pub fn is_center(self) -> bool {
        matches!(self, Anchor::TopCenter | Anchor::MiddleCenter | Anchor::BottomCenter)
    }

    #[inline]
    pub fn is_right(self) -> bool {
        matches!(self, Anchor::TopRight | Anchor::MiddleRight | Anchor::BottomRight)
    }

    #[inline]
    pub fn is_top(self) -> bool {
        matches!(self, Anchor::TopLeft | Anchor::TopCenter | Anchor::TopRight)
    }

    #[inline]
    pub fn is_middle(self) -> bool {
        matches!(self, Anchor::MiddleLeft | Anchor::MiddleCenter | Anchor::MiddleRight)
    }

    #[inline]
    pub fn is_bottom(self) -> bool {
        matches!(self, Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight)
    }
}

//! Layout
//!
//! Two passes per element, driven by [`ElementTree::compute_layout`]:
//!
//! ```text
//! calculate_size (bottom-up, memoized per pass) -> place anchored buckets -> recurse
//! ```
//!
//! Children sit in nine independent anchor buckets inside the parent's
//! content box and flow horizontally, vertically or not at all within each
//! bucket. Stretch and fit resolve against siblings after the intrinsic
//! size is known. Elements whose position is unchanged and whose subtree
//! is clean are skipped.
//!
//! [`ElementTree::compute_layout`]: crate::ElementTree::compute_layout

pub mod anchor;
pub mod context;
pub mod engine;
pub mod length;

pub use anchor::Anchor;
pub use context::{LayoutContext, LayoutWarning};
pub use length::{Axis, Flow};

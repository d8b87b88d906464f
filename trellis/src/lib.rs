//! Trellis: Retained-Mode Layout and Styling Engine
//!
//! Trellis keeps a DOM-like tree of styled boxes and, every frame:
//! - Cascades styles from parent to child after resolving theme slots
//! - Lays the tree out with nested flow and nine anchor buckets per element
//! - Drives an immediate-mode drawing backend from the computed boxes
//! - Turns pointer input into per-element events
//!
//! # Architecture
//!
//! ```text
//! compute_style (top-down) -> compute_layout (size bottom-up, place top-down)
//!     -> draw (paint order + render hooks) -> deliver queued pointer events
//! ```
//!
//! Layout is incremental: elements track a dirty flag and are skipped when
//! their position is unchanged and nothing below them changed.
//!
//! # Usage
//!
//! ```ignore
//! use trellis::{DrawList, Element, ElementTree, Flow, Point, Size, ThemeRegistry};
//!
//! let mut tree = ElementTree::new();
//! let root = tree.insert(
//!     Element::new("toolbar")
//!         .flow(Flow::Horizontal)
//!         .gap(4.0)
//!         .child(Element::new("save").text("Save"))
//!         .child(Element::new("load").text("Load")),
//! )?;
//!
//! let mut backend = DrawList::new();
//! tree.render(root, &mut backend, &ThemeRegistry::new(), Some(Point::ORIGIN));
//! ```

// Core primitives
pub mod primitives;
pub mod error;
pub mod config;

// Style model, cascade and themes
pub mod style;

// Layout vocabulary and engine
pub mod layout;

// Element tree, queries, interaction and rendering
pub mod tree;
pub mod event;

// Drawing backend seam
pub mod backend;

// Layout debugging overlay
pub mod debug;

// Re-export core types
pub use primitives::{Color, Point, Rect, Size, Spacing};
pub use error::{ConfigError, DrawError, TreeError};
pub use config::{DebugConfig, EngineConfig};
pub use style::{
    BorderColor, CascadeRule, Combine, Corners, FontId, Gradient, GradientDirection, ImageSource,
    Shadow, Style, StyleColor, StyleProperty, ThemeRegistry, CASCADE_RULES,
};
pub use layout::{Anchor, Axis, Flow, LayoutContext, LayoutWarning};
pub use tree::{Element, ElementId, ElementTree};
pub use event::{EventContext, EventHandlers, EventKind, RenderContext, SubscriptionId};
pub use backend::{
    DrawBackend, DrawCommand, DrawList, Fill, FontSpec, ImageAdjust, InputState, MouseButton,
    Outline, RegionState, TextMeasure,
};

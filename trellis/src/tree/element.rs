//! Elements
//!
//! An [`Element`] is both the builder a host uses to describe a node and the
//! record the tree keeps for it once inserted. Layout properties are set
//! through setters that mark the element dirty when the value changes;
//! computed state (boxes, computed style, hover) is read-only outside the
//! crate.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::event::{EventContext, EventHandlers, EventKind, RenderContext, SubscriptionId};
use crate::layout::{Anchor, Flow};
use crate::primitives::{Point, Rect, Size, Spacing};
use crate::style::Style;

use super::ElementId;

/// One node of the element tree.
#[derive(Debug)]
pub struct Element {
    pub(crate) id: String,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    /// Builder children, attached on insertion.
    pub(crate) pending: Vec<Element>,

    // Layout properties
    pub(crate) flow: Flow,
    pub(crate) anchor: Anchor,
    pub(crate) size: Size,
    pub(crate) padding: Spacing,
    pub(crate) margin: Spacing,
    pub(crate) gap: f32,
    pub(crate) stretch: bool,
    pub(crate) fit: bool,
    pub(crate) sort_index: i32,
    pub(crate) visible: bool,
    pub(crate) text: Option<String>,

    pub(crate) style: Style,

    // Computed per frame
    pub(crate) computed_style: Style,
    pub(crate) computed_size: Size,
    pub(crate) position: Point,
    pub(crate) bounding_box: Rect,
    pub(crate) content_box: Rect,

    // Layout bookkeeping
    pub(crate) dirty: bool,
    pub(crate) calculating_size: bool,
    pub(crate) sized_in_pass: u64,

    // Interaction
    pub(crate) mouse_over: bool,
    pub(crate) focused: bool,

    pub(crate) handlers: EventHandlers,
    /// Child id -> handle, for path lookups. Entries are re-validated on hit.
    pub(crate) query_cache: RefCell<HashMap<String, ElementId>>,
}

macro_rules! layout_setter {
    ($(#[$meta:meta])* $setter:ident, $builder:ident, $field:ident: $ty:ty) => {
        $(#[$meta])*
        pub fn $setter(&mut self, value: $ty) {
            if self.$field != value {
                self.$field = value;
                self.dirty = true;
            }
        }

        $(#[$meta])*
        pub fn $builder(mut self, value: $ty) -> Self {
            self.$setter(value);
            self
        }
    };
}

impl Element {
    /// A visible, auto-sized, top-left anchored element with horizontal flow.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: None,
            children: Vec::new(),
            pending: Vec::new(),
            flow: Flow::default(),
            anchor: Anchor::default(),
            size: Size::AUTO,
            padding: Spacing::ZERO,
            margin: Spacing::ZERO,
            gap: 0.0,
            stretch: false,
            fit: false,
            sort_index: 0,
            visible: true,
            text: None,
            style: Style::default(),
            computed_style: Style::default(),
            computed_size: Size::AUTO,
            position: Point::ORIGIN,
            bounding_box: Rect::ZERO,
            content_box: Rect::ZERO,
            dirty: true,
            calculating_size: false,
            sized_in_pass: 0,
            mouse_over: false,
            focused: false,
            handlers: EventHandlers::new(),
            query_cache: RefCell::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Add a child, attached when this element is inserted into a tree.
    pub fn child(mut self, child: Element) -> Self {
        self.pending.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.pending.extend(children);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Subscribe to an event before insertion.
    pub fn on(
        mut self,
        kind: EventKind,
        handler: impl FnMut(&mut EventContext<'_>) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.subscribe(kind, handler);
        self
    }

    /// Add a render hook before insertion.
    pub fn on_render(
        mut self,
        hook: impl FnMut(&mut RenderContext<'_>) -> anyhow::Result<()> + 'static,
    ) -> Self {
        self.subscribe_render(hook);
        self
    }

    // =========================================================================
    // Layout properties
    // =========================================================================

    layout_setter!(set_flow, flow, flow: Flow);
    layout_setter!(set_anchor, anchor, anchor: Anchor);
    layout_setter!(
        /// Explicit size; 0 on an axis means auto.
        set_size, size, size: Size
    );
    layout_setter!(set_padding, padding, padding: Spacing);
    layout_setter!(set_margin, margin, margin: Spacing);
    layout_setter!(
        /// Spacing between consecutive children in the same bucket.
        set_gap, gap, gap: f32
    );
    layout_setter!(
        /// Grow along the parent's flow axis into the space siblings leave.
        set_stretch, stretch, stretch: bool
    );
    layout_setter!(
        /// Match the largest sibling on the parent's cross axis.
        set_fit, fit, fit: bool
    );
    layout_setter!(set_sort_index, sort_index, sort_index: i32);
    layout_setter!(set_visible, visible, visible: bool);

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.text.as_deref() != Some(text.as_str()) {
            self.text = Some(text);
            self.dirty = true;
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    pub fn clear_text(&mut self) {
        if self.text.take().is_some() {
            self.dirty = true;
        }
    }

    /// Force a relayout of this element on the next frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&mut EventContext<'_>) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.handlers.subscribe(kind, Box::new(handler))
    }

    pub fn subscribe_render(
        &mut self,
        hook: impl FnMut(&mut RenderContext<'_>) -> anyhow::Result<()> + 'static,
    ) -> SubscriptionId {
        self.handlers.subscribe_render(Box::new(hook))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.handlers.unsubscribe(id)
    }

    pub fn handlers(&self) -> &EventHandlers {
        &self.handlers
    }

    /// Whether the element takes part in hit-testing.
    pub fn is_interactive(&self) -> bool {
        self.handlers.has_pointer_subscribers()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get_flow(&self) -> Flow {
        self.flow
    }

    pub fn get_anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn get_size(&self) -> Size {
        self.size
    }

    pub fn get_padding(&self) -> Spacing {
        self.padding
    }

    pub fn get_margin(&self) -> Spacing {
        self.margin
    }

    pub fn get_gap(&self) -> f32 {
        self.gap
    }

    pub fn is_stretch(&self) -> bool {
        self.stretch
    }

    pub fn is_fit(&self) -> bool {
        self.fit
    }

    pub fn get_sort_index(&self) -> i32 {
        self.sort_index
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn get_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The element's own style overrides.
    pub fn get_style(&self) -> &Style {
        &self.style
    }

    /// Mutable style overrides. Theme and cascade are applied next frame;
    /// a change of font or font size relayouts text elements.
    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    /// Style after theme resolution and cascade, as of the last frame.
    pub fn computed_style(&self) -> &Style {
        &self.computed_style
    }

    /// Outer size including margin, as of the last layout.
    pub fn computed_size(&self) -> Size {
        self.computed_size
    }

    /// Outer top-left corner, as of the last layout.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Outer box minus margin.
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Bounding box minus padding.
    pub fn content_box(&self) -> Rect {
        self.content_box
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

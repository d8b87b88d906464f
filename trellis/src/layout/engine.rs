//! Layout engine: sizing and placement over the element tree.

use std::collections::HashMap;

use super::{Anchor, Flow, LayoutContext, LayoutWarning};
use crate::backend::TextMeasure;
use crate::event::{EventKind, QueuedEvent};
use crate::primitives::{Point, Rect, Size};
use crate::tree::{ElementId, ElementTree};

/// Extent of a run of children laid out along `flow` with `gap` between
/// consecutive ones.
fn stack(flow: Flow, gap: f32, sizes: impl IntoIterator<Item = Size>) -> Size {
    let mut total = Size::AUTO;
    for (index, size) in sizes.into_iter().enumerate() {
        let spacing = if index > 0 { gap } else { 0.0 };
        total = match flow {
            Flow::Horizontal => Size::new(
                total.width + spacing + size.width,
                total.height.max(size.height),
            ),
            Flow::Vertical => Size::new(
                total.width.max(size.width),
                total.height + spacing + size.height,
            ),
            Flow::None => total.max(size),
        };
    }
    total
}

impl ElementTree {
    // =========================================================================
    // Entry point
    // =========================================================================

    /// Size and place `id` with its outer top-left corner at `position`,
    /// then its subtree. Returns the warnings collected during the pass.
    pub fn compute_layout<M: TextMeasure + ?Sized>(
        &mut self,
        id: ElementId,
        position: Point,
        measurer: &mut M,
    ) -> Vec<LayoutWarning> {
        self.pass += 1;
        let mut ctx = LayoutContext::new(measurer, self.pass);
        self.layout_element(&mut ctx, id, position);
        ctx.take_warnings()
    }

    /// Whether `id` or anything below it needs a new layout.
    ///
    /// Hidden children are checked for their own flag only, so toggling
    /// visibility is noticed without walking subtrees that are not drawn.
    pub fn should_revalidate(&self, id: ElementId) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        if node.dirty || node.computed_size.is_auto() {
            return true;
        }
        node.children.iter().any(|child| match self.nodes.get(*child) {
            Some(c) if !c.visible => c.dirty,
            Some(_) => self.should_revalidate(*child),
            None => false,
        })
    }

    fn layout_element<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
        position: Point,
    ) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.position == position && !self.should_revalidate(id) {
            return;
        }

        self.dispatch(QueuedEvent::new(id, EventKind::BeforeCompute));
        let Some(node) = self.nodes.get(id) else {
            return;
        };

        let (parent, anchor) = (node.parent, node.anchor);
        let full_bleed = parent
            .filter(|_| anchor.is_none())
            .and_then(|parent| self.nodes.get(parent))
            .map(|parent| parent.content_box.size());
        let size = match full_bleed {
            Some(size) => size,
            None => self.calculate_size(ctx, id),
        };

        let node = &mut self.nodes[id];
        node.computed_size = size;
        node.position = position;
        node.bounding_box = Rect::from_origin_size(position, size).shrink(node.margin);
        node.content_box = node.bounding_box.shrink(node.padding);
        ctx.log_layout(&node.id, position, size);

        self.sort_children(id);
        let placements = self.child_placements(ctx, id);

        ctx.enter();
        for (child, child_position) in placements {
            self.layout_element(ctx, child, child_position);
        }
        ctx.exit();

        if let Some(node) = self.nodes.get_mut(id) {
            node.dirty = false;
        }
        self.dispatch(QueuedEvent::new(id, EventKind::AfterCompute));
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Outer size of `id` (including margin) for the current pass.
    ///
    /// Re-entrant calls for an element that is already being sized return
    /// its provisional size, which is how fit and stretch siblings that
    /// depend on each other terminate.
    pub fn calculate_size<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
    ) -> Size {
        let Some(node) = self.nodes.get_mut(id) else {
            return Size::AUTO;
        };
        if node.calculating_size || node.sized_in_pass == ctx.pass() {
            return node.computed_size;
        }
        let previous = node.computed_size;
        node.calculating_size = true;

        let mut size = self.intrinsic_size(ctx, id);
        // Publish the provisional size for siblings that ask back.
        self.nodes[id].computed_size = size;

        let node = &self.nodes[id];
        if let Some(parent) = node.parent.filter(|_| !node.anchor.is_none()) {
            size = self.apply_fit(ctx, id, parent, size);
            size = self.apply_stretch(ctx, id, parent, size);
        }

        let node = &mut self.nodes[id];
        node.computed_size = size;
        node.calculating_size = false;
        node.sized_in_pass = ctx.pass();
        if size != previous {
            node.dirty = true;
            tracing::debug!(
                element = %node.id,
                from = ?(previous.width, previous.height),
                to = ?(size.width, size.height),
                "size changed"
            );
        }
        size
    }

    /// Own content (configured size, else text) and children, plus padding
    /// and margin.
    fn intrinsic_size<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
    ) -> Size {
        let node = &self.nodes[id];
        let configured = node.size;
        let padding = node.padding.size();
        let margin = node.margin.size();

        let text = match node.text.as_deref() {
            Some(text) if !text.is_empty() => {
                let measured = ctx.measure(text, node.computed_style.font_spec());
                if configured.width > 0.0 {
                    ctx.warn_overflow(&node.id, "width", measured.width + padding.width, configured.width);
                }
                if configured.height > 0.0 {
                    ctx.warn_overflow(&node.id, "height", measured.height + padding.height, configured.height);
                }
                measured
            }
            _ => Size::AUTO,
        };

        let own = Size::new(
            if configured.width > 0.0 {
                configured.width
            } else {
                text.width + padding.width
            },
            if configured.height > 0.0 {
                configured.height
            } else {
                text.height + padding.height
            },
        );
        let children = self.children_flow_size(ctx, id);
        own.max(children + padding) + margin
    }

    /// Space the anchored, visible children need, combining the nine
    /// buckets by rows (width) and columns (height).
    pub fn children_flow_size<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
    ) -> Size {
        let Some(node) = self.nodes.get(id) else {
            return Size::AUTO;
        };
        let (flow, gap) = (node.flow, node.gap);
        let children = node.children.clone();

        let mut buckets: [Vec<Size>; 9] = Default::default();
        for child in children {
            let Some(bucket) = self.flow_bucket(child) else {
                continue;
            };
            let size = self.calculate_size(ctx, child);
            buckets[bucket].push(size);
        }

        let extents: Vec<Size> = buckets
            .into_iter()
            .map(|sizes| stack(flow, gap, sizes))
            .collect();
        let extent = |anchor: &Anchor| anchor.bucket().map_or(Size::AUTO, |i| extents[i]);

        let width = Anchor::ROWS
            .iter()
            .map(|row| row.iter().map(|a| extent(a).width).sum::<f32>())
            .fold(0.0, f32::max);
        let height = Anchor::COLUMNS
            .iter()
            .map(|column| column.iter().map(|a| extent(a).height).sum::<f32>())
            .fold(0.0, f32::max);
        Size::new(width, height)
    }

    /// Bucket index of a child that takes part in flow layout.
    fn flow_bucket(&self, child: ElementId) -> Option<usize> {
        let node = self.nodes.get(child)?;
        if !node.visible {
            return None;
        }
        node.anchor.bucket()
    }

    /// Visible, anchored siblings of `id` under `parent`.
    fn flow_siblings(&self, parent: ElementId, id: ElementId) -> Vec<ElementId> {
        self.children(parent)
            .iter()
            .copied()
            .filter(|sibling| *sibling != id && self.flow_bucket(*sibling).is_some())
            .collect()
    }

    fn apply_fit<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
        parent: ElementId,
        mut size: Size,
    ) -> Size {
        if !self.nodes[id].fit {
            return size;
        }
        let Some(cross) = self.nodes[parent].flow.cross_axis() else {
            return size;
        };

        let mut largest = cross.of(size);
        for sibling in self.flow_siblings(parent, id) {
            let sibling_size = self.calculate_size(ctx, sibling);
            largest = largest.max(cross.of(sibling_size));
        }
        cross.set(&mut size, largest);
        size
    }

    fn apply_stretch<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
        parent: ElementId,
        mut size: Size,
    ) -> Size {
        let node = &self.nodes[id];
        if !node.stretch {
            return size;
        }
        let anchor = node.anchor;
        let parent_node = &self.nodes[parent];
        let Some(main) = parent_node.flow.main_axis() else {
            return size;
        };
        let extent = main.of(parent_node.size);
        if extent <= 0.0 {
            return size;
        }
        let available = extent - main.of(parent_node.padding.size());
        let gap = parent_node.gap;

        let mut used = 0.0;
        let mut in_bucket = 1usize;
        for sibling in self.flow_siblings(parent, id) {
            used += main.of(self.calculate_size(ctx, sibling));
            if self.nodes[sibling].anchor == anchor {
                in_bucket += 1;
            }
        }

        let remaining = available - used - gap * (in_bucket - 1) as f32;
        let grown = main.of(size).max(remaining);
        main.set(&mut size, grown);
        size
    }

    // =========================================================================
    // Placement
    // =========================================================================

    /// Outer positions of every child that will be laid out this pass, in
    /// child order. Hidden children are skipped and their flag cleared.
    fn child_placements<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        id: ElementId,
    ) -> Vec<(ElementId, Point)> {
        let mut anchored: HashMap<ElementId, Point> = HashMap::new();
        for anchor in Anchor::ALL {
            anchored.extend(self.anchored_child_positions(ctx, id, anchor));
        }

        let content = self.nodes[id].content_box;
        let children = self.nodes[id].children.clone();
        let mut placements = Vec::with_capacity(children.len());
        for child in children {
            let Some(node) = self.nodes.get_mut(child) else {
                continue;
            };
            if !node.visible {
                node.dirty = false;
                continue;
            }
            if node.anchor.is_none() {
                if node.computed_size != content.size() {
                    node.dirty = true;
                }
                placements.push((child, content.min));
            } else if let Some(position) = anchored.get(&child) {
                placements.push((child, *position));
            }
        }
        placements
    }

    /// Outer positions of the visible children of `parent` in one anchor
    /// bucket, in sort order.
    ///
    /// Left/top buckets start at the content box's min edge and advance
    /// forward; right/bottom buckets start at the max edge and advance
    /// backward, so the first child sits flush against that edge. Center
    /// and middle buckets are offset by half the bucket's extent.
    pub fn anchored_child_positions<M: TextMeasure + ?Sized>(
        &mut self,
        ctx: &mut LayoutContext<'_, M>,
        parent: ElementId,
        anchor: Anchor,
    ) -> Vec<(ElementId, Point)> {
        let Some(node) = self.nodes.get(parent) else {
            return Vec::new();
        };
        if anchor.is_none() {
            return Vec::new();
        }
        let (flow, gap, content) = (node.flow, node.gap, node.content_box);
        let children = node.children.clone();

        let mut members = Vec::new();
        for child in children {
            if self.flow_bucket(child) == anchor.bucket() {
                members.push((child, self.calculate_size(ctx, child)));
            }
        }
        if members.is_empty() {
            return Vec::new();
        }

        let extent = stack(flow, gap, members.iter().map(|(_, size)| *size));
        let mut cursor = Point::new(
            if anchor.is_left() {
                content.min.x
            } else if anchor.is_center() {
                content.center().x - extent.width / 2.0
            } else {
                content.max.x
            },
            if anchor.is_top() {
                content.min.y
            } else if anchor.is_middle() {
                content.center().y - extent.height / 2.0
            } else {
                content.max.y
            },
        );

        let mut positions = Vec::with_capacity(members.len());
        for (child, size) in members {
            let x = if anchor.is_right() { cursor.x - size.width } else { cursor.x };
            let y = if anchor.is_bottom() { cursor.y - size.height } else { cursor.y };
            positions.push((child, Point::new(x, y)));

            match flow {
                Flow::Horizontal if anchor.is_right() => cursor.x -= size.width + gap,
                Flow::Horizontal => cursor.x += size.width + gap,
                Flow::Vertical if anchor.is_bottom() => cursor.y -= size.height + gap,
                Flow::Vertical => cursor.y += size.height + gap,
                Flow::None => {}
            }
        }
        positions
    }
}

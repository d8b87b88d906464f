//! Pointer interaction.
//!
//! Runs after an interactive element and its children are drawn. The
//! element compares this frame's hover state with the last one and turns
//! input edges into queued events; the renderer delivers the queue once
//! the whole frame is drawn, so handlers never observe a half-drawn tree.

use super::{ElementId, ElementTree};
use crate::backend::{InputState, MouseButton, RegionState};
use crate::primitives::Point;
use crate::event::{EventKind, QueuedEvent};

impl ElementTree {
    /// Update hover and focus for `id` against its region and queue the
    /// pointer events this frame's input produced.
    pub(crate) fn update_interaction(
        &mut self,
        id: ElementId,
        input: InputState,
        region: RegionState,
        queue: &mut Vec<QueuedEvent>,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };

        let pointer = input.pointer;
        let hovered = region.hovered && node.bounding_box.contains(pointer);
        let was_hovered = node.mouse_over;
        node.mouse_over = hovered;
        node.focused = region.focused;

        if hovered != was_hovered {
            let kind = if hovered {
                EventKind::MouseEnter
            } else {
                EventKind::MouseLeave
            };
            queue.push(QueuedEvent::new(id, kind).at(pointer));
        }

        if !hovered {
            return;
        }
        for button in MouseButton::ALL {
            if input.was_pressed(button) {
                queue.push(
                    QueuedEvent::new(id, EventKind::MouseDown)
                        .at(pointer)
                        .with_button(button),
                );
                queue.push(
                    QueuedEvent::new(id, EventKind::click_for(button))
                        .at(pointer)
                        .with_button(button),
                );
            }
            if input.was_released(button) {
                queue.push(
                    QueuedEvent::new(id, EventKind::MouseUp)
                        .at(pointer)
                        .with_button(button),
                );
            }
        }
    }

    /// Drop hover and focus on `id`, queueing the leave edge if it was
    /// hovered. For elements that no longer take part in hit-testing.
    pub(crate) fn release_interaction(
        &mut self,
        id: ElementId,
        pointer: Point,
        queue: &mut Vec<QueuedEvent>,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.focused = false;
        if std::mem::take(&mut node.mouse_over) {
            queue.push(QueuedEvent::new(id, EventKind::MouseLeave).at(pointer));
        }
    }

    /// [`release_interaction`](Self::release_interaction) for `id` and
    /// every element below it, in tree order. For subtrees that are not
    /// drawn this frame.
    pub(crate) fn release_subtree_interaction(
        &mut self,
        id: ElementId,
        pointer: Point,
        queue: &mut Vec<QueuedEvent>,
    ) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            self.release_interaction(next, pointer, queue);
            stack.extend(self.children(next).iter().rev().copied());
        }
    }
}

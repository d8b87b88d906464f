//! Events
//!
//! Every element carries an [`EventHandlers`] table: for each [`EventKind`] an
//! ordered list of subscribers, plus a separate list of render hooks.
//!
//! Handlers receive an [`EventContext`] with mutable access to the whole
//! tree, so widget code can restyle, re-text or restructure elements in
//! response to input. A handler returning an error is logged and the
//! remaining subscribers still run.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::{DrawBackend, MouseButton};
use crate::primitives::{Point, Rect};
use crate::style::Style;
use crate::tree::{ElementId, ElementTree};

/// Kinds of events an element can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MiddleClick,
    RightClick,
    MouseDown,
    MouseUp,
    MouseEnter,
    MouseLeave,
    /// Fired before the element is sized and placed.
    BeforeCompute,
    /// Fired after the element and its subtree are placed.
    AfterCompute,
    /// Fired on the parent; `related` is the new child.
    ChildAdded,
    /// Fired on the former parent; `related` is the removed child.
    ChildRemoved,
}

impl EventKind {
    /// Kinds that make an element take part in hit-testing.
    pub const POINTER: [EventKind; 7] = [
        EventKind::Click,
        EventKind::MiddleClick,
        EventKind::RightClick,
        EventKind::MouseDown,
        EventKind::MouseUp,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
    ];

    #[inline]
    pub fn is_pointer(self) -> bool {
        Self::POINTER.contains(&self)
    }

    /// The click kind a button press maps to.
    pub fn click_for(button: MouseButton) -> EventKind {
        match button {
            MouseButton::Left => EventKind::Click,
            MouseButton::Middle => EventKind::MiddleClick,
            MouseButton::Right => EventKind::RightClick,
        }
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// What a handler sees when it runs.
pub struct EventContext<'a> {
    /// The tree, mutable. The target's own handlers for this kind are
    /// detached while they run.
    pub tree: &'a mut ElementTree,
    pub target: ElementId,
    pub kind: EventKind,
    /// Pointer position for pointer events.
    pub pointer: Option<Point>,
    /// Button for down/up/click events.
    pub button: Option<MouseButton>,
    /// The child for `ChildAdded` / `ChildRemoved`.
    pub related: Option<ElementId>,
}

/// What a render hook sees when it runs.
pub struct RenderContext<'a> {
    pub backend: &'a mut dyn DrawBackend,
    pub element: ElementId,
    pub bounding_box: Rect,
    pub content_box: Rect,
    /// The element's computed style for this frame.
    pub style: &'a Style,
}

pub type EventHandler = Box<dyn FnMut(&mut EventContext<'_>) -> anyhow::Result<()>>;
pub type RenderHook = Box<dyn FnMut(&mut RenderContext<'_>) -> anyhow::Result<()>>;

/// An event waiting to be delivered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QueuedEvent {
    pub target: ElementId,
    pub kind: EventKind,
    pub pointer: Option<Point>,
    pub button: Option<MouseButton>,
    pub related: Option<ElementId>,
}

impl QueuedEvent {
    pub fn new(target: ElementId, kind: EventKind) -> Self {
        Self {
            target,
            kind,
            pointer: None,
            button: None,
            related: None,
        }
    }

    pub fn at(mut self, pointer: Point) -> Self {
        self.pointer = Some(pointer);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    pub fn with_related(mut self, related: ElementId) -> Self {
        self.related = Some(related);
        self
    }
}

/// Subscriber lists for one element.
#[derive(Default)]
pub struct EventHandlers {
    handlers: HashMap<EventKind, Vec<(SubscriptionId, EventHandler)>>,
    render_hooks: Vec<(SubscriptionId, RenderHook)>,
    /// Subscriptions currently taken out for dispatch.
    detached: HashSet<SubscriptionId>,
    /// Detached subscriptions unsubscribed before they were restored.
    cancelled: HashSet<SubscriptionId>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, handler: EventHandler) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    pub fn subscribe_render(&mut self, hook: RenderHook) -> SubscriptionId {
        let id = SubscriptionId::next();
        self.render_hooks.push((id, hook));
        id
    }

    /// Remove a subscription of any kind. Returns whether it was subscribed.
    ///
    /// Unsubscribing a handler that is currently running takes effect when
    /// its dispatch completes.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in self.handlers.values_mut() {
            if let Some(index) = list.iter().position(|(sub, _)| *sub == id) {
                drop(list.remove(index));
                return true;
            }
        }
        if let Some(index) = self.render_hooks.iter().position(|(sub, _)| *sub == id) {
            drop(self.render_hooks.remove(index));
            return true;
        }
        if self.detached.contains(&id) {
            return self.cancelled.insert(id);
        }
        false
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    pub fn has(&self, kind: EventKind) -> bool {
        self.count(kind) > 0
    }

    /// Whether any pointer event has a subscriber.
    pub fn has_pointer_subscribers(&self) -> bool {
        EventKind::POINTER.iter().any(|kind| self.has(*kind))
    }

    pub fn has_render_hooks(&self) -> bool {
        !self.render_hooks.is_empty()
    }

    pub(crate) fn take(&mut self, kind: EventKind) -> Vec<(SubscriptionId, EventHandler)> {
        let taken = self.handlers.remove(&kind).unwrap_or_default();
        self.detached.extend(taken.iter().map(|(id, _)| *id));
        taken
    }

    /// Reattach detached handlers ahead of any subscribed meanwhile.
    pub(crate) fn restore(&mut self, kind: EventKind, mut taken: Vec<(SubscriptionId, EventHandler)>) {
        self.drop_cancelled(&mut taken);
        let added = self.handlers.remove(&kind).unwrap_or_default();
        taken.extend(added);
        if !taken.is_empty() {
            self.handlers.insert(kind, taken);
        }
    }

    pub(crate) fn take_render_hooks(&mut self) -> Vec<(SubscriptionId, RenderHook)> {
        let taken = std::mem::take(&mut self.render_hooks);
        self.detached.extend(taken.iter().map(|(id, _)| *id));
        taken
    }

    pub(crate) fn restore_render_hooks(&mut self, mut taken: Vec<(SubscriptionId, RenderHook)>) {
        self.drop_cancelled(&mut taken);
        taken.append(&mut self.render_hooks);
        self.render_hooks = taken;
    }

    /// Reattach bookkeeping: the taken ids are no longer detached, and
    /// the ones cancelled meanwhile are dropped.
    fn drop_cancelled<T>(&mut self, taken: &mut Vec<(SubscriptionId, T)>) {
        for (id, _) in taken.iter() {
            self.detached.remove(id);
        }
        if self.cancelled.is_empty() {
            return;
        }
        taken.retain(|(id, _)| !self.cancelled.remove(id));
    }

    #[cfg(test)]
    fn pending_cancellations(&self) -> usize {
        self.cancelled.len()
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<(EventKind, usize)> = self
            .handlers
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        kinds.sort_by_key(|(kind, _)| format!("{kind:?}"));
        f.debug_struct("EventHandlers")
            .field("handlers", &kinds)
            .field("render_hooks", &self.render_hooks.len())
            .finish()
    }
}

impl ElementTree {
    /// Deliver one event to its target's subscribers, in subscription order.
    pub(crate) fn dispatch(&mut self, event: QueuedEvent) {
        let Some(element) = self.nodes.get_mut(event.target) else {
            return;
        };
        let mut handlers = element.handlers.take(event.kind);
        if handlers.is_empty() {
            return;
        }

        let name = self.fully_qualified_name(event.target);
        {
            let mut ctx = EventContext {
                tree: self,
                target: event.target,
                kind: event.kind,
                pointer: event.pointer,
                button: event.button,
                related: event.related,
            };
            for (_, handler) in handlers.iter_mut() {
                if let Err(err) = handler(&mut ctx) {
                    tracing::warn!(element = %name, event = ?event.kind, error = %err, "event handler failed");
                }
            }
        }

        if let Some(element) = self.nodes.get_mut(event.target) {
            element.handlers.restore(event.kind, handlers);
        }
    }

    pub(crate) fn dispatch_all(&mut self, events: Vec<QueuedEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }
}

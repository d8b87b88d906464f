//! Element tree.
//!
//! Elements live in a slot-map arena and refer to each other by
//! [`ElementId`]. Parent links are plain handles, so there are no reference
//! cycles to manage and a stale handle is detectable rather than dangling.
//!
//! The tree owns the hierarchy invariants: an element has at most one
//! parent, appears in that parent's child list exactly once, sibling ids
//! are unique, and no element is its own ancestor.

mod element;
mod interaction;
mod query;
mod render;

pub use element::Element;

use slotmap::{new_key_type, SlotMap};

use crate::config::EngineConfig;
use crate::error::TreeError;
use crate::event::{EventKind, QueuedEvent};

new_key_type! {
    /// Handle to an element in an [`ElementTree`].
    pub struct ElementId;
}

/// Arena of elements plus the engine configuration.
#[derive(Debug, Default)]
pub struct ElementTree {
    pub(crate) nodes: SlotMap<ElementId, Element>,
    pub(crate) config: EngineConfig,
    /// Incremented once per top-level layout call.
    pub(crate) pass: u64,
}

impl ElementTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.nodes.get(id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Insert an element and, recursively, its builder children. The
    /// element becomes a detached root.
    pub fn insert(&mut self, mut element: Element) -> Result<ElementId, TreeError> {
        validate_id(&element.id)?;
        let pending = std::mem::take(&mut element.pending);
        let id = self.nodes.insert(element);

        for child in pending {
            let child = match self.insert(child) {
                Ok(child) => child,
                Err(err) => {
                    self.dispose(id);
                    return Err(err);
                }
            };
            if let Err(err) = self.add_child(id, child) {
                self.dispose(child);
                self.dispose(id);
                return Err(err);
            }
        }

        Ok(id)
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        let (Some(parent_node), Some(child_node)) = (self.nodes.get(parent), self.nodes.get(child))
        else {
            return Err(TreeError::UnknownElement);
        };
        if child_node.parent == Some(parent) {
            return Ok(());
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(TreeError::Cycle {
                parent: self.fully_qualified_name(parent),
                child: self.fully_qualified_name(child),
            });
        }
        let duplicate = parent_node
            .children
            .iter()
            .any(|sibling| self.nodes[*sibling].id == child_node.id);
        if duplicate {
            return Err(TreeError::DuplicateId {
                parent: self.fully_qualified_name(parent),
                id: child_node.id.clone(),
            });
        }

        if let Some(previous) = child_node.parent {
            self.detach(previous, child);
        }

        self.nodes[child].parent = Some(parent);
        let parent_node = &mut self.nodes[parent];
        parent_node.children.push(child);
        parent_node.dirty = true;

        tracing::trace!(parent = %self.fully_qualified_name(parent), child = %self.nodes[child].id, "child added");
        self.dispatch(QueuedEvent::new(parent, EventKind::ChildAdded).with_related(child));
        Ok(())
    }

    /// Detach `child` from `parent`. The child stays alive as a detached
    /// root; use [`ElementTree::dispose`] to drop it.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        let Some(child_node) = self.nodes.get(child) else {
            return Err(TreeError::UnknownElement);
        };
        if !self.nodes.contains_key(parent) {
            return Err(TreeError::UnknownElement);
        }
        if child_node.parent != Some(parent) {
            return Err(TreeError::NotFound {
                from: self.fully_qualified_name(parent),
                path: child_node.id.clone(),
            });
        }
        self.detach(parent, child);
        Ok(())
    }

    /// Remove an element and its whole subtree from the arena.
    pub fn dispose(&mut self, id: ElementId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if let Some(parent) = node.parent {
            self.detach(parent, id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
    }

    fn detach(&mut self, parent: ElementId, child: ElementId) {
        let Some(child_node) = self.nodes.get_mut(child) else {
            return;
        };
        child_node.parent = None;
        let name = child_node.id.clone();

        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|c| *c != child);
            parent_node.query_cache.borrow_mut().remove(&name);
            parent_node.dirty = true;
        }

        tracing::trace!(parent = %self.fully_qualified_name(parent), child = %name, "child removed");
        self.dispatch(QueuedEvent::new(parent, EventKind::ChildRemoved).with_related(child));
    }

    /// Stable sort of the children by sort index.
    pub fn sort_children(&mut self, id: ElementId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let mut children = std::mem::take(&mut node.children);
        children.sort_by_key(|child| self.nodes.get(*child).map_or(0, |c| c.sort_index));
        self.nodes[id].children = children;
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(id)?.parent
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn previous_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|s| *s == id)?;
        index.checked_sub(1).map(|i| siblings[i])
    }

    pub fn next_sibling(&self, id: ElementId) -> Option<ElementId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|s| *s == id)?;
        siblings.get(index + 1).copied()
    }

    /// Ancestors from the parent up to the root.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Number of ancestors; 0 for a root.
    pub fn depth(&self, id: ElementId) -> usize {
        self.ancestors(id).count()
    }

    pub fn root_of(&self, id: ElementId) -> ElementId {
        self.ancestors(id).last().unwrap_or(id)
    }

    /// Dot-separated ids from the root down to `id`.
    pub fn fully_qualified_name(&self, id: ElementId) -> String {
        let Some(node) = self.nodes.get(id) else {
            return String::new();
        };
        let mut names: Vec<&str> = self
            .ancestors(id)
            .filter_map(|ancestor| self.nodes.get(ancestor).map(|n| n.id.as_str()))
            .collect();
        names.reverse();
        names.push(&node.id);
        names.join(".")
    }
}

fn validate_id(id: &str) -> Result<(), TreeError> {
    if id.is_empty() || id.contains('.') {
        return Err(TreeError::InvalidId(id.to_owned()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ElementTree, ElementId) {
        let mut tree = ElementTree::new();
        let root = tree
            .insert(
                Element::new("root")
                    .child(Element::new("a").child(Element::new("deep")))
                    .child(Element::new("b"))
                    .child(Element::new("c")),
            )
            .unwrap();
        (tree, root)
    }

    #[test]
    fn insert_attaches_builder_children() {
        let (tree, root) = sample();
        assert_eq!(tree.len(), 5);
        let ids: Vec<&str> = tree
            .children(root)
            .iter()
            .map(|c| tree.element(*c).unwrap().id())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn rejects_invalid_ids() {
        let mut tree = ElementTree::new();
        assert_eq!(
            tree.insert(Element::new("a.b")).unwrap_err(),
            TreeError::InvalidId("a.b".into())
        );
        assert!(matches!(tree.insert(Element::new("")), Err(TreeError::InvalidId(_))));
        assert!(tree.is_empty());
    }

    #[test]
    fn duplicate_builder_child_rolls_back() {
        let mut tree = ElementTree::new();
        let result = tree.insert(Element::new("root").child(Element::new("x")).child(Element::new("x")));
        assert!(matches!(result, Err(TreeError::DuplicateId { .. })));
        assert!(tree.is_empty());
    }

    #[test]
    fn siblings_and_depth() {
        let (tree, root) = sample();
        let children = tree.children(root).to_vec();
        assert_eq!(tree.previous_sibling(children[0]), None);
        assert_eq!(tree.next_sibling(children[0]), Some(children[1]));
        assert_eq!(tree.previous_sibling(children[2]), Some(children[1]));
        assert_eq!(tree.next_sibling(children[2]), None);

        let deep = tree.children(children[0])[0];
        assert_eq!(tree.depth(deep), 2);
        assert_eq!(tree.root_of(deep), root);
        assert_eq!(tree.fully_qualified_name(deep), "root.a.deep");
    }

    #[test]
    fn add_child_moves_between_parents() {
        let (mut tree, root) = sample();
        let a = tree.children(root)[0];
        let b = tree.children(root)[1];
        let deep = tree.children(a)[0];

        tree.add_child(b, deep).unwrap();
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[deep]);
        assert_eq!(tree.parent(deep), Some(b));
    }

    #[test]
    fn add_child_rejects_cycles() {
        let (mut tree, root) = sample();
        let a = tree.children(root)[0];
        let deep = tree.children(a)[0];
        assert!(matches!(tree.add_child(deep, root), Err(TreeError::Cycle { .. })));
        assert!(matches!(tree.add_child(a, a), Err(TreeError::Cycle { .. })));
        assert_eq!(tree.parent(root), None);
    }

    #[test]
    fn remove_child_detaches() {
        let (mut tree, root) = sample();
        let b = tree.children(root)[1];
        tree.remove_child(root, b).unwrap();
        assert_eq!(tree.parent(b), None);
        assert_eq!(tree.children(root).len(), 2);
        assert!(tree.contains(b));
        assert!(matches!(tree.remove_child(root, b), Err(TreeError::NotFound { .. })));
    }

    #[test]
    fn dispose_drops_subtree() {
        let (mut tree, root) = sample();
        let a = tree.children(root)[0];
        let deep = tree.children(a)[0];
        tree.dispose(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(deep));
        assert_eq!(tree.children(root).len(), 2);
        assert_eq!(tree.add_child(root, deep), Err(TreeError::UnknownElement));
    }

    #[test]
    fn sort_children_is_stable() {
        let mut tree = ElementTree::new();
        let root = tree
            .insert(
                Element::new("root")
                    .child(Element::new("a").sort_index(1))
                    .child(Element::new("b"))
                    .child(Element::new("c").sort_index(1))
                    .child(Element::new("d").sort_index(-1)),
            )
            .unwrap();
        tree.sort_children(root);
        let ids: Vec<&str> = tree
            .children(root)
            .iter()
            .map(|c| tree.element(*c).unwrap().id())
            .collect();
        assert_eq!(ids, vec!["d", "b", "a", "c"]);
    }
}

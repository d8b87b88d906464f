//! Path lookups.
//!
//! Paths are dot-separated child ids relative to a starting element
//! (`"toolbar.save.icon"`). Each element caches child id to handle; a
//! cached handle is only trusted while it is still alive, still a child of
//! the element and still carries the id, so reparenting or disposal can
//! never yield a stale result.

use super::{ElementId, ElementTree};
use crate::error::TreeError;

impl ElementTree {
    /// Resolve a path below `from`, or `None` if any segment is missing.
    pub fn find(&self, from: ElementId, path: &str) -> Option<ElementId> {
        let mut current = from;
        for segment in path.split('.') {
            if segment.is_empty() {
                return None;
            }
            current = self.find_child(current, segment)?;
        }
        Some(current)
    }

    /// Resolve a path below `from`, failing with [`TreeError::NotFound`].
    pub fn get(&self, from: ElementId, path: &str) -> Result<ElementId, TreeError> {
        self.find(from, path).ok_or_else(|| TreeError::NotFound {
            from: self.fully_qualified_name(from),
            path: path.to_owned(),
        })
    }

    pub fn has(&self, from: ElementId, path: &str) -> bool {
        self.find(from, path).is_some()
    }

    fn find_child(&self, parent: ElementId, id: &str) -> Option<ElementId> {
        let node = self.nodes.get(parent)?;

        let cached = node.query_cache.borrow().get(id).copied();
        if let Some(cached) = cached {
            let valid = self
                .nodes
                .get(cached)
                .is_some_and(|child| child.parent == Some(parent) && child.id == id);
            if valid {
                return Some(cached);
            }
        }

        let found = node
            .children
            .iter()
            .copied()
            .find(|child| self.nodes.get(*child).is_some_and(|c| c.id == id));

        let mut cache = node.query_cache.borrow_mut();
        match found {
            Some(child) => {
                cache.insert(id.to_owned(), child);
            }
            None => {
                cache.remove(id);
            }
        }
        found
    }
}

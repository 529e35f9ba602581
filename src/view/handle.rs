//! Shared read surface of a node.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

struct NodeState<D> {
    current: RefCell<Option<D>>,
    refreshing: Cell<bool>,
    refresh_requested: Cell<bool>,
}

/// Cheap, cloneable handle onto a node's current data and refresh flags.
///
/// Widget event handlers and deferred backend tasks capture a handle instead
/// of the node itself: they read the data the node last rendered and can ask
/// for a forced refresh on the next tick.
pub struct NodeHandle<D>(Rc<NodeState<D>>);

impl<D: Clone> NodeHandle<D> {
    pub(crate) fn new() -> Self {
        Self(Rc::new(NodeState {
            current: RefCell::new(None),
            refreshing: Cell::new(false),
            refresh_requested: Cell::new(false),
        }))
    }

    /// Data the node last rendered. `None` until the first refresh.
    pub fn current(&self) -> Option<D> {
        self.0.current.borrow().clone()
    }

    /// Whether the node is inside its render routine right now.
    pub fn is_refreshing(&self) -> bool {
        self.0.refreshing.get()
    }

    /// Force the node to re-render on its next refresh even if its data did
    /// not change.
    pub fn request_refresh(&self) {
        self.0.refresh_requested.set(true);
    }

    /// Whether a forced refresh is pending.
    pub fn refresh_requested(&self) -> bool {
        self.0.refresh_requested.get()
    }

    pub(crate) fn replace(&self, data: Option<D>) -> Option<D> {
        self.0.current.replace(data)
    }

    pub(crate) fn set_refreshing(&self, refreshing: bool) {
        self.0.refreshing.set(refreshing);
    }

    pub(crate) fn clear_requested(&self) {
        self.0.refresh_requested.set(false);
    }
}

impl<D> Clone for NodeHandle<D> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<D> fmt::Debug for NodeHandle<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeHandle")
            .field("initialized", &self.0.current.borrow().is_some())
            .field("refreshing", &self.0.refreshing.get())
            .field("refresh_requested", &self.0.refresh_requested.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let h: NodeHandle<u8> = NodeHandle::new();
        assert_eq!(h.current(), None);
        assert!(!h.is_refreshing());
        assert!(!h.refresh_requested());
    }

    #[test]
    fn clones_observe_same_state() {
        let h: NodeHandle<u8> = NodeHandle::new();
        let other = h.clone();
        assert_eq!(h.replace(Some(4)), None);
        other.request_refresh();
        assert_eq!(other.current(), Some(4));
        assert!(h.refresh_requested());
        h.clear_requested();
        assert!(!other.refresh_requested());
    }
}

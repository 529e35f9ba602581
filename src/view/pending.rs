//! Bookkeeping for asynchronous resources a node waits on.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use tracing::debug;

/// Set of outstanding loads, shared between a node and the backend tasks
/// that complete them.
///
/// A node is pending while the set is non-empty. Each key completes at most
/// once, and only the completion that empties the set reports `true`, so the
/// owner performs exactly one finishing transition.
#[derive(Debug)]
pub struct PendingLoads<K> {
    keys: Rc<RefCell<HashSet<K>>>,
}

impl<K: Eq + Hash + Debug> PendingLoads<K> {
    /// An empty set.
    pub fn new() -> Self {
        Self {
            keys: Rc::new(RefCell::new(HashSet::new())),
        }
    }

    /// Start waiting on `key`. Returns `false` if it was already pending.
    pub fn begin(&self, key: K) -> bool {
        self.keys.borrow_mut().insert(key)
    }

    /// Mark `key` as loaded.
    ///
    /// Returns `true` only if `key` was pending and was the last one.
    pub fn complete(&self, key: &K) -> bool {
        let mut keys = self.keys.borrow_mut();
        if !keys.remove(key) {
            return false;
        }
        let finished = keys.is_empty();
        if finished {
            debug!(?key, "all pending loads complete");
        }
        finished
    }

    /// Whether any load is outstanding.
    pub fn is_pending(&self) -> bool {
        !self.keys.borrow().is_empty()
    }

    /// Number of outstanding loads.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    /// Whether no load is outstanding.
    pub fn is_empty(&self) -> bool {
        !self.is_pending()
    }
}

impl<K> Clone for PendingLoads<K> {
    fn clone(&self) -> Self {
        Self {
            keys: Rc::clone(&self.keys),
        }
    }
}

impl<K: Eq + Hash + Debug> Default for PendingLoads<K> {
    fn default() -> Self {
        Self::new()
    }
}

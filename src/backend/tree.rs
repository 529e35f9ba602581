//! Headless widget tree: insert, attach, detach, destroy, walk, events.

use std::collections::VecDeque;
use std::fmt;

use slotmap::{SecondaryMap, SlotMap};
use tracing::trace;

use super::event::{EventHandler, Task, WidgetEvent};
use super::traits::Backend;
use super::widget::{WidgetData, WidgetId};

/// Empty slice constant for returning when a widget has no children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

struct Scheduled {
    due: u64,
    task: Task,
}

// ---------------------------------------------------------------------------
// WidgetTree
// ---------------------------------------------------------------------------

/// Retained widget tree backed by a slotmap arena.
///
/// Widgets are created detached; top-level windows are registered with
/// [`mount`](WidgetTree::mount). Parent/child links live in secondary maps so
/// destroying a widget is O(subtree size). The tree also owns the event
/// handlers registered by views and a tick-driven queue of deferred tasks.
pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, WidgetData>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    parent: SecondaryMap<WidgetId, WidgetId>,
    handlers: SecondaryMap<WidgetId, Vec<EventHandler>>,
    roots: Vec<WidgetId>,
    tasks: Vec<Scheduled>,
    tick: u64,
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
            handlers: SecondaryMap::new(),
            roots: Vec::new(),
            tasks: Vec::new(),
            tick: 0,
        }
    }

    /// Register a widget as a top-level window. No-op if already mounted.
    pub fn mount(&mut self, id: WidgetId) {
        if self.nodes.contains_key(id) && !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    /// Top-level windows, in mount order.
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// The parent of a widget, if attached.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.parent.get(id).copied()
    }

    /// Children of a widget. Empty if it has none or does not exist.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Ancestors of `id`, nearest first. Does not include `id` itself.
    pub fn ancestors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Immutable access to a widget.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetData> {
        self.nodes.get(id)
    }

    /// Mutable access to a widget.
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetData> {
        self.nodes.get_mut(id)
    }

    /// Number of live widgets, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no widgets.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether the widget exists.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// Every widget reachable from a mounted root, in tree order.
    pub fn walk_mounted(&self) -> Vec<WidgetId> {
        self.roots
            .iter()
            .flat_map(|&root| self.walk_depth_first(root))
            .collect()
    }

    // ── Events and tasks ─────────────────────────────────────────────

    /// Deliver an event to the handlers of a widget.
    ///
    /// Returns `false` if the widget does not exist, is disabled, or has no
    /// handlers.
    pub fn emit(&mut self, id: WidgetId, event: WidgetEvent) -> bool {
        let Some(widget) = self.nodes.get_mut(id) else {
            return false;
        };
        if !widget.enabled {
            return false;
        }
        let Some(handlers) = self.handlers.get_mut(id) else {
            return false;
        };
        trace!(kind = %widget.kind, ?event, "emit");
        for handler in handlers.iter_mut() {
            handler(&event, &mut *widget);
        }
        !handlers.is_empty()
    }

    /// Advance the backend clock by one tick and run every task that is due.
    ///
    /// Returns the number of tasks run. Tasks scheduled by a running task are
    /// queued for a later tick.
    pub fn pump(&mut self) -> usize {
        self.tick += 1;
        let now = self.tick;
        let (due, pending): (Vec<Scheduled>, Vec<Scheduled>) =
            std::mem::take(&mut self.tasks)
                .into_iter()
                .partition(|scheduled| scheduled.due <= now);
        self.tasks = pending;
        let count = due.len();
        for scheduled in due {
            (scheduled.task)(self);
        }
        count
    }

    /// Number of tasks not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Current backend tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    fn detach(&mut self, id: WidgetId) {
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
    }
}

impl Backend for WidgetTree {
    fn create(&mut self, data: WidgetData) -> WidgetId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    fn destroy(&mut self, id: WidgetId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.detach(id);
        self.roots.retain(|&root| root != id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.handlers.remove(current);
            self.nodes.remove(current);
        }
    }

    fn insert_child(&mut self, parent: WidgetId, index: usize, child: WidgetId) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        self.detach(child);
        if let Some(siblings) = self.children.get_mut(parent) {
            let index = index.min(siblings.len());
            siblings.insert(index, child);
            self.parent.insert(child, parent);
        }
    }

    fn take_child(&mut self, parent: WidgetId, index: usize) -> Option<WidgetId> {
        let siblings = self.children.get_mut(parent)?;
        if index >= siblings.len() {
            return None;
        }
        let child = siblings.remove(index);
        self.parent.remove(child);
        Some(child)
    }

    fn children_of(&self, parent: WidgetId) -> Vec<WidgetId> {
        self.children(parent).to_vec()
    }

    fn widget(&self, id: WidgetId) -> Option<&WidgetData> {
        self.nodes.get(id)
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut WidgetData> {
        self.nodes.get_mut(id)
    }

    fn on_event(&mut self, id: WidgetId, handler: EventHandler) {
        if !self.nodes.contains_key(id) {
            return;
        }
        match self.handlers.get_mut(id) {
            Some(handlers) => handlers.push(handler),
            None => {
                self.handlers.insert(id, vec![handler]);
            }
        }
    }

    fn schedule(&mut self, delay_ticks: u32, task: Task) {
        let due = self.tick + u64::from(delay_ticks.max(1));
        self.tasks.push(Scheduled { due, task });
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.nodes.len())
            .field("roots", &self.roots)
            .field("pending_tasks", &self.tasks.len())
            .field("tick", &self.tick)
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Build a small test tree:
    /// ```text
    ///       root
    ///      /    \
    ///    a        b
    ///   / \
    ///  c   d
    /// ```
    fn build_tree() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.create(WidgetData::new("Window").with_name("root"));
        tree.mount(root);
        let a = tree.create(WidgetData::new("Column").with_name("a"));
        let b = tree.create(WidgetData::new("Column").with_name("b"));
        let c = tree.create(WidgetData::new("Button").with_name("c"));
        let d = tree.create(WidgetData::new("Label").with_name("d"));
        tree.append_child(root, a);
        tree.append_child(root, b);
        tree.append_child(a, c);
        tree.append_child(a, d);
        (tree, root, a, b, c, d)
    }

    // ── Structure ────────────────────────────────────────────────────

    #[test]
    fn append_builds_parent_links() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.children(a), &[c, d]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.ancestors(c), vec![a, root]);
    }

    #[test]
    fn insert_child_at_index() {
        let (mut tree, root, a, b, ..) = build_tree();
        let e = tree.create(WidgetData::new("Label"));
        tree.insert_child(root, 1, e);
        assert_eq!(tree.children(root), &[a, e, b]);
    }

    #[test]
    fn insert_child_clamps_index() {
        let (mut tree, root, a, b, ..) = build_tree();
        let e = tree.create(WidgetData::new("Label"));
        tree.insert_child(root, 99, e);
        assert_eq!(tree.children(root), &[a, b, e]);
    }

    #[test]
    fn insert_child_moves_attached_widget() {
        let (mut tree, _root, a, b, c, d) = build_tree();
        tree.insert_child(b, 0, c);
        assert_eq!(tree.children(a), &[d]);
        assert_eq!(tree.children(b), &[c]);
        assert_eq!(tree.parent(c), Some(b));
    }

    #[test]
    fn take_child_detaches_but_keeps_widget() {
        let (mut tree, _root, a, _b, c, d) = build_tree();
        assert_eq!(tree.take_child(a, 0), Some(c));
        assert!(tree.contains(c));
        assert_eq!(tree.parent(c), None);
        assert_eq!(tree.children(a), &[d]);
        assert_eq!(tree.take_child(a, 5), None);
    }

    #[test]
    fn destroy_subtree() {
        let (mut tree, root, a, b, c, d) = build_tree();
        tree.destroy(a);
        assert!(!tree.contains(a));
        assert!(!tree.contains(c));
        assert!(!tree.contains(d));
        assert_eq!(tree.children(root), &[b]);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn destroy_root_unmounts() {
        let (mut tree, root, ..) = build_tree();
        tree.destroy(root);
        assert!(tree.is_empty());
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn destroy_stale_id_is_noop() {
        let mut tree = WidgetTree::new();
        let id = tree.create(WidgetData::new("X"));
        tree.destroy(id);
        tree.destroy(id);
        assert!(tree.is_empty());
    }

    #[test]
    fn walk_depth_first_order() {
        let (tree, root, a, b, c, d) = build_tree();
        assert_eq!(tree.walk_depth_first(root), vec![root, a, c, d, b]);
        assert_eq!(tree.walk_mounted(), vec![root, a, c, d, b]);
    }

    #[test]
    fn setters_update_state() {
        let (mut tree, _root, _a, _b, c, _d) = build_tree();
        tree.set_text(c, "OK");
        tree.set_visible(c, false);
        tree.set_selected(c, true);
        tree.set_prop(c, "color", "#FF0000".into());
        let w = tree.get(c).unwrap();
        assert_eq!(w.text, "OK");
        assert!(!w.visible);
        assert!(w.selected);
        assert_eq!(w.prop("color"), Some("#FF0000"));
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn emit_calls_handlers_with_widget_state() {
        let (mut tree, _root, _a, _b, c, _d) = build_tree();
        let clicks = Rc::new(Cell::new(0));
        let seen = clicks.clone();
        tree.on_event(
            c,
            Box::new(move |event, widget| {
                if *event == WidgetEvent::Clicked {
                    seen.set(seen.get() + 1);
                    widget.text = "clicked".into();
                }
            }),
        );
        assert!(tree.emit(c, WidgetEvent::Clicked));
        assert_eq!(clicks.get(), 1);
        assert_eq!(tree.get(c).unwrap().text, "clicked");
    }

    #[test]
    fn emit_without_handler_or_disabled() {
        let (mut tree, _root, _a, _b, c, d) = build_tree();
        assert!(!tree.emit(d, WidgetEvent::Clicked));
        tree.on_event(c, Box::new(|_, _| {}));
        tree.get_mut(c).unwrap().enabled = false;
        assert!(!tree.emit(c, WidgetEvent::Clicked));
    }

    #[test]
    fn destroy_drops_handlers() {
        let (mut tree, _root, _a, _b, c, _d) = build_tree();
        tree.on_event(c, Box::new(|_, _| {}));
        tree.destroy(c);
        assert!(!tree.emit(c, WidgetEvent::Clicked));
    }

    #[test]
    fn scheduled_tasks_run_once_when_due() {
        let mut tree = WidgetTree::new();
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        tree.schedule(
            2,
            Box::new(move |backend| {
                counter.set(counter.get() + 1);
                backend.create(WidgetData::new("Sprite"));
            }),
        );
        assert_eq!(tree.pump(), 0);
        assert_eq!(runs.get(), 0);
        assert_eq!(tree.pump(), 1);
        assert_eq!(runs.get(), 1);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.pump(), 0);
        assert_eq!(runs.get(), 1);
        assert_eq!(tree.pending_tasks(), 0);
    }

    #[test]
    fn zero_delay_runs_on_next_tick() {
        let mut tree = WidgetTree::new();
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        tree.schedule(0, Box::new(move |_| flag.set(true)));
        assert!(!ran.get());
        tree.pump();
        assert!(ran.get());
    }
}

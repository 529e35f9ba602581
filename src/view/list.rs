//! `ListView`: a node bound to an ordered keyed collection.
//!
//! On every render the list diffs the previous keys against the new ones and
//! applies the operations to its element nodes: removed elements are detached
//! and parked in a per-key pool, inserted keys reuse a parked element when one
//! exists and build a fresh one otherwise. Parked elements left over once all
//! operations ran are disposed. Selection follows the selected key, not the
//! row index.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::backend::{Backend, WidgetEvent, WidgetId};
use crate::data::Shared;
use crate::diff::{list_diff, OpKind};

use super::handle::NodeHandle;
use super::node::guard_submitter;
use super::submit::Submitter;
use super::traits::{describe, Component, Inspect, ViewId};

/// Data of the element component an adapter builds.
pub type ElementData<A> = <<A as ListAdapter>::Element as Component>::Data;

// ---------------------------------------------------------------------------
// ListAdapter
// ---------------------------------------------------------------------------

/// Describes one kind of keyed list: its widget, keys, items and elements.
pub trait ListAdapter: 'static {
    /// The bound collection.
    type Collection: Shared;
    /// Stable key of an item. Keys within one collection are unique.
    type Key: Clone + Eq + Hash + Debug + 'static;
    /// Node rendering a single item.
    type Element: Component;

    /// Display name, used by the debug tree.
    fn name(&self) -> &'static str {
        "ListView"
    }

    /// Create the list widget.
    fn create_widget(&mut self, backend: &mut dyn Backend) -> WidgetId;

    /// Keys of the collection, in display order.
    fn keys(&self, collection: &Self::Collection) -> Vec<Self::Key>;

    /// Data of the element at `index`.
    fn item_at(&self, collection: &Self::Collection, index: usize) -> Option<ElementData<Self>>;

    /// Build a fresh element. `submit` carries the element's edits upward.
    fn create_element(
        &mut self,
        backend: &mut dyn Backend,
        submit: Submitter<ElementData<Self>>,
    ) -> Self::Element;

    /// A copy of `collection` with the item at `index` replaced. `None`
    /// drops the element's submission.
    fn replace_item(
        collection: &Self::Collection,
        index: usize,
        item: ElementData<Self>,
    ) -> Option<Self::Collection>;

    /// A copy of `collection` reflecting a new current row, for lists whose
    /// selection lives in the data. `None` keeps the selection view-local.
    fn selection_changed(
        collection: &Self::Collection,
        keys: &[Self::Key],
        row: Option<usize>,
    ) -> Option<Self::Collection> {
        let _ = (collection, keys, row);
        None
    }

    /// Key that should be selected after a render. Defaults to keeping the
    /// current one.
    fn selected_key(
        &self,
        collection: &Self::Collection,
        current: Option<&Self::Key>,
    ) -> Option<Self::Key> {
        let _ = collection;
        current.cloned()
    }

    /// Attach an element widget at `index`.
    fn attach(&mut self, backend: &mut dyn Backend, list: WidgetId, index: usize, element: WidgetId) {
        backend.insert_child(list, index, element);
    }

    /// Detach the element widget at `index`.
    fn detach(&mut self, backend: &mut dyn Backend, list: WidgetId, index: usize) {
        backend.take_child(list, index);
    }

    /// Show `row` as the current row.
    fn set_current_row(&mut self, backend: &mut dyn Backend, list: WidgetId, row: Option<usize>) {
        for (index, child) in backend.children_of(list).into_iter().enumerate() {
            backend.set_selected(child, Some(index) == row);
        }
        let row = row.map_or_else(|| "-".to_owned(), |row| row.to_string());
        backend.set_prop(list, "current_row", row);
    }

    /// Extra rendering of the list widget itself, after reconciliation.
    fn render(&mut self, backend: &mut dyn Backend, list: WidgetId, collection: &Self::Collection) {
        let _ = (backend, list, collection);
    }
}

// ---------------------------------------------------------------------------
// ListView
// ---------------------------------------------------------------------------

struct Slot<E> {
    element: E,
    index: Rc<Cell<usize>>,
}

/// A keyed list node.
pub struct ListView<A: ListAdapter> {
    id: ViewId,
    adapter: A,
    widget: WidgetId,
    keys: Rc<RefCell<Vec<A::Key>>>,
    elements: Vec<Slot<A::Element>>,
    index_of: HashMap<A::Key, usize>,
    inputs: Vec<Option<ElementData<A>>>,
    selected: Rc<RefCell<Option<A::Key>>>,
    handle: NodeHandle<A::Collection>,
    submit: Submitter<A::Collection>,
}

impl<A: ListAdapter> ListView<A> {
    /// Build the list widget and wire row selection.
    pub fn new(mut adapter: A, backend: &mut dyn Backend, submit: Submitter<A::Collection>) -> Self {
        let id = ViewId::next();
        let handle = NodeHandle::new();
        let submit = guard_submitter(id, &handle, submit);
        let widget = adapter.create_widget(backend);
        let keys = Rc::new(RefCell::new(Vec::new()));
        let selected = Rc::new(RefCell::new(None));

        let row_keys = Rc::clone(&keys);
        let row_selected = Rc::clone(&selected);
        let row_handle = handle.clone();
        let row_submit = submit.clone();
        backend.on_event(
            widget,
            Box::new(move |event, _widget| {
                let WidgetEvent::RowSelected(row) = event else {
                    return;
                };
                let keys = row_keys.borrow();
                let key = row.and_then(|row| keys.get(row).cloned());
                trace!(%id, ?key, "row selected");
                *row_selected.borrow_mut() = key;
                row_handle.request_refresh();
                let Some(current) = row_handle.current() else {
                    return;
                };
                if let Some(next) = A::selection_changed(&current, &keys, *row) {
                    row_submit.commit(next);
                }
            }),
        );

        Self {
            id,
            adapter,
            widget,
            keys,
            elements: Vec::new(),
            index_of: HashMap::new(),
            inputs: Vec::new(),
            selected,
            handle,
            submit,
        }
    }

    /// The adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Handle onto this node.
    pub fn handle(&self) -> NodeHandle<A::Collection> {
        self.handle.clone()
    }

    /// Keys currently shown, in order.
    pub fn keys(&self) -> Vec<A::Key> {
        self.keys.borrow().clone()
    }

    /// Row of `key`, if shown.
    pub fn index_of(&self, key: &A::Key) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    /// The element at `index`.
    pub fn element(&self, index: usize) -> Option<&A::Element> {
        self.elements.get(index).map(|slot| &slot.element)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the list shows no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Currently selected key.
    pub fn selected_key(&self) -> Option<A::Key> {
        self.selected.borrow().clone()
    }

    /// Currently selected row.
    pub fn selected_row(&self) -> Option<usize> {
        self.selected
            .borrow()
            .as_ref()
            .and_then(|key| self.index_of.get(key).copied())
    }

    fn new_slot(&mut self, backend: &mut dyn Backend) -> Slot<A::Element> {
        let index = Rc::new(Cell::new(0));
        let submit = {
            let index = Rc::clone(&index);
            let handle = self.handle.clone();
            self.submit.map(move |item| {
                let current = handle.current()?;
                A::replace_item(&current, index.get(), item)
            })
        };
        let element = self.adapter.create_element(backend, submit);
        Slot { element, index }
    }

    fn reconcile(&mut self, backend: &mut dyn Backend, data: &A::Collection) {
        let new_keys = self.adapter.keys(data);
        let mut working = self.keys.borrow().clone();
        let ops = list_diff(&working, &new_keys, |key: &A::Key| key.clone());
        if !ops.is_empty() {
            debug!(id = %self.id, ops = ops.len(), "list reconcile");
        }

        let mut slots = std::mem::take(&mut self.elements);
        let mut pool: HashMap<A::Key, Vec<Slot<A::Element>>> = HashMap::new();
        for op in ops {
            match op.kind {
                OpKind::Remove => {
                    self.adapter.detach(backend, self.widget, op.index);
                    let slot = slots.remove(op.index);
                    working.remove(op.index);
                    pool.entry(op.item).or_default().push(slot);
                }
                OpKind::Insert => {
                    let reused = pool.get_mut(&op.item).and_then(Vec::pop);
                    let slot = match reused {
                        Some(slot) => slot,
                        None => self.new_slot(backend),
                    };
                    self.adapter
                        .attach(backend, self.widget, op.index, slot.element.widget());
                    slots.insert(op.index, slot);
                    working.insert(op.index, op.item);
                }
            }
        }
        debug_assert!(working == new_keys, "list reconciliation diverged");

        for (_, stale) in pool {
            for mut slot in stale {
                slot.element.dispose(backend);
            }
        }

        self.index_of = new_keys
            .iter()
            .enumerate()
            .map(|(index, key)| (key.clone(), index))
            .collect();
        for (index, slot) in slots.iter().enumerate() {
            slot.index.set(index);
        }
        self.inputs = (0..slots.len())
            .map(|index| self.adapter.item_at(data, index))
            .collect();
        self.elements = slots;
        *self.keys.borrow_mut() = new_keys;
    }

    fn restore_selection(&mut self, backend: &mut dyn Backend, data: &A::Collection) {
        let wanted = {
            let current = self.selected.borrow();
            self.adapter.selected_key(data, current.as_ref())
        };
        let row = wanted
            .as_ref()
            .and_then(|key| self.index_of.get(key).copied());
        // A key that vanished falls back to no selection.
        *self.selected.borrow_mut() = row.and(wanted);
        self.adapter.set_current_row(backend, self.widget, row);
    }
}

impl<A: ListAdapter> Component for ListView<A> {
    type Data = A::Collection;

    fn id(&self) -> ViewId {
        self.id
    }

    fn widget(&self) -> WidgetId {
        self.widget
    }

    fn try_refresh(&mut self, backend: &mut dyn Backend, data: A::Collection) {
        if self.handle.is_refreshing() {
            trace!(id = %self.id, "nested refresh ignored");
            return;
        }
        let changed = self
            .handle
            .current()
            .is_none_or(|current| !current.same(&data));
        if changed || self.handle.refresh_requested() {
            self.handle.replace(Some(data.clone()));
            self.handle.set_refreshing(true);
            self.reconcile(backend, &data);
            self.adapter.render(backend, self.widget, &data);
            self.restore_selection(backend, &data);
            self.handle.set_refreshing(false);
            self.handle.clear_requested();
        }
        for (slot, input) in self.elements.iter_mut().zip(&self.inputs) {
            if let Some(input) = input {
                slot.element.try_refresh(backend, input.clone());
            }
        }
    }

    fn dispose(&mut self, backend: &mut dyn Backend) {
        for mut slot in self.elements.drain(..) {
            slot.element.dispose(backend);
        }
        self.keys.borrow_mut().clear();
        self.index_of.clear();
        self.inputs.clear();
        backend.destroy(self.widget);
    }

    fn inspect(&self) -> &dyn Inspect {
        self
    }
}

impl<A: ListAdapter> Inspect for ListView<A> {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn name(&self) -> &str {
        self.adapter.name()
    }

    fn data_identity(&self) -> Option<usize> {
        self.handle.current().map(|data| data.identity())
    }

    fn describe_data(&self) -> String {
        describe(self.handle.current().as_ref())
    }

    fn submit_connected(&self) -> bool {
        self.submit.is_connected()
    }

    fn child_views(&self) -> Vec<&dyn Inspect> {
        self.elements
            .iter()
            .map(|slot| slot.element.inspect())
            .collect()
    }
}

impl<A: ListAdapter> fmt::Debug for ListView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("id", &self.id)
            .field("keys", &self.keys.borrow())
            .field("selected", &self.selected.borrow())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

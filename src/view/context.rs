//! What a view sees while creating its widget or rendering.

use tracing::trace;

use crate::backend::{Backend, WidgetId};
use crate::data::Shared;

use super::handle::NodeHandle;
use super::submit::Submitter;
use super::traits::{Component, Inspect, ViewId};

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Borrowed access to a node's backend, children and channels.
pub struct Context<'a, D: Shared> {
    pub(crate) backend: &'a mut dyn Backend,
    pub(crate) previous: Option<&'a D>,
    pub(crate) children: &'a mut Children<D>,
    pub(crate) handle: &'a NodeHandle<D>,
    pub(crate) submit: &'a Submitter<D>,
}

impl<'a, D: Shared> Context<'a, D> {
    /// The rendering backend.
    pub fn backend(&mut self) -> &mut dyn Backend {
        &mut *self.backend
    }

    /// Data rendered before the current one. `None` on the first render.
    pub fn previous(&self) -> Option<&D> {
        self.previous
    }

    /// A handle onto this node, for event handlers and deferred tasks.
    pub fn handle(&self) -> NodeHandle<D> {
        self.handle.clone()
    }

    /// This node's own submission channel.
    pub fn submitter(&self) -> Submitter<D> {
        self.submit.clone()
    }

    /// A submission channel for a child bound to a `C` slice of this node's
    /// data. `set` builds this node's next value from its current one and
    /// the child's submission; returning `None` drops the submission.
    pub fn lens<C: 'static>(&self, set: impl Fn(&D, C) -> Option<D> + 'static) -> Submitter<C> {
        let handle = self.handle.clone();
        self.submit.map(move |value: C| {
            let current = handle.current()?;
            set(&current, value)
        })
    }

    /// Bind a child; its data is recomputed from this node's data with
    /// `select` on every refresh of this node.
    pub fn bind<C: Component>(
        &mut self,
        child: C,
        select: impl Fn(&D) -> C::Data + 'static,
    ) -> ViewId {
        self.bind_partial(child, move |data| Some(select(data)))
    }

    /// Like [`bind`](Context::bind), for a selector that may find nothing.
    /// A child whose selector yields `None` keeps its last data and is not
    /// refreshed.
    pub fn bind_partial<C: Component>(
        &mut self,
        child: C,
        select: impl Fn(&D) -> Option<C::Data> + 'static,
    ) -> ViewId {
        self.children.push(child, select)
    }

    /// Remove a bound child and dispose it. No-op for an unknown id.
    pub fn unbind(&mut self, id: ViewId) {
        self.children.remove(id, &mut *self.backend);
    }

    /// The top-level widget of a bound child.
    pub fn child_widget(&self, id: ViewId) -> Option<WidgetId> {
        self.children.widget(id)
    }

    /// Number of bound children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

// ---------------------------------------------------------------------------
// Children
// ---------------------------------------------------------------------------

trait Child<D> {
    fn id(&self) -> ViewId;
    fn widget(&self) -> WidgetId;
    fn select(&mut self, data: &D);
    fn refresh(&mut self, backend: &mut dyn Backend);
    fn dispose(&mut self, backend: &mut dyn Backend);
    fn inspect(&self) -> &dyn Inspect;
}

struct Binding<D, C: Component> {
    component: C,
    select: Box<dyn Fn(&D) -> Option<C::Data>>,
    input: Option<C::Data>,
}

impl<D, C: Component> Child<D> for Binding<D, C> {
    fn id(&self) -> ViewId {
        self.component.id()
    }

    fn widget(&self) -> WidgetId {
        self.component.widget()
    }

    fn select(&mut self, data: &D) {
        self.input = (self.select)(data);
    }

    fn refresh(&mut self, backend: &mut dyn Backend) {
        if let Some(input) = self.input.clone() {
            self.component.try_refresh(backend, input);
        }
    }

    fn dispose(&mut self, backend: &mut dyn Backend) {
        self.component.dispose(backend);
    }

    fn inspect(&self) -> &dyn Inspect {
        self.component.inspect()
    }
}

/// Bound children of a node with their cached selector outputs.
pub(crate) struct Children<D> {
    entries: Vec<Box<dyn Child<D>>>,
}

impl<D: 'static> Children<D> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn push<C: Component>(
        &mut self,
        component: C,
        select: impl Fn(&D) -> Option<C::Data> + 'static,
    ) -> ViewId {
        let id = component.id();
        self.entries.push(Box::new(Binding {
            component,
            select: Box::new(select),
            input: None,
        }));
        id
    }

    fn remove(&mut self, id: ViewId, backend: &mut dyn Backend) {
        if let Some(pos) = self.entries.iter().position(|child| child.id() == id) {
            let mut child = self.entries.remove(pos);
            child.dispose(backend);
            trace!(%id, "child unbound");
        }
    }

    fn widget(&self, id: ViewId) -> Option<WidgetId> {
        self.entries
            .iter()
            .find(|child| child.id() == id)
            .map(|child| child.widget())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Recompute every child's input from `data`.
    pub(crate) fn select_all(&mut self, data: &D) {
        for child in &mut self.entries {
            child.select(data);
        }
    }

    /// Refresh every child with its cached input.
    pub(crate) fn refresh_all(&mut self, backend: &mut dyn Backend) {
        for child in &mut self.entries {
            child.refresh(backend);
        }
    }

    pub(crate) fn dispose_all(&mut self, backend: &mut dyn Backend) {
        for mut child in self.entries.drain(..) {
            child.dispose(backend);
        }
    }

    pub(crate) fn inspect_all(&self) -> Vec<&dyn Inspect> {
        self.entries.iter().map(|child| child.inspect()).collect()
    }
}

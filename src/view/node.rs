//! `ViewNode`: the generic refresh algorithm around a [`View`].

use std::fmt;

use tracing::trace;

use crate::backend::{Backend, WidgetId};
use crate::data::Shared;

use super::context::{Children, Context};
use super::handle::NodeHandle;
use super::submit::Submitter;
use super::traits::{describe, Component, Inspect, View, ViewId};

// ---------------------------------------------------------------------------
// ViewNode
// ---------------------------------------------------------------------------

/// A live node: a [`View`] plus its data slots, flags and bound children.
///
/// On [`try_refresh`](Component::try_refresh) the node renders only when its
/// data changed by identity or a refresh was requested through its
/// [`NodeHandle`]. Children are refreshed on every call, with selector
/// outputs recomputed whenever the node itself rendered.
pub struct ViewNode<V: View> {
    id: ViewId,
    view: V,
    widget: WidgetId,
    previous: Option<V::Data>,
    children: Children<V::Data>,
    handle: NodeHandle<V::Data>,
    submit: Submitter<V::Data>,
}

impl<V: View> ViewNode<V> {
    /// Build the node and its widget.
    ///
    /// `submit` is the owner's channel for this node's data. The node wraps
    /// it so that submissions raised while the node is rendering are dropped.
    pub fn new(mut view: V, backend: &mut dyn Backend, submit: Submitter<V::Data>) -> Self {
        let id = ViewId::next();
        let handle = NodeHandle::new();
        let submit = guard_submitter(id, &handle, submit);
        let mut children = Children::new();
        let widget = {
            let mut cx = Context {
                backend,
                previous: None,
                children: &mut children,
                handle: &handle,
                submit: &submit,
            };
            view.create_widget(&mut cx)
        };
        trace!(%id, name = view.name(), "view created");
        Self {
            id,
            view,
            widget,
            previous: None,
            children,
            handle,
            submit,
        }
    }

    /// The wrapped view.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the wrapped view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Handle onto this node.
    pub fn handle(&self) -> NodeHandle<V::Data> {
        self.handle.clone()
    }

    /// Data the node last rendered.
    pub fn current(&self) -> Option<V::Data> {
        self.handle.current()
    }

    /// Data rendered before the current one.
    pub fn previous(&self) -> Option<&V::Data> {
        self.previous.as_ref()
    }

    /// This node's guarded submission channel.
    pub fn submitter(&self) -> Submitter<V::Data> {
        self.submit.clone()
    }

    fn render(&mut self, backend: &mut dyn Backend, data: &V::Data) {
        self.handle.set_refreshing(true);
        let mut cx = Context {
            backend,
            previous: self.previous.as_ref(),
            children: &mut self.children,
            handle: &self.handle,
            submit: &self.submit,
        };
        self.view.render(&mut cx, data);
        self.handle.set_refreshing(false);
    }

    fn children_enabled(&self) -> bool {
        !self.view.is_pending() && self.view.should_refresh_children()
    }
}

/// Wrap `parent` so submissions raised during the node's own render are
/// dropped.
pub(crate) fn guard_submitter<D: Shared>(
    id: ViewId,
    handle: &NodeHandle<D>,
    parent: Submitter<D>,
) -> Submitter<D> {
    if !parent.is_connected() {
        return parent;
    }
    let handle = handle.clone();
    Submitter::new(move |value, record_in_history| {
        if handle.is_refreshing() {
            trace!(%id, "submission during render dropped");
            return;
        }
        parent.submit(value, record_in_history);
    })
}

impl<V: View> Component for ViewNode<V> {
    type Data = V::Data;

    fn id(&self) -> ViewId {
        self.id
    }

    fn widget(&self) -> WidgetId {
        self.widget
    }

    fn try_refresh(&mut self, backend: &mut dyn Backend, data: V::Data) {
        if self.handle.is_refreshing() {
            trace!(id = %self.id, "nested refresh ignored");
            return;
        }
        let current = self.handle.current();
        let should_refresh = !self.view.is_pending()
            && (self.handle.refresh_requested()
                || self.view.should_refresh(&data, current.as_ref()));

        if should_refresh {
            trace!(id = %self.id, name = self.view.name(), "render");
            self.previous = current;
            self.handle.replace(Some(data.clone()));
            self.render(backend, &data);
            self.handle.clear_requested();
            if self.children_enabled() {
                self.children.select_all(&data);
            }
        }

        if self.children_enabled() {
            self.children.refresh_all(backend);
        }
    }

    fn dispose(&mut self, backend: &mut dyn Backend) {
        self.children.dispose_all(backend);
        backend.destroy(self.widget);
        trace!(id = %self.id, "view disposed");
    }

    fn inspect(&self) -> &dyn Inspect {
        self
    }
}

impl<V: View> Inspect for ViewNode<V> {
    fn view_id(&self) -> ViewId {
        self.id
    }

    fn name(&self) -> &str {
        self.view.name()
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
        self.children.inspect_all()
    }
}

impl<V: View> fmt::Debug for ViewNode<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewNode")
            .field("id", &self.id)
            .field("name", &self.view.name())
            .field("widget", &self.widget)
            .field("children", &self.children.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

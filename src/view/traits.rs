//! The `View`, `Component` and `Inspect` traits.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::{Backend, WidgetId};
use crate::data::Shared;

use super::context::Context;

// ---------------------------------------------------------------------------
// ViewId
// ---------------------------------------------------------------------------

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a live node, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw counter value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// One kind of node: how to build its widget and render data into it.
///
/// Implementors hold their own widget ids and any per-node state. The
/// generic refresh algorithm lives in [`ViewNode`](super::ViewNode).
pub trait View: 'static {
    /// The slice of the snapshot this node is bound to.
    type Data: Shared;

    /// Display name, used by the debug tree.
    fn name(&self) -> &'static str;

    /// Create the node's backend widget and bind any static children.
    fn create_widget(&mut self, cx: &mut Context<'_, Self::Data>) -> WidgetId;

    /// Update the widget's visible state from `data`.
    fn render(&mut self, cx: &mut Context<'_, Self::Data>, data: &Self::Data) {
        let _ = (cx, data);
    }

    /// Whether `new` requires a render. Defaults to an identity comparison.
    fn should_refresh(&self, new: &Self::Data, current: Option<&Self::Data>) -> bool {
        current.is_none_or(|current| !current.same(new))
    }

    /// Whether children are refreshed along with this node.
    fn should_refresh_children(&self) -> bool {
        true
    }

    /// Whether the node is waiting on an asynchronous resource. A pending
    /// node neither renders nor refreshes its children.
    fn is_pending(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// What an owner holds: a live node it can refresh and dispose.
pub trait Component: 'static {
    /// Data the node is bound to.
    type Data: Shared;

    /// Stable identity.
    fn id(&self) -> ViewId;

    /// The node's top-level widget, for attachment by the owner.
    fn widget(&self) -> WidgetId;

    /// Deliver new data; renders only if needed, then refreshes children.
    fn try_refresh(&mut self, backend: &mut dyn Backend, data: Self::Data);

    /// Destroy the node's widgets and those of its children.
    fn dispose(&mut self, backend: &mut dyn Backend);

    /// Read-only view of the node for tooling.
    fn inspect(&self) -> &dyn Inspect;
}

impl<D: Shared> Component for Box<dyn Component<Data = D>> {
    type Data = D;

    fn id(&self) -> ViewId {
        (**self).id()
    }

    fn widget(&self) -> WidgetId {
        (**self).widget()
    }

    fn try_refresh(&mut self, backend: &mut dyn Backend, data: D) {
        (**self).try_refresh(backend, data);
    }

    fn dispose(&mut self, backend: &mut dyn Backend) {
        (**self).dispose(backend);
    }

    fn inspect(&self) -> &dyn Inspect {
        (**self).inspect()
    }
}

// ---------------------------------------------------------------------------
// Inspect
// ---------------------------------------------------------------------------

/// Type-erased read surface of a live node, walked by the debug mirror.
pub trait Inspect {
    /// Stable identity.
    fn view_id(&self) -> ViewId;

    /// Display name.
    fn name(&self) -> &str;

    /// Identity token of the current data; `None` before the first refresh.
    fn data_identity(&self) -> Option<usize>;

    /// Short human-readable form of the current data.
    fn describe_data(&self) -> String;

    /// Whether the node's submissions reach anyone.
    fn submit_connected(&self) -> bool;

    /// Live children, in order.
    fn child_views(&self) -> Vec<&dyn Inspect>;
}

/// Longest data description shown by tooling.
pub(crate) const DESCRIBE_LIMIT: usize = 60;

/// `Debug` form of `data`, cut to [`DESCRIBE_LIMIT`] characters.
pub(crate) fn describe<D: fmt::Debug>(data: Option<&D>) -> String {
    let Some(data) = data else {
        return "<uninitialized>".to_owned();
    };
    let full = format!("{data:?}");
    if full.chars().count() <= DESCRIBE_LIMIT {
        return full;
    }
    let mut cut: String = full.chars().take(DESCRIBE_LIMIT).collect();
    cut.push_str("...");
    cut
}

//! The `Backend` trait: the narrow contract views render through.

use super::event::{EventHandler, Task};
use super::widget::{WidgetData, WidgetId};

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Rendering backend used by views.
///
/// The trait is object safe: views receive `&mut dyn Backend`. Operations on
/// unknown widget ids are no-ops.
pub trait Backend {
    /// Create a detached widget.
    fn create(&mut self, data: WidgetData) -> WidgetId;

    /// Destroy a widget and everything attached below it.
    fn destroy(&mut self, id: WidgetId);

    /// Attach `child` under `parent` at `index` (clamped to the child count).
    /// A child that is attached elsewhere is moved.
    fn insert_child(&mut self, parent: WidgetId, index: usize, child: WidgetId);

    /// Detach and return the child at `index`. The child stays alive.
    fn take_child(&mut self, parent: WidgetId, index: usize) -> Option<WidgetId>;

    /// Children of `parent`, in order.
    fn children_of(&self, parent: WidgetId) -> Vec<WidgetId>;

    /// Read a widget's state.
    fn widget(&self, id: WidgetId) -> Option<&WidgetData>;

    /// Mutate a widget's state.
    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut WidgetData>;

    /// Register an event handler on a widget.
    fn on_event(&mut self, id: WidgetId, handler: EventHandler);

    /// Run `task` after `delay_ticks` ticks of the backend loop. Each task
    /// runs at most once.
    fn schedule(&mut self, delay_ticks: u32, task: Task);

    /// Attach `child` as the last child of `parent`.
    fn append_child(&mut self, parent: WidgetId, child: WidgetId) {
        let index = self.children_of(parent).len();
        self.insert_child(parent, index, child);
    }

    /// Update a widget's text if it differs.
    fn set_text(&mut self, id: WidgetId, text: &str) {
        if let Some(widget) = self.widget_mut(id) {
            if widget.text != text {
                widget.text = text.to_owned();
            }
        }
    }

    /// Show or hide a widget.
    fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(widget) = self.widget_mut(id) {
            widget.visible = visible;
        }
    }

    /// Set a widget's selection / checked state.
    fn set_selected(&mut self, id: WidgetId, selected: bool) {
        if let Some(widget) = self.widget_mut(id) {
            widget.selected = selected;
        }
    }

    /// Set a property if it differs.
    fn set_prop(&mut self, id: WidgetId, key: &str, value: String) {
        if let Some(widget) = self.widget_mut(id) {
            if widget.prop(key) != Some(value.as_str()) {
                widget.props.insert(key.to_owned(), value);
            }
        }
    }
}

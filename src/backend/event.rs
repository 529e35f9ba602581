//! Widget events and the callback types the backend stores.

use super::traits::Backend;
use super::widget::WidgetData;

/// Something the user did to a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A button was activated.
    Clicked,
    /// A checkbox changed state.
    Toggled(bool),
    /// A live, not yet committed value (e.g. the colour under the cursor of
    /// an open picker).
    Changed(String),
    /// A final text value (line edit confirmed, colour picked).
    Committed(String),
    /// An open editor was dismissed without committing.
    Cancelled,
    /// A numeric input changed.
    ValueChanged(i64),
    /// The current row of a list changed.
    RowSelected(Option<usize>),
    /// A pointer went down on the widget.
    Pressed,
    /// The widget was dragged to a new position.
    Moved { x: i64, y: i64 },
    /// The pointer was released after a press or drag.
    Released,
}

/// Handler registered on a widget. Receives the event and the widget's own
/// state, so it can e.g. clear a line edit after reading it.
pub type EventHandler = Box<dyn FnMut(&WidgetEvent, &mut WidgetData)>;

/// Deferred work fired by the backend's own loop at a later tick.
pub type Task = Box<dyn FnOnce(&mut dyn Backend)>;

//! Todo list sample.
//!
//! An input line appends items, a label counts done items, and a keyed list
//! shows each item with a done checkbox and a colour button. A colour history
//! panel is fed from the undo history rather than the current snapshot.

pub mod data;
pub mod view;

use std::sync::Arc;

use crate::app::{App, AppConfig};
use crate::view::{ListView, Submitter, ViewNode};

pub use data::{TodoData, TodoItem, TodoList, DEFAULT_COLOR};
pub use view::{
    color_history, ColorHistoryAdapter, ColorView, TodoCounterView, TodoInputView, TodoItemView,
    TodoListAdapter, TodoRootView,
};

/// Configuration the sample runs with by default: titled window and the
/// debug view tree.
pub fn default_config() -> AppConfig {
    AppConfig::new().with_title("Todo").with_debug_tree(true)
}

/// Build the todo app on an empty list.
pub fn build_app(config: AppConfig) -> App<Arc<TodoData>> {
    let mut app = App::new(config, Arc::new(TodoData::default()), |backend, submit| {
        ViewNode::new(TodoRootView, backend, submit)
    });
    app.add_history_panel(
        |backend| ListView::new(ColorHistoryAdapter, backend, Submitter::none()),
        color_history,
    );
    app
}

//! Snapshot types of the todo sample.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::RecordId;

/// Colour of a freshly added item.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// The item list as stored in a snapshot.
pub type TodoList = Arc<Vec<Arc<TodoItem>>>;

/// One entry of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: RecordId,
    pub done: bool,
    pub content: String,
    pub color: String,
}

impl TodoItem {
    /// A new, not yet done item with the default colour.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(),
            done: false,
            content: content.into(),
            color: DEFAULT_COLOR.to_owned(),
        }
    }

    /// A copy with `done` replaced.
    pub fn with_done(&self, done: bool) -> Self {
        Self {
            done,
            ..self.clone()
        }
    }

    /// A copy with `color` replaced.
    pub fn with_color(&self, color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            ..self.clone()
        }
    }
}

/// Whole application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoData {
    pub todo_list: TodoList,
}

impl TodoData {
    /// A snapshot holding `todo_list`.
    pub fn with_list(todo_list: TodoList) -> Arc<Self> {
        Arc::new(Self { todo_list })
    }

    /// Number of items marked done.
    pub fn done_count(&self) -> usize {
        self.todo_list.iter().filter(|item| item.done).count()
    }
}

/// A copy of `list` with `item` appended. Untouched items keep their
/// identity.
pub fn append_item(list: &TodoList, item: TodoItem) -> TodoList {
    let mut items = Vec::with_capacity(list.len() + 1);
    items.extend(list.iter().cloned());
    items.push(Arc::new(item));
    Arc::new(items)
}

/// A copy of `list` with the item at `index` replaced, or `None` when the
/// index is out of range.
pub fn replace_item(list: &TodoList, index: usize, item: Arc<TodoItem>) -> Option<TodoList> {
    if index >= list.len() {
        return None;
    }
    let mut items = (**list).clone();
    items[index] = item;
    Some(Arc::new(items))
}

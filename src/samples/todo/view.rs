//! Views of the todo sample.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::backend::{Backend, WidgetData, WidgetEvent, WidgetId};
use crate::history::SnapshotHistory;
use crate::view::{Component, Context, ListAdapter, ListView, Submitter, View, ViewNode};

use super::data::{self, TodoData, TodoItem, TodoList};

fn set_list(_: &Arc<TodoData>, list: TodoList) -> Option<Arc<TodoData>> {
    Some(TodoData::with_list(list))
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Main window: input line, done counter and the item list.
#[derive(Debug, Default)]
pub struct TodoRootView;

impl View for TodoRootView {
    type Data = Arc<TodoData>;

    fn name(&self) -> &'static str {
        "TodoRootView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<TodoData>>) -> WidgetId {
        let input_submit = cx.lens(set_list);
        let list_submit = cx.lens(set_list);
        let backend = cx.backend();
        let window = backend.create(WidgetData::new("Window").with_name("todo-window"));
        let input = ViewNode::new(TodoInputView, &mut *backend, input_submit);
        let counter = ViewNode::new(TodoCounterView::default(), &mut *backend, Submitter::none());
        let list = ListView::new(TodoListAdapter, &mut *backend, list_submit);
        for child in [input.widget(), counter.widget(), list.widget()] {
            backend.append_child(window, child);
        }

        cx.bind(input, |data: &Arc<TodoData>| Arc::clone(&data.todo_list));
        cx.bind(counter, |data: &Arc<TodoData>| Arc::clone(&data.todo_list));
        cx.bind(list, |data: &Arc<TodoData>| Arc::clone(&data.todo_list));
        window
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Line edit appending a new item on enter.
#[derive(Debug, Default)]
pub struct TodoInputView;

impl View for TodoInputView {
    type Data = TodoList;

    fn name(&self) -> &'static str {
        "TodoInputView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, TodoList>) -> WidgetId {
        let handle = cx.handle();
        let submit = cx.submitter();
        let backend = cx.backend();
        let input = backend.create(WidgetData::new("LineEdit").with_name("todo-input"));
        backend.on_event(
            input,
            Box::new(move |event, widget| {
                let WidgetEvent::Committed(content) = event else {
                    return;
                };
                let Some(list) = handle.current() else {
                    return;
                };
                if content.is_empty() {
                    return;
                }
                debug!(%content, "todo added");
                submit.commit(data::append_item(&list, TodoItem::new(content.clone())));
                widget.text.clear();
            }),
        );
        input
    }
}

// ---------------------------------------------------------------------------
// Counter
// ---------------------------------------------------------------------------

/// Label showing `done/total`.
#[derive(Debug, Default)]
pub struct TodoCounterView {
    label: Option<WidgetId>,
}

impl View for TodoCounterView {
    type Data = TodoList;

    fn name(&self) -> &'static str {
        "TodoCounterView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, TodoList>) -> WidgetId {
        let label = cx
            .backend()
            .create(WidgetData::new("Label").with_name("done-counter"));
        self.label = Some(label);
        label
    }

    fn render(&mut self, cx: &mut Context<'_, TodoList>, list: &TodoList) {
        let Some(label) = self.label else {
            return;
        };
        let done = list.iter().filter(|item| item.done).count();
        cx.backend().set_text(label, &format!("{done}/{}", list.len()));
    }
}

// ---------------------------------------------------------------------------
// Item
// ---------------------------------------------------------------------------

/// Open colour picker: the colour to restore and whether a preview was sent.
#[derive(Debug)]
struct Picking {
    origin: String,
    previewed: bool,
}

#[derive(Debug, Clone, Copy)]
struct ItemWidgets {
    done: WidgetId,
    content: WidgetId,
    color: WidgetId,
}

/// One row: done checkbox, read-only content and a colour button.
///
/// The colour button behaves like a picker dialog: `Clicked` opens it and
/// remembers the original colour, `Changed` previews a colour without a
/// history entry, `Committed` picks it, `Cancelled` restores the original.
#[derive(Debug, Default)]
pub struct TodoItemView {
    widgets: Option<ItemWidgets>,
}

impl View for TodoItemView {
    type Data = Arc<TodoItem>;

    fn name(&self) -> &'static str {
        "TodoItemView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<TodoItem>>) -> WidgetId {
        let handle = cx.handle();
        let submit = cx.submitter();
        let backend = cx.backend();
        let row = backend.create(WidgetData::new("Row").with_name("todo-item"));
        let done = backend.create(WidgetData::new("Checkbox").with_name("todo-done"));
        let content = backend.create(
            WidgetData::new("LineEdit")
                .with_name("todo-content")
                .enabled(false),
        );
        let color = backend.create(WidgetData::new("Button").with_name("todo-color"));
        for child in [done, content, color] {
            backend.append_child(row, child);
        }

        {
            let handle = handle.clone();
            let submit = submit.clone();
            backend.on_event(
                done,
                Box::new(move |event, _| {
                    let WidgetEvent::Toggled(checked) = event else {
                        return;
                    };
                    if let Some(item) = handle.current() {
                        if item.done != *checked {
                            submit.commit(Arc::new(item.with_done(*checked)));
                        }
                    }
                }),
            );
        }

        // `handle.current()` still shows the pre-preview item until the next tick.
        let picking: Rc<RefCell<Option<Picking>>> = Rc::new(RefCell::new(None));
        backend.on_event(
            color,
            Box::new(move |event, _| {
                let Some(item) = handle.current() else {
                    return;
                };
                match event {
                    WidgetEvent::Clicked => {
                        *picking.borrow_mut() = Some(Picking {
                            origin: item.color.clone(),
                            previewed: false,
                        });
                    }
                    WidgetEvent::Changed(picked) => {
                        if let Some(state) = picking.borrow_mut().as_mut() {
                            state.previewed = true;
                        }
                        submit.preview(Arc::new(item.with_color(picked.as_str())));
                    }
                    WidgetEvent::Committed(picked) => {
                        picking.borrow_mut().take();
                        submit.commit(Arc::new(item.with_color(picked.as_str())));
                    }
                    WidgetEvent::Cancelled => {
                        let state = picking.borrow_mut().take();
                        if let Some(state) = state {
                            if state.previewed || state.origin != item.color {
                                submit.commit(Arc::new(item.with_color(state.origin)));
                            }
                        }
                    }
                    _ => {}
                }
            }),
        );

        self.widgets = Some(ItemWidgets {
            done,
            content,
            color,
        });
        row
    }

    fn render(&mut self, cx: &mut Context<'_, Arc<TodoItem>>, item: &Arc<TodoItem>) {
        let Some(widgets) = self.widgets else {
            return;
        };
        let backend = cx.backend();
        backend.set_selected(widgets.done, item.done);
        backend.set_text(widgets.content, &item.content);
        backend.set_prop(widgets.color, "color", item.color.clone());
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Keyed list of [`TodoItemView`] rows, keyed by item id.
#[derive(Debug, Default)]
pub struct TodoListAdapter;

impl ListAdapter for TodoListAdapter {
    type Collection = TodoList;
    type Key = crate::data::RecordId;
    type Element = ViewNode<TodoItemView>;

    fn name(&self) -> &'static str {
        "TodoListView"
    }

    fn create_widget(&mut self, backend: &mut dyn Backend) -> WidgetId {
        backend.create(WidgetData::new("List").with_name("todo-list"))
    }

    fn keys(&self, list: &TodoList) -> Vec<Self::Key> {
        list.iter().map(|item| item.id).collect()
    }

    fn item_at(&self, list: &TodoList, index: usize) -> Option<Arc<TodoItem>> {
        list.get(index).cloned()
    }

    fn create_element(
        &mut self,
        backend: &mut dyn Backend,
        submit: Submitter<Arc<TodoItem>>,
    ) -> ViewNode<TodoItemView> {
        ViewNode::new(TodoItemView::default(), backend, submit)
    }

    fn replace_item(list: &TodoList, index: usize, item: Arc<TodoItem>) -> Option<TodoList> {
        data::replace_item(list, index, item)
    }
}

// ---------------------------------------------------------------------------
// Colour history
// ---------------------------------------------------------------------------

/// Colours shown by the history panel, newest first.
pub type ColorHistory = Arc<Vec<Arc<String>>>;

/// Colour of the first item in every history entry that has one, newest
/// entry first.
pub fn color_history(history: &SnapshotHistory<Arc<TodoData>>) -> ColorHistory {
    Arc::new(
        history
            .entries()
            .iter()
            .rev()
            .filter_map(|snapshot| snapshot.todo_list.first())
            .map(|item| Arc::new(item.color.clone()))
            .collect(),
    )
}

/// A single colour swatch.
#[derive(Debug, Default)]
pub struct ColorView {
    swatch: Option<WidgetId>,
}

impl View for ColorView {
    type Data = Arc<String>;

    fn name(&self) -> &'static str {
        "ColorView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<String>>) -> WidgetId {
        let swatch = cx
            .backend()
            .create(WidgetData::new("Swatch").with_name("color-swatch"));
        self.swatch = Some(swatch);
        swatch
    }

    // The panel rebuilds its colour strings on every history change.
    fn should_refresh(&self, new: &Arc<String>, current: Option<&Arc<String>>) -> bool {
        current != Some(new)
    }

    fn render(&mut self, cx: &mut Context<'_, Arc<String>>, color: &Arc<String>) {
        if let Some(swatch) = self.swatch {
            cx.backend().set_prop(swatch, "color", color.to_string());
        }
    }
}

/// Read-only list of colours. A row is keyed by its colour and by how many
/// earlier rows carry the same colour, so repeated colours stay distinct.
#[derive(Debug, Default)]
pub struct ColorHistoryAdapter;

impl ListAdapter for ColorHistoryAdapter {
    type Collection = ColorHistory;
    type Key = (Arc<String>, usize);
    type Element = ViewNode<ColorView>;

    fn name(&self) -> &'static str {
        "ColorHistoryView"
    }

    fn create_widget(&mut self, backend: &mut dyn Backend) -> WidgetId {
        backend.create(
            WidgetData::new("Dialog")
                .with_name("color-history")
                .with_text("Color History"),
        )
    }

    fn keys(&self, colors: &ColorHistory) -> Vec<(Arc<String>, usize)> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        colors
            .iter()
            .map(|color| {
                let count = seen.entry(color.as_str()).or_default();
                let key = (Arc::clone(color), *count);
                *count += 1;
                key
            })
            .collect()
    }

    fn item_at(&self, colors: &ColorHistory, index: usize) -> Option<Arc<String>> {
        colors.get(index).cloned()
    }

    fn create_element(
        &mut self,
        backend: &mut dyn Backend,
        submit: Submitter<Arc<String>>,
    ) -> ViewNode<ColorView> {
        ViewNode::new(ColorView::default(), backend, submit)
    }

    fn replace_item(_: &ColorHistory, _: usize, _: Arc<String>) -> Option<ColorHistory> {
        None
    }

    fn set_current_row(&mut self, _: &mut dyn Backend, _: WidgetId, _: Option<usize>) {}
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WidgetTree;
    use crate::data::Shared;
    use pretty_assertions::assert_eq;

    fn item_node(tree: &mut WidgetTree, submitted: Rc<RefCell<Vec<(String, bool)>>>) -> ViewNode<TodoItemView> {
        let submit = Submitter::new(move |item: Arc<TodoItem>, record| {
            submitted.borrow_mut().push((item.color.clone(), record));
        });
        let mut node = ViewNode::new(TodoItemView::default(), tree, submit);
        tree.mount(node.widget());
        node.try_refresh(tree, Arc::new(TodoItem::new("milk")));
        node
    }

    // ── Item ─────────────────────────────────────────────────────────

    #[test]
    fn item_renders_fields() {
        let mut tree = WidgetTree::new();
        let _node = item_node(&mut tree, Rc::default());
        let content = tree.find("todo-content").unwrap();
        assert_eq!(tree.get(content).unwrap().text, "milk");
        assert!(!tree.get(content).unwrap().enabled);
        let color = tree.find("todo-color").unwrap();
        assert_eq!(tree.get(color).unwrap().prop("color"), Some("#FFFFFF"));
    }

    #[test]
    fn color_preview_then_pick() {
        let mut tree = WidgetTree::new();
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let _node = item_node(&mut tree, Rc::clone(&submitted));
        let color = tree.find("todo-color").unwrap();
        tree.emit(color, WidgetEvent::Clicked);
        tree.emit(color, WidgetEvent::Changed("#FF0000".into()));
        tree.emit(color, WidgetEvent::Committed("#00FF00".into()));
        assert_eq!(
            *submitted.borrow(),
            vec![("#FF0000".to_owned(), false), ("#00FF00".to_owned(), true)]
        );
    }

    #[test]
    fn cancel_without_change_submits_nothing() {
        let mut tree = WidgetTree::new();
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let _node = item_node(&mut tree, Rc::clone(&submitted));
        let color = tree.find("todo-color").unwrap();
        tree.emit(color, WidgetEvent::Clicked);
        tree.emit(color, WidgetEvent::Cancelled);
        assert!(submitted.borrow().is_empty());
    }

    #[test]
    fn cancel_right_after_preview_restores_origin() {
        let mut tree = WidgetTree::new();
        let seed = Arc::new(TodoItem::new("milk"));
        let history = Rc::new(RefCell::new(SnapshotHistory::new(Arc::clone(&seed))));
        let submit = {
            let history = Rc::clone(&history);
            Submitter::new(move |item: Arc<TodoItem>, record| {
                history.borrow_mut().push(item, record);
            })
        };
        let mut node = ViewNode::new(TodoItemView::default(), &mut tree, submit);
        tree.mount(node.widget());
        node.try_refresh(&mut tree, seed);

        // No refresh between the events: the view still holds the origin.
        let color = tree.find("todo-color").unwrap();
        tree.emit(color, WidgetEvent::Clicked);
        tree.emit(color, WidgetEvent::Changed("#FF0000".into()));
        tree.emit(color, WidgetEvent::Cancelled);

        let history = history.borrow();
        assert_eq!(history.current().color, "#FFFFFF");
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn unchanged_toggle_is_ignored() {
        let mut tree = WidgetTree::new();
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let _node = item_node(&mut tree, Rc::clone(&submitted));
        let done = tree.find("todo-done").unwrap();
        tree.emit(done, WidgetEvent::Toggled(false));
        assert!(submitted.borrow().is_empty());
        tree.emit(done, WidgetEvent::Toggled(true));
        assert_eq!(submitted.borrow().len(), 1);
    }

    // ── Counter ──────────────────────────────────────────────────────

    #[test]
    fn counter_text() {
        let mut tree = WidgetTree::new();
        let mut node = ViewNode::new(TodoCounterView::default(), &mut tree, Submitter::none());
        tree.mount(node.widget());
        let list: TodoList = Arc::new(vec![
            Arc::new(TodoItem::new("a").with_done(true)),
            Arc::new(TodoItem::new("b")),
        ]);
        node.try_refresh(&mut tree, list);
        let label = tree.find("done-counter").unwrap();
        assert_eq!(tree.get(label).unwrap().text, "1/2");
    }

    // ── Colour history ───────────────────────────────────────────────

    #[test]
    fn color_history_is_newest_first_and_skips_empty_lists() {
        let first = TodoItem::new("a");
        let red = first.with_color("#FF0000");
        let mut history = SnapshotHistory::new(Arc::new(TodoData::default()));
        history.commit(TodoData::with_list(Arc::new(vec![Arc::new(first)])));
        history.commit(TodoData::with_list(Arc::new(vec![Arc::new(red)])));
        let colors: Vec<String> = color_history(&history).iter().map(|c| c.to_string()).collect();
        assert_eq!(colors, vec!["#FF0000", "#FFFFFF"]);
    }

    #[test]
    fn color_view_refreshes_by_value() {
        let view = ColorView::default();
        let white = Arc::new("#FFFFFF".to_owned());
        let copy = Arc::new("#FFFFFF".to_owned());
        assert!(!copy.same(&white));
        assert!(!view.should_refresh(&copy, Some(&white)));
        assert!(view.should_refresh(&white, None));
    }

    #[test]
    fn duplicate_colors_are_separate_rows() {
        let mut tree = WidgetTree::new();
        let mut list = ListView::new(ColorHistoryAdapter, &mut tree, Submitter::none());
        tree.mount(list.widget());
        let white = Arc::new("#FFFFFF".to_owned());
        let colors: ColorHistory = Arc::new(vec![Arc::clone(&white), Arc::new("#FF0000".into()), Arc::clone(&white)]);
        list.try_refresh(&mut tree, colors);
        assert_eq!(list.len(), 3);
        assert_eq!(tree.find_all("color-swatch").len(), 3);
        assert_eq!(list.index_of(&(Arc::clone(&white), 0)), Some(0));
        assert_eq!(list.index_of(&(white, 1)), Some(2));
    }
}

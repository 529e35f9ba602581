//! Level designer views: root window, toolbar, object list and attribute
//! editor.

use std::sync::Arc;

use crate::backend::{Backend, WidgetData, WidgetEvent, WidgetId};
use crate::view::{
    Component, Context, ListAdapter, ListView, NodeHandle, Submitter, View, ViewNode,
};

use super::data::{self, GameObject, LevelData, ObjectKind, Objects, Vector2, SCENE_HALF};
use super::scene::SceneView;

fn set_objects(_: &Arc<LevelData>, objects: Objects) -> Option<Arc<LevelData>> {
    Some(LevelData::with_objects(objects))
}

fn set_object(level: &Arc<LevelData>, object: Option<Arc<GameObject>>) -> Option<Arc<LevelData>> {
    let object = object?;
    Some(LevelData::with_objects(data::update_object(&level.objects, object)))
}

// ---------------------------------------------------------------------------
// Root
// ---------------------------------------------------------------------------

/// Main window: toolbar, object list, scene and attribute editor.
#[derive(Debug, Default)]
pub struct LevelRootView;

impl View for LevelRootView {
    type Data = Arc<LevelData>;

    fn name(&self) -> &'static str {
        "LevelRootView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<LevelData>>) -> WidgetId {
        let toolbar_submit = cx.lens(set_objects);
        let list_submit = cx.lens(set_objects);
        let scene_submit = cx.lens(set_objects);
        let attr_submit = cx.lens(set_object);
        let backend = cx.backend();
        let window = backend.create(WidgetData::new("Window").with_name("level-window"));
        let toolbar = ViewNode::new(ToolbarView::default(), &mut *backend, toolbar_submit);
        let list = ListView::new(ObjectListAdapter, &mut *backend, list_submit);
        let scene = ViewNode::new(SceneView::new(), &mut *backend, scene_submit);
        let attr = ViewNode::new(AttrEditView::default(), &mut *backend, attr_submit);
        for child in [toolbar.widget(), list.widget(), scene.widget(), attr.widget()] {
            backend.append_child(window, child);
        }

        cx.bind(toolbar, |level: &Arc<LevelData>| Arc::clone(&level.objects));
        cx.bind(list, |level: &Arc<LevelData>| Arc::clone(&level.objects));
        cx.bind(scene, |level: &Arc<LevelData>| Arc::clone(&level.objects));
        cx.bind(attr, |level: &Arc<LevelData>| level.selected());
        window
    }
}

// ---------------------------------------------------------------------------
// Toolbar
// ---------------------------------------------------------------------------

/// Buttons adding one object per kind and removing the selected one.
#[derive(Debug, Default)]
pub struct ToolbarView {
    remove: Option<WidgetId>,
}

impl View for ToolbarView {
    type Data = Objects;

    fn name(&self) -> &'static str {
        "ToolbarView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Objects>) -> WidgetId {
        let handle = cx.handle();
        let submit = cx.submitter();
        let backend = cx.backend();
        let toolbar = backend.create(WidgetData::new("Toolbar").with_name("toolbar"));
        for kind in ObjectKind::ALL {
            let name = format!("add-{}", kind.as_str().to_lowercase());
            let button = backend.create(
                WidgetData::new("Button")
                    .with_name(name)
                    .with_text(format!("Add {kind}")),
            );
            backend.on_event(button, add_handler(handle.clone(), submit.clone(), kind));
            backend.append_child(toolbar, button);
        }

        let remove = backend.create(
            WidgetData::new("Button")
                .with_name("remove-selected")
                .with_text("Remove"),
        );
        backend.on_event(
            remove,
            Box::new(move |event, _| {
                if *event != WidgetEvent::Clicked {
                    return;
                }
                if let Some(next) = handle.current().and_then(|objects| data::remove_selected(&objects)) {
                    submit.commit(next);
                }
            }),
        );
        backend.append_child(toolbar, remove);
        self.remove = Some(remove);
        toolbar
    }

    fn render(&mut self, cx: &mut Context<'_, Objects>, objects: &Objects) {
        let Some(remove) = self.remove else {
            return;
        };
        if let Some(widget) = cx.backend().widget_mut(remove) {
            widget.enabled = data::selected(objects).is_some();
        }
    }
}

fn add_handler(
    handle: NodeHandle<Objects>,
    submit: Submitter<Objects>,
    kind: ObjectKind,
) -> crate::backend::EventHandler {
    Box::new(move |event, _| {
        if *event != WidgetEvent::Clicked {
            return;
        }
        if let Some(objects) = handle.current() {
            submit.commit(data::add_object(&objects, kind));
        }
    })
}

// ---------------------------------------------------------------------------
// Object list
// ---------------------------------------------------------------------------

/// A row of the object list: `Kind id`.
#[derive(Debug, Default)]
pub struct ObjectListItemView {
    item: Option<WidgetId>,
}

impl View for ObjectListItemView {
    type Data = Arc<GameObject>;

    fn name(&self) -> &'static str {
        "ObjectListItemView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<GameObject>>) -> WidgetId {
        let item = cx
            .backend()
            .create(WidgetData::new("ListItem").with_name("object-item"));
        self.item = Some(item);
        item
    }

    fn render(&mut self, cx: &mut Context<'_, Arc<GameObject>>, object: &Arc<GameObject>) {
        if let Some(item) = self.item {
            cx.backend().set_text(item, &object.label());
        }
    }
}

/// Objects in id order. The current row follows `is_selected` in the data,
/// and picking a row selects that object.
#[derive(Debug, Default)]
pub struct ObjectListAdapter;

impl ListAdapter for ObjectListAdapter {
    type Collection = Objects;
    type Key = u32;
    type Element = ViewNode<ObjectListItemView>;

    fn name(&self) -> &'static str {
        "ObjectListView"
    }

    fn create_widget(&mut self, backend: &mut dyn Backend) -> WidgetId {
        backend.create(WidgetData::new("List").with_name("object-list"))
    }

    fn keys(&self, objects: &Objects) -> Vec<u32> {
        objects.keys().copied().collect()
    }

    fn item_at(&self, objects: &Objects, index: usize) -> Option<Arc<GameObject>> {
        objects.values().nth(index).cloned()
    }

    fn create_element(
        &mut self,
        backend: &mut dyn Backend,
        submit: Submitter<Arc<GameObject>>,
    ) -> ViewNode<ObjectListItemView> {
        ViewNode::new(ObjectListItemView::default(), backend, submit)
    }

    fn replace_item(objects: &Objects, index: usize, item: Arc<GameObject>) -> Option<Objects> {
        let id = *objects.keys().nth(index)?;
        (item.id == id).then(|| data::update_object(objects, item))
    }

    fn selection_changed(objects: &Objects, keys: &[u32], row: Option<usize>) -> Option<Objects> {
        let id = row.and_then(|row| keys.get(row).copied());
        data::select_only(objects, id)
    }

    fn selected_key(&self, objects: &Objects, _current: Option<&u32>) -> Option<u32> {
        data::selected(objects).map(|object| object.id)
    }
}

// ---------------------------------------------------------------------------
// Attribute editor
// ---------------------------------------------------------------------------

/// Panel editing the selected object. Hidden while nothing is selected.
#[derive(Debug, Default)]
pub struct AttrEditView {
    group: Option<WidgetId>,
    title: Option<WidgetId>,
}

impl View for AttrEditView {
    type Data = Option<Arc<GameObject>>;

    fn name(&self) -> &'static str {
        "AttrEditView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Option<Arc<GameObject>>>) -> WidgetId {
        let pos_submit = cx.lens(|current: &Option<Arc<GameObject>>, pos: Arc<Vector2>| {
            current
                .as_ref()
                .map(|object| Some(Arc::new(object.with_pos(pos))))
        });
        let backend = cx.backend();
        let group = backend.create(
            WidgetData::new("GroupBox")
                .with_name("attr-edit")
                .with_text("Attribute"),
        );
        let title = backend.create(WidgetData::new("Label").with_name("attr-object"));
        let caption = backend.create(WidgetData::new("Label").with_text("Position:"));
        let pos = ViewNode::new(Vector2EditView::default(), &mut *backend, pos_submit);
        for child in [title, caption, pos.widget()] {
            backend.append_child(group, child);
        }
        cx.bind_partial(pos, |current: &Option<Arc<GameObject>>| {
            current.as_ref().map(|object| Arc::clone(&object.pos))
        });

        self.group = Some(group);
        self.title = Some(title);
        group
    }

    fn render(&mut self, cx: &mut Context<'_, Option<Arc<GameObject>>>, object: &Option<Arc<GameObject>>) {
        let (Some(group), Some(title)) = (self.group, self.title) else {
            return;
        };
        let backend = cx.backend();
        backend.set_visible(group, object.is_some());
        let label = object.as_ref().map(|object| object.label()).unwrap_or_default();
        backend.set_text(title, &label);
    }
}

#[derive(Debug, Clone, Copy)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, v: &Vector2) -> i64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    fn set(self, v: &Vector2, value: i64) -> Vector2 {
        match self {
            Axis::X => Vector2::new(value, v.y),
            Axis::Y => Vector2::new(v.x, value),
        }
    }
}

/// Two spin boxes editing a position, each limited to the scene.
#[derive(Debug, Default)]
pub struct Vector2EditView {
    inputs: Option<(WidgetId, WidgetId)>,
}

impl View for Vector2EditView {
    type Data = Arc<Vector2>;

    fn name(&self) -> &'static str {
        "Vector2EditView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<Vector2>>) -> WidgetId {
        let handle = cx.handle();
        let submit = cx.submitter();
        let backend = cx.backend();
        let row = backend.create(WidgetData::new("Row").with_name("pos-edit"));
        let mut spin = |name: &str, axis: Axis| {
            let input = backend.create(
                WidgetData::new("SpinBox")
                    .with_name(name)
                    .with_prop("min", (-SCENE_HALF).to_string())
                    .with_prop("max", SCENE_HALF.to_string()),
            );
            let handle = handle.clone();
            let submit = submit.clone();
            backend.on_event(
                input,
                Box::new(move |event, _| {
                    let WidgetEvent::ValueChanged(value) = *event else {
                        return;
                    };
                    let value = value.clamp(-SCENE_HALF, SCENE_HALF);
                    if let Some(current) = handle.current() {
                        if axis.get(&current) != value {
                            submit.commit(Arc::new(axis.set(&current, value)));
                        }
                    }
                }),
            );
            backend.append_child(row, input);
            input
        };
        let x = spin("pos-x", Axis::X);
        let y = spin("pos-y", Axis::Y);
        self.inputs = Some((x, y));
        row
    }

    fn render(&mut self, cx: &mut Context<'_, Arc<Vector2>>, pos: &Arc<Vector2>) {
        let Some((x, y)) = self.inputs else {
            return;
        };
        let backend = cx.backend();
        backend.set_text(x, &pos.x.to_string());
        backend.set_text(y, &pos.y.to_string());
    }
}

// ===========================================================================
// Tests
// ===========================================================================

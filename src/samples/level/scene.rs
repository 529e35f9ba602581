//! The scene: one sprite per object, loaded asynchronously.
//!
//! A new object first shows a loading icon. A backend task fired after the
//! kind's simulated loading time swaps it for a sprite. While any load is
//! outstanding the scene neither renders nor refreshes its objects, and
//! drops submissions from them; the last completed load forces a refresh.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::backend::{Backend, EventHandler, WidgetData, WidgetEvent, WidgetId};
use crate::view::{Component, Context, NodeHandle, PendingLoads, Submitter, View, ViewId, ViewNode};

use super::data::{self, GameObject, Objects, Vector2};

/// Texture shown while a sprite is loading.
pub const LOADING_TEXTURE: &str = "timer_CW_75.png";

// ---------------------------------------------------------------------------
// SceneView
// ---------------------------------------------------------------------------

/// Scene holding one [`SceneObjectView`] per object.
#[derive(Debug, Default)]
pub struct SceneView {
    scene: Option<WidgetId>,
    id_to_view: HashMap<u32, ViewId>,
    loads: PendingLoads<u32>,
}

impl SceneView {
    /// An empty scene with no pending loads.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sprites still loading.
    pub fn pending_loads(&self) -> usize {
        self.loads.len()
    }
}

impl View for SceneView {
    type Data = Objects;

    fn name(&self) -> &'static str {
        "SceneView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Objects>) -> WidgetId {
        let scene = cx.backend().create(WidgetData::new("Scene").with_name("scene"));
        self.scene = Some(scene);
        scene
    }

    fn render(&mut self, cx: &mut Context<'_, Objects>, objects: &Objects) {
        let previous = cx.previous().cloned().unwrap_or_default();
        for id in previous.keys().filter(|id| !objects.contains_key(*id)) {
            if let Some(view) = self.id_to_view.remove(id) {
                cx.unbind(view);
            }
        }

        let added: Vec<Arc<GameObject>> = objects
            .values()
            .filter(|object| !previous.contains_key(&object.id))
            .cloned()
            .collect();
        if added.is_empty() {
            return;
        }
        debug!(count = added.len(), "loading scene objects");
        for object in &added {
            self.loads.begin(object.id);
        }

        for object in added {
            let id = object.id;
            let loads = self.loads.clone();
            let submit = cx.lens(move |objects: &Objects, object: Arc<GameObject>| {
                if loads.is_pending() {
                    trace!(id = object.id, "submission while loading dropped");
                    return None;
                }
                Some(data::update_object(objects, object))
            });
            let view = SceneObjectView::new(object, self.loads.clone(), cx.handle());
            let backend = cx.backend();
            let node = ViewNode::new(view, &mut *backend, submit);
            if let Some(scene) = self.scene {
                backend.append_child(scene, node.widget());
            }
            let view_id = cx.bind_partial(node, move |objects: &Objects| objects.get(&id).cloned());
            self.id_to_view.insert(id, view_id);
        }
    }

    fn is_pending(&self) -> bool {
        self.loads.is_pending()
    }
}

// ---------------------------------------------------------------------------
// SceneObjectView
// ---------------------------------------------------------------------------

/// A single object in the scene.
#[derive(Debug)]
pub struct SceneObjectView {
    initial: Arc<GameObject>,
    loads: PendingLoads<u32>,
    scene: NodeHandle<Objects>,
    container: Option<WidgetId>,
}

impl SceneObjectView {
    /// An object view that reports its load to `loads` and wakes `scene`
    /// once the last load completed.
    pub fn new(initial: Arc<GameObject>, loads: PendingLoads<u32>, scene: NodeHandle<Objects>) -> Self {
        Self {
            initial,
            loads,
            scene,
            container: None,
        }
    }
}

impl View for SceneObjectView {
    type Data = Arc<GameObject>;

    fn name(&self) -> &'static str {
        "SceneObjectView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<GameObject>>) -> WidgetId {
        let handle = cx.handle();
        let submit = cx.submitter();
        let backend = cx.backend();
        let object = &self.initial;
        let container = backend.create(
            WidgetData::new("SceneObject")
                .with_name("scene-object")
                .with_text(object.label()),
        );
        let icon = backend.create(
            WidgetData::new("LoadingIcon")
                .with_name("loading-icon")
                .with_prop("texture", LOADING_TEXTURE),
        );
        backend.append_child(container, icon);
        place(backend, container, &object.pos);

        let id = object.id;
        let kind = object.kind;
        let loads = self.loads.clone();
        let scene = self.scene.clone();
        backend.schedule(
            kind.load_ticks(),
            Box::new(move |backend| {
                if backend.widget(container).is_some() {
                    if let Some(icon) = backend.take_child(container, 0) {
                        backend.destroy(icon);
                    }
                    let sprite = backend.create(
                        WidgetData::new("Sprite")
                            .with_name("sprite")
                            .with_prop("texture", kind.texture()),
                    );
                    backend.on_event(sprite, sprite_handler(handle, submit));
                    backend.append_child(container, sprite);
                    trace!(id, %kind, "sprite loaded");
                }
                if loads.complete(&id) {
                    scene.request_refresh();
                }
            }),
        );

        self.container = Some(container);
        container
    }

    fn render(&mut self, cx: &mut Context<'_, Arc<GameObject>>, object: &Arc<GameObject>) {
        let Some(container) = self.container else {
            return;
        };
        let backend = cx.backend();
        place(backend, container, &object.pos);
        backend.set_selected(container, object.is_selected);
    }
}

fn place(backend: &mut dyn Backend, widget: WidgetId, pos: &Vector2) {
    backend.set_prop(widget, "x", pos.x.to_string());
    backend.set_prop(widget, "y", pos.y.to_string());
}

/// Pointer handling of a loaded sprite: press selects, drags preview the
/// new position, release commits the last dragged position.
fn sprite_handler(handle: NodeHandle<Arc<GameObject>>, submit: Submitter<Arc<GameObject>>) -> EventHandler {
    let mut dragged: Option<Vector2> = None;
    Box::new(move |event, _| {
        let Some(object) = handle.current() else {
            return;
        };
        match *event {
            WidgetEvent::Pressed => {
                if !object.is_selected {
                    submit.commit(Arc::new(object.with_selected(true)));
                }
            }
            WidgetEvent::Moved { x, y } => {
                let pos = Vector2::new(x, y).clamped();
                dragged = Some(pos);
                submit.preview(Arc::new(object.with_pos(Arc::new(pos))));
            }
            WidgetEvent::Released => {
                if let Some(pos) = dragged.take() {
                    submit.commit(Arc::new(object.with_pos(Arc::new(pos))));
                }
            }
            _ => {}
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

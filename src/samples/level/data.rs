//! Snapshot types of the level designer.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Half the scene extent; positions are clamped to `-SCENE_HALF..=SCENE_HALF`.
pub const SCENE_HALF: i64 = 640;

/// A 2D position in scene units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: i64,
    pub y: i64,
}

impl Vector2 {
    /// A vector at `(x, y)`.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// This vector with both components clamped to the scene.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(-SCENE_HALF, SCENE_HALF),
            y: self.y.clamp(-SCENE_HALF, SCENE_HALF),
        }
    }
}

/// What a game object is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Tree,
    House,
    Mountain,
}

impl ObjectKind {
    /// Every kind, in toolbar order.
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Tree, ObjectKind::House, ObjectKind::Mountain];

    /// Display name.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Tree => "Tree",
            ObjectKind::House => "House",
            ObjectKind::Mountain => "Mountain",
        }
    }

    /// Sprite texture file.
    pub fn texture(self) -> &'static str {
        match self {
            ObjectKind::Tree => "treePine_large.png",
            ObjectKind::House => "house.png",
            ObjectKind::Mountain => "rockGrey_large.png",
        }
    }

    /// Simulated texture loading time, in backend ticks.
    pub fn load_ticks(self) -> u32 {
        match self {
            ObjectKind::Tree => 1,
            ObjectKind::House => 3,
            ObjectKind::Mountain => 300,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An object placed in the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    pub kind: ObjectKind,
    pub pos: Arc<Vector2>,
    pub is_selected: bool,
}

impl GameObject {
    /// An unselected object of `kind` at `pos`.
    ///
    /// ```
    /// use snapview::samples::level::{GameObject, ObjectKind, Vector2};
    ///
    /// let tree = GameObject::new(1, ObjectKind::Tree, Vector2::new(-200, 0));
    /// assert!(!tree.is_selected);
    /// assert_eq!(tree.label(), "Tree 1");
    /// ```
    pub fn new(id: u32, kind: ObjectKind, pos: Vector2) -> Self {
        Self {
            id,
            kind,
            pos: Arc::new(pos),
            is_selected: false,
        }
    }

    /// A copy at `pos`.
    pub fn with_pos(&self, pos: Arc<Vector2>) -> Self {
        Self {
            pos,
            ..self.clone()
        }
    }

    /// A copy with the selection flag replaced.
    pub fn with_selected(&self, is_selected: bool) -> Self {
        Self {
            is_selected,
            ..self.clone()
        }
    }

    /// Label used by the object list, e.g. `Tree 3`.
    pub fn label(&self) -> String {
        format!("{} {}", self.kind, self.id)
    }
}

/// Objects by id, in id order.
pub type Objects = Arc<BTreeMap<u32, Arc<GameObject>>>;

/// Whole application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    pub objects: Objects,
}

impl LevelData {
    /// A snapshot holding `objects`.
    pub fn with_objects(objects: Objects) -> Arc<Self> {
        Arc::new(Self { objects })
    }

    /// The first selected object, in id order.
    pub fn selected(&self) -> Option<Arc<GameObject>> {
        selected(&self.objects)
    }
}

/// The first selected object, in id order.
pub fn selected(objects: &Objects) -> Option<Arc<GameObject>> {
    objects.values().find(|object| object.is_selected).cloned()
}

/// Id for the next added object.
pub fn next_id(objects: &Objects) -> u32 {
    objects.keys().next_back().map_or(1, |id| id + 1)
}

/// Where a new object with `id` is placed: a row across the scene.
pub fn spawn_position(id: u32) -> Vector2 {
    let column = i64::from(id % 8);
    Vector2::new(column * 80 - 280, 0)
}

/// A copy of `objects` with a new object of `kind`.
pub fn add_object(objects: &Objects, kind: ObjectKind) -> Objects {
    let id = next_id(objects);
    let mut next = (**objects).clone();
    next.insert(id, Arc::new(GameObject::new(id, kind, spawn_position(id))));
    Arc::new(next)
}

/// A copy of `objects` without the first selected object, or `None` when
/// nothing is selected.
pub fn remove_selected(objects: &Objects) -> Option<Objects> {
    let id = selected(objects)?.id;
    let mut next = (**objects).clone();
    next.remove(&id);
    Some(Arc::new(next))
}

/// A copy of `objects` with `object` stored under its id. When `object`
/// becomes selected, every other object is deselected.
pub fn update_object(objects: &Objects, object: Arc<GameObject>) -> Objects {
    let newly_selected = object.is_selected
        && !objects
            .get(&object.id)
            .is_some_and(|previous| previous.is_selected);
    let mut next = (**objects).clone();
    if newly_selected {
        for (id, other) in next.iter_mut() {
            if *id != object.id && other.is_selected {
                *other = Arc::new(other.with_selected(false));
            }
        }
    }
    next.insert(object.id, object);
    Arc::new(next)
}

/// A copy of `objects` where exactly the object `id` is selected (or none,
/// for `None`). `None` when nothing changes.
pub fn select_only(objects: &Objects, id: Option<u32>) -> Option<Objects> {
    let mut next = (**objects).clone();
    let mut dirty = false;
    for (key, object) in next.iter_mut() {
        let wanted = Some(*key) == id;
        if object.is_selected != wanted {
            *object = Arc::new(object.with_selected(wanted));
            dirty = true;
        }
    }
    dirty.then(|| Arc::new(next))
}

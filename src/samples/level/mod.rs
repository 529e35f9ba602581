//! Level designer sample.
//!
//! A toolbar adds trees, houses and mountains. Each object appears in a
//! scene, where its sprite loads asynchronously, and in an object list whose
//! current row follows the selected object. The attribute panel edits the
//! selected object's position; dragging a sprite previews the move and
//! commits it on release.

pub mod data;
pub mod scene;
pub mod view;

use std::sync::Arc;

use crate::app::{App, AppConfig};
use crate::view::ViewNode;

pub use data::{GameObject, LevelData, ObjectKind, Objects, Vector2};
pub use scene::{SceneObjectView, SceneView};
pub use view::{
    AttrEditView, LevelRootView, ObjectListAdapter, ObjectListItemView, ToolbarView,
    Vector2EditView,
};

/// Configuration the sample runs with by default.
pub fn default_config() -> AppConfig {
    AppConfig::new().with_title("Level Designer")
}

/// Build the level designer on an empty level.
pub fn build_app(config: AppConfig) -> App<Arc<LevelData>> {
    App::new(config, Arc::new(LevelData::default()), |backend, submit| {
        ViewNode::new(LevelRootView, backend, submit)
    })
}

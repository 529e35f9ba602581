//! Debug mirror of the live view tree and the view that displays it.

pub mod mirror;
pub mod tree_view;

pub use mirror::{MirrorNode, ViewMirror};
pub use tree_view::DebugTreeView;

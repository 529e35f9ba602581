//! Rendering backend contract and the headless widget tree implementing it.
//!
//! Views never draw; they create opaque widget handles, attach them to each
//! other and update their visible state through [`Backend`]. [`WidgetTree`]
//! is a retained, slotmap-backed implementation used by the sample apps, the
//! CLI and tests.

pub mod event;
pub mod query;
pub mod traits;
pub mod tree;
pub mod widget;

pub use event::{EventHandler, Task, WidgetEvent};
pub use traits::Backend;
pub use tree::WidgetTree;
pub use widget::{WidgetData, WidgetId};

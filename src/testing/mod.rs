//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to programmatically drive an [`App`](crate::app::App)
//! through named widgets. Use [`tree_to_string`] and related helpers to
//! capture the widget tree as plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{describe_widget, subtree_to_string, tree_to_string};

//! Reconciliation tree: view nodes bound to slices of an immutable snapshot.
//!
//! A [`View`] describes one kind of node (how to create its widget, how to
//! render data into it). [`ViewNode`] wraps a view with the generic refresh
//! algorithm, and [`ListView`] specializes it for keyed collections. Parents
//! own their children as [`Component`]s and hand each one a [`Submitter`]
//! for upward data flow.

pub mod context;
pub mod handle;
pub mod list;
pub mod node;
pub mod pending;
pub mod submit;
pub mod traits;

pub use context::Context;
pub use handle::NodeHandle;
pub use list::{ListAdapter, ListView};
pub use node::ViewNode;
pub use pending::PendingLoads;
pub use submit::Submitter;
pub use traits::{Component, Inspect, View, ViewId};

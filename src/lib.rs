//! # snapview
//!
//! Snapshot-driven view reconciliation with a linear undo/redo history.
//!
//! Application state is a single immutable snapshot. A tree of view nodes
//! renders it into backend widgets; user edits flow upward as new snapshots
//! into the history, and the next tick pushes the current snapshot back down.
//! Nodes skip work by comparing data identity, and keyed lists reconcile
//! their elements with a fast heuristic differ.
//!
//! ## Core Systems
//!
//! - **[`diff`]**: Keyed list differ producing remove / insert operations
//! - **[`history`]**: Linear snapshot history with transient previews
//! - **[`data`]**: Identity comparison for snapshot slices, record ids
//! - **[`view`]**: View nodes, keyed lists, submission channels, pending loads
//! - **[`debug`]**: Shadow mirror of the live view tree and its tree view
//! - **[`backend`]**: Rendering backend contract and a headless widget tree
//! - **[`app`]**: Application struct tying everything together
//! - **[`scheduler`]**: Tokio-driven refresh ticks
//! - **[`event`]**: Key events and application key bindings
//! - **[`record`]**: Action log recording and replay
//! - **[`testing`]**: Headless pilot and text snapshots
//! - **[`samples`]**: Todo list and level designer sample apps

// Foundation
pub mod data;
pub mod diff;
pub mod history;

// Views and rendering
pub mod backend;
pub mod debug;
pub mod view;

// Application
pub mod app;
pub mod event;
pub mod record;
pub mod scheduler;

// Tooling
pub mod samples;
pub mod testing;

pub use app::{App, AppConfig};
pub use history::SnapshotHistory;

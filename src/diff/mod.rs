//! Keyed list differ: remove/insert operations between two ordered sequences.

pub mod list;

pub use list::{apply, list_diff, Op, OpKind};

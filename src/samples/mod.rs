//! Sample applications built on the view framework.
//!
//! - [`todo`]: a todo list with a colour picker per item, a colour history
//!   panel fed from the undo history, and the debug view tree.
//! - [`level`]: a small level designer with asynchronously loading sprites,
//!   a selectable object list and a position editor.

pub mod level;
pub mod todo;

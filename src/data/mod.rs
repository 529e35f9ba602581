//! Snapshot data: identity comparison and record ids.

pub mod record;
pub mod shared;

pub use record::RecordId;
pub use shared::Shared;

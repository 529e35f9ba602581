//! Timestamped action log: record committed snapshots, replay them later.
//!
//! On disk a log is a JSON array of `[snapshot, elapsed_seconds]` pairs,
//! oldest first.

pub mod error;
pub mod log;
pub mod replay;

pub use error::RecordError;
pub use log::{ActionLog, LogEntry};
pub use replay::{Player, Recorder};

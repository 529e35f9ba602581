//! Errors raised while reading or writing action logs.

use std::io;
use std::path::PathBuf;

/// Failure to load or save an action log.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The log file could not be read or written.
    #[error("cannot access action log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The log is not a valid JSON array of `[snapshot, seconds]` pairs.
    #[error("malformed action log: {0}")]
    Json(#[from] serde_json::Error),
    /// A log meant for replay holds no entries.
    #[error("action log {0} has no entries")]
    Empty(PathBuf),
}

impl RecordError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

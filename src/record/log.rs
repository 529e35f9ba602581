//! `ActionLog`: ordered `(snapshot, elapsed seconds)` pairs.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::RecordError;

/// One logged snapshot and the app time at which it was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry<T>(pub T, pub f64);

impl<T> LogEntry<T> {
    /// The logged snapshot.
    pub fn snapshot(&self) -> &T {
        &self.0
    }

    /// App time of the entry. Negative or non-finite values read as zero.
    pub fn elapsed(&self) -> Duration {
        Duration::try_from_secs_f64(self.1).unwrap_or(Duration::ZERO)
    }
}

/// Ordered action log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionLog<T> {
    entries: Vec<LogEntry<T>>,
}

impl<T> ActionLog<T> {
    /// An empty log.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a snapshot committed at `elapsed`.
    pub fn push(&mut self, snapshot: T, elapsed: Duration) {
        self.entries.push(LogEntry(snapshot, elapsed.as_secs_f64()));
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[LogEntry<T>] {
        &self.entries
    }

    /// Consume the log.
    pub fn into_entries(self) -> Vec<LogEntry<T>> {
        self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> ActionLog<T> {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the log to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RecordError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| RecordError::io(path, e))?;
        debug!(path = %path.display(), entries = self.len(), "action log saved");
        Ok(())
    }
}

impl<T: DeserializeOwned> ActionLog<T> {
    /// Parse a log from JSON.
    pub fn from_json(json: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a log for replay. An empty log is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| RecordError::io(path, e))?;
        let log = Self::from_json(&json)?;
        if log.is_empty() {
            return Err(RecordError::Empty(path.to_path_buf()));
        }
        debug!(path = %path.display(), entries = log.len(), "action log loaded");
        Ok(log)
    }
}

impl<T> Default for ActionLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

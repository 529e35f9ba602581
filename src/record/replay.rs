//! Recording committed snapshots and replaying them on the app clock.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;
use tracing::trace;

use super::error::RecordError;
use super::log::{ActionLog, LogEntry};

// ---------------------------------------------------------------------------
// Recorder
// ---------------------------------------------------------------------------

/// Collects committed snapshots into an [`ActionLog`].
#[derive(Debug)]
pub struct Recorder<T> {
    log: ActionLog<T>,
    path: Option<PathBuf>,
}

impl<T> Recorder<T> {
    /// Record in memory only.
    pub fn new() -> Self {
        Self {
            log: ActionLog::new(),
            path: None,
        }
    }

    /// Record and write the log to `path` on [`finish`](Recorder::finish).
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            log: ActionLog::new(),
            path: Some(path.into()),
        }
    }

    /// Append a committed snapshot.
    pub fn record(&mut self, snapshot: T, elapsed: Duration) {
        trace!(entries = self.log.len() + 1, ?elapsed, "recorded");
        self.log.push(snapshot, elapsed);
    }

    /// The log so far.
    pub fn log(&self) -> &ActionLog<T> {
        &self.log
    }

    /// Target file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<T: Serialize> Recorder<T> {
    /// Write the log to its file, if one was given, and return it.
    pub fn finish(self) -> Result<ActionLog<T>, RecordError> {
        if let Some(path) = &self.path {
            self.log.save(path)?;
        }
        Ok(self.log)
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Hands out logged snapshots once the app clock reaches their time.
#[derive(Debug)]
pub struct Player<T> {
    pending: VecDeque<LogEntry<T>>,
}

impl<T> Player<T> {
    /// Replay `log` from the start.
    pub fn new(log: ActionLog<T>) -> Self {
        Self {
            pending: log.into_entries().into(),
        }
    }

    /// Every snapshot whose time is at or before `elapsed`, in log order.
    pub fn due(&mut self, elapsed: Duration) -> Vec<T> {
        let mut out = Vec::new();
        while self
            .pending
            .front()
            .is_some_and(|entry| entry.elapsed() <= elapsed)
        {
            if let Some(LogEntry(snapshot, _)) = self.pending.pop_front() {
                out.push(snapshot);
            }
        }
        if !out.is_empty() {
            trace!(count = out.len(), remaining = self.pending.len(), "replay due");
        }
        out
    }

    /// Entries not replayed yet.
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Whether every entry was replayed.
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }
}

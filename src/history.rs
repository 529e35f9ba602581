//! Linear undo/redo over immutable snapshots.
//!
//! [`SnapshotHistory`] keeps an ordered, never-empty list of snapshots and a
//! cursor. Pushing while the cursor is behind the tail discards the redo
//! branch. A push made with `record_in_history = false` is a transient head:
//! the next push replaces it instead of stacking on top, so a drag that emits
//! many intermediate values collapses into a single undo step once committed.

use tracing::trace;

// ---------------------------------------------------------------------------
// SnapshotHistory
// ---------------------------------------------------------------------------

/// Ordered snapshot history with a cursor.
///
/// Invariants: `entries` is never empty, `cursor < entries.len()`, and two
/// adjacent entries are never equal.
#[derive(Debug, Clone)]
pub struct SnapshotHistory<T> {
    entries: Vec<T>,
    cursor: usize,
    head_recorded: bool,
    revision: u64,
}

impl<T: PartialEq> SnapshotHistory<T> {
    /// Create a history holding a single seed snapshot.
    pub fn new(seed: T) -> Self {
        Self {
            entries: vec![seed],
            cursor: 0,
            head_recorded: true,
            revision: 0,
        }
    }

    /// Push a new snapshot and move the cursor to the tail.
    ///
    /// With `record_in_history = false` the snapshot is shown but will be
    /// replaced by the next push. Pushing a value equal to the tail does not
    /// grow the history.
    pub fn push(&mut self, snapshot: T, record_in_history: bool) {
        if self.cursor + 1 != self.entries.len() {
            self.entries.truncate(self.cursor + 1);
        } else if !self.head_recorded {
            self.entries.pop();
        }
        if self.entries.last() != Some(&snapshot) {
            self.entries.push(snapshot);
        }
        self.cursor = self.entries.len() - 1;
        self.head_recorded = record_in_history;
        self.revision += 1;
        trace!(
            len = self.entries.len(),
            record_in_history,
            "history push"
        );
    }

    /// Push a snapshot that becomes an undo step.
    pub fn commit(&mut self, snapshot: T) {
        self.push(snapshot, true);
    }

    /// Push a transient snapshot that the next push replaces.
    pub fn preview(&mut self, snapshot: T) {
        self.push(snapshot, false);
    }

    /// Step the cursor back. Returns `false` (and does nothing) at the start.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.revision += 1;
        trace!(cursor = self.cursor, "history undo");
        true
    }

    /// Step the cursor forward. Returns `false` (and does nothing) at the tail.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        self.revision += 1;
        trace!(cursor = self.cursor, "history redo");
        true
    }
}

impl<T> SnapshotHistory<T> {
    /// The snapshot under the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    /// Index of the current snapshot.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a history holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All snapshots, oldest first.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Whether [`undo`](SnapshotHistory::undo) would move the cursor.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Whether [`redo`](SnapshotHistory::redo) would move the cursor.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Counter bumped by every push, undo and redo that took effect.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

// ===========================================================================
// Tests
// ===========================================================================

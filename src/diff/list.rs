//! Heuristic keyed list diff.
//!
//! [`list_diff`] compares an old and a new ordered sequence by key and returns
//! the [`Op`]s that turn one into the other. It runs in O(n) and does not
//! guarantee a minimal edit script: it favours keeping unrelated siblings in
//! place, so a single substituted element becomes one remove plus one insert
//! at the same index instead of a cascade.
//!
//! Every `Remove` precedes every `Insert` in the result. Removes are emitted in
//! descending index order, so each index is valid against the old sequence
//! when applied in order; insert indices refer to the sequence being rebuilt.

// ---------------------------------------------------------------------------
// Op
// ---------------------------------------------------------------------------

/// Kind of a diff operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Delete the element at `index` from the working sequence.
    Remove,
    /// Insert `item` at `index` into the working sequence.
    Insert,
}

/// A single diff operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op<T> {
    /// Position in the working sequence at the time the op is applied.
    pub index: usize,
    /// Remove or insert.
    pub kind: OpKind,
    /// The removed item (old sequence) or the inserted item (new sequence).
    pub item: T,
}

impl<T> Op<T> {
    /// A remove operation.
    pub fn remove(index: usize, item: T) -> Self {
        Self {
            index,
            kind: OpKind::Remove,
            item,
        }
    }

    /// An insert operation.
    pub fn insert(index: usize, item: T) -> Self {
        Self {
            index,
            kind: OpKind::Insert,
            item,
        }
    }

    /// Whether this is a remove operation.
    pub fn is_remove(&self) -> bool {
        self.kind == OpKind::Remove
    }
}

// ---------------------------------------------------------------------------
// list_diff
// ---------------------------------------------------------------------------

/// Compute the operations that transform `old` into `new`.
///
/// `key_of` extracts the comparison key of an element. Keys do not have to be
/// unique; duplicates are matched greedily, first occurrence first.
///
/// # Examples
///
/// ```
/// use snapview::diff::{list_diff, Op};
///
/// let ops = list_diff(&[1, 2, 6, 2, 4], &[1, 2, 5, 2, 4], |v| *v);
/// assert_eq!(ops, vec![Op::remove(2, 6), Op::insert(2, 5)]);
/// ```
pub fn list_diff<T, K, F>(old: &[T], new: &[T], key_of: F) -> Vec<Op<T>>
where
    T: Clone,
    K: PartialEq,
    F: Fn(&T) -> K,
{
    let old_keys: Vec<K> = old.iter().map(&key_of).collect();
    let new_keys: Vec<K> = new.iter().map(&key_of).collect();
    let old_len = old.len();
    let new_len = new.len();

    // Pass 1: decide which old elements go away. `surviving` is what the
    // working list looks like once all removes are applied.
    let mut removes = Vec::new();
    let mut surviving: Vec<&K> = Vec::new();
    let mut oi = 0;
    let mut ni = 0;
    while oi < old_len && ni < new_len {
        let old_key = &old_keys[oi];
        if *old_key == new_keys[ni] {
            surviving.push(old_key);
            oi += 1;
            ni += 1;
        } else if old_len == new_len
            && oi == ni
            && oi + 1 < old_len
            && old_keys[oi + 1] == new_keys[ni + 1]
        {
            // Exactly one element differs at this position: replace it in place.
            removes.push(Op::remove(oi, old[oi].clone()));
            oi += 1;
            ni += 1;
        } else if ni + 1 < new_len && *old_key == new_keys[ni + 1] {
            // The current new element is a fresh insertion in front of this one.
            surviving.push(old_key);
            oi += 1;
            ni += 2;
        } else {
            removes.push(Op::remove(oi, old[oi].clone()));
            oi += 1;
        }
    }
    removes.extend((oi..old_len).map(|i| Op::remove(i, old[i].clone())));
    removes.reverse();

    // Pass 2: insert every new element that has no surviving counterpart.
    let mut ops = removes;
    let mut si = 0;
    ni = 0;
    while ni < new_len && si < surviving.len() {
        if *surviving[si] == new_keys[ni] {
            si += 1;
        } else {
            ops.push(Op::insert(ni, new[ni].clone()));
        }
        ni += 1;
    }
    ops.extend((ni..new_len).map(|i| Op::insert(i, new[i].clone())));
    ops
}

/// Apply `ops` to `target` in order.
///
/// # Panics
///
/// Panics if an operation index is out of range for the working sequence,
/// which cannot happen for operations produced by [`list_diff`] on the same
/// old sequence.
pub fn apply<T: Clone>(target: &mut Vec<T>, ops: &[Op<T>]) {
    for op in ops {
        match op.kind {
            OpKind::Remove => {
                target.remove(op.index);
            }
            OpKind::Insert => target.insert(op.index, op.item.clone()),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn diff(old: &[u32], new: &[u32]) -> Vec<Op<u32>> {
        list_diff(old, new, |v| *v)
    }

    fn patched(old: &[u32], new: &[u32]) -> Vec<u32> {
        let mut working = old.to_vec();
        apply(&mut working, &diff(old, new));
        working
    }

    // ── Fixed cases ──────────────────────────────────────────────────

    #[test]
    fn identical_lists_produce_no_ops() {
        assert!(diff(&[1, 2, 3], &[1, 2, 3]).is_empty());
        assert!(diff(&[], &[]).is_empty());
    }

    #[test]
    fn single_substitution_stays_in_place() {
        let ops = diff(&[1, 2, 6, 2, 4], &[1, 2, 5, 2, 4]);
        assert_eq!(ops, vec![Op::remove(2, 6), Op::insert(2, 5)]);
    }

    #[test]
    fn substitution_at_head() {
        let ops = diff(&[9, 2, 3], &[1, 2, 3]);
        assert_eq!(ops, vec![Op::remove(0, 9), Op::insert(0, 1)]);
    }

    #[test]
    fn insert_in_middle_keeps_neighbours() {
        let ops = diff(&[1, 2, 3], &[1, 7, 2, 3]);
        assert_eq!(ops, vec![Op::insert(1, 7)]);
    }

    #[test]
    fn remove_in_middle() {
        let ops = diff(&[1, 2, 3], &[1, 3]);
        assert_eq!(ops, vec![Op::remove(1, 2)]);
    }

    #[test]
    fn append_to_empty() {
        let ops = diff(&[], &[4, 5]);
        assert_eq!(ops, vec![Op::insert(0, 4), Op::insert(1, 5)]);
    }

    #[test]
    fn clear_removes_highest_index_first() {
        let ops = diff(&[4, 5, 6], &[]);
        assert_eq!(ops, vec![Op::remove(2, 6), Op::remove(1, 5), Op::remove(0, 4)]);
    }

    #[test]
    fn substitution_heuristic_needs_equal_lengths() {
        // Same shape as the stable example, but the new list is longer: the
        // element is removed and both new values are inserted.
        let ops = diff(&[1, 6, 2], &[1, 5, 2, 8]);
        assert_eq!(patched(&[1, 6, 2], &[1, 5, 2, 8]), vec![1, 5, 2, 8]);
        assert!(ops.contains(&Op::remove(1, 6)));
        assert!(ops.contains(&Op::insert(1, 5)));
    }

    #[test]
    fn reorder_round_trips() {
        assert_eq!(patched(&[1, 2, 3, 4], &[4, 3, 2, 1]), vec![4, 3, 2, 1]);
        assert_eq!(patched(&[1, 2, 3], &[3, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn duplicate_keys_round_trip() {
        assert_eq!(patched(&[1, 1, 2, 1], &[2, 1, 1]), vec![2, 1, 1]);
    }

    #[test]
    fn key_function_is_used_for_matching() {
        let old = [(1, "a"), (2, "b")];
        let new = [(1, "changed"), (2, "b")];
        // Same keys: no operations even though payloads differ.
        assert!(list_diff(&old, &new, |(k, _)| *k).is_empty());
    }

    #[test]
    fn removes_precede_inserts() {
        let ops = diff(&[1, 2, 3, 4, 5], &[6, 1, 7, 3]);
        let first_insert = ops.iter().position(|op| !op.is_remove()).unwrap_or(ops.len());
        assert!(ops[first_insert..].iter().all(|op| !op.is_remove()));
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_patch_reproduces_new(
            old in proptest::collection::vec(0u32..6, 0..12),
            new in proptest::collection::vec(0u32..6, 0..12),
        ) {
            prop_assert_eq!(patched(&old, &new), new);
        }

        #[test]
        fn prop_no_insert_before_remove(
            old in proptest::collection::vec(0u32..6, 0..12),
            new in proptest::collection::vec(0u32..6, 0..12),
        ) {
            let ops = diff(&old, &new);
            let mut seen_insert = false;
            for op in &ops {
                if op.is_remove() {
                    prop_assert!(!seen_insert);
                } else {
                    seen_insert = true;
                }
            }
        }

        #[test]
        fn prop_same_list_is_noop(list in proptest::collection::vec(0u32..6, 0..12)) {
            prop_assert!(diff(&list, &list).is_empty());
        }
    }
}

//! The `Shared` trait: cheap identity for immutable snapshot slices.
//!
//! Nodes decide whether to re-render by identity, not by deep equality: a
//! slice that was carried over unchanged into a new snapshot is the same
//! allocation, so comparing pointers is enough. Value equality is still
//! available through `PartialEq` and is what the history uses for dedup.

use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// A cloneable, immutable value compared by identity.
pub trait Shared: Clone + fmt::Debug + 'static {
    /// An address-like token; equal tokens mean the same value instance.
    fn identity(&self) -> usize;

    /// Whether `self` and `other` are the same instance.
    fn same(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<T: fmt::Debug + ?Sized + 'static> Shared for Arc<T> {
    fn identity(&self) -> usize {
        Arc::as_ptr(self) as *const () as usize
    }

    fn same(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

impl<T: Shared> Shared for Option<T> {
    fn identity(&self) -> usize {
        self.as_ref().map_or(0, Shared::identity)
    }

    fn same(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl Shared for () {
    fn identity(&self) -> usize {
        0
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_clone_is_same() {
        let a = Arc::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.same(&b));
        assert_eq!(a.identity(), b.identity());
    }

    #[test]
    fn equal_values_are_not_same() {
        let a = Arc::new(vec![1, 2, 3]);
        let b = Arc::new(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert!(!a.same(&b));
    }

    #[test]
    fn unsized_arc() {
        let a: Arc<str> = Arc::from("red");
        let b = a.clone();
        assert!(a.same(&b));
        assert!(!a.same(&Arc::from("red")));
    }

    #[test]
    fn option_identity() {
        let a = Some(Arc::new(1));
        assert!(a.same(&a.clone()));
        assert!(None::<Arc<i32>>.same(&None));
        assert!(!a.same(&None));
        assert_eq!(None::<Arc<i32>>.identity(), 0);
    }

    #[test]
    fn unit_is_always_same() {
        assert!(().same(&()));
    }
}

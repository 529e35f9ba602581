//! The upward submission channel.

use std::fmt;
use std::rc::Rc;

/// Callback a node uses to hand a new value of its data to its owner.
///
/// The second argument is `record_in_history`: `true` for a final edit that
/// becomes an undo step, `false` for a transient value (mid-drag, live
/// colour preview) that the next submission replaces.
pub struct Submitter<D>(Option<Rc<dyn Fn(D, bool)>>);

impl<D: 'static> Submitter<D> {
    /// Wrap a callback.
    pub fn new(f: impl Fn(D, bool) + 'static) -> Self {
        Self(Some(Rc::new(f)))
    }

    /// A submitter connected to nothing. Submissions are dropped.
    pub fn none() -> Self {
        Self(None)
    }

    /// Whether submissions reach anyone.
    pub fn is_connected(&self) -> bool {
        self.0.is_some()
    }

    /// Submit a value.
    pub fn submit(&self, value: D, record_in_history: bool) {
        if let Some(f) = &self.0 {
            f(value, record_in_history);
        }
    }

    /// Submit a final value.
    pub fn commit(&self, value: D) {
        self.submit(value, true);
    }

    /// Submit a transient value.
    pub fn preview(&self, value: D) {
        self.submit(value, false);
    }

    /// Compose with a conversion from a child value `C` into `D`.
    ///
    /// `f` returning `None` drops the submission.
    pub fn map<C: 'static>(&self, f: impl Fn(C) -> Option<D> + 'static) -> Submitter<C> {
        match &self.0 {
            None => Submitter::none(),
            Some(parent) => {
                let parent = Rc::clone(parent);
                Submitter::new(move |value, record| {
                    if let Some(mapped) = f(value) {
                        parent(mapped, record);
                    }
                })
            }
        }
    }
}

impl<D> Clone for Submitter<D> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<D> fmt::Debug for Submitter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Submitter")
            .field(&if self.0.is_some() { "connected" } else { "none" })
            .finish()
    }
}

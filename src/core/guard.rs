//! Guard predicates for gating transitions.
//!
//! Guards are pure boolean functions over an engine state. The wizard uses
//! one per step to decide whether `Next` may advance.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that decides whether a transition may run.
///
/// Guards are cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use careflow::core::Guard;
///
/// struct Basket {
///     items: usize,
/// }
///
/// let can_checkout = Guard::new(|b: &Basket| b.items > 0);
///
/// assert!(can_checkout.check(&Basket { items: 2 }));
/// assert!(!can_checkout.check(&Basket { items: 0 }));
/// ```
pub struct Guard<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Guard<T> {
    /// Create a guard from a pure predicate.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self
    where
        T: 'static,
    {
        Guard::new(|_: &T| true)
    }

    /// Check whether the guard allows a transition from `state`.
    pub fn check(&self, state: &T) -> bool {
        (self.predicate)(state)
    }
}

impl<T> Clone for Guard<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Guard<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

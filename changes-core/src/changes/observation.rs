//! Observations
//!
//! An Observation is one subscription record in a stream's observer list: a
//! weakly-bound callback plus a signed suppression depth.
//!
//! # Lifecycle
//!
//! ```text
//! observe ──> Active <──> Suppressed (inside disable scopes)
//!               │
//!               └── context dropped ──> Dead (pruned on next announce)
//! ```
//!
//! There is no explicit unregister. An observation goes away when its
//! context does, and the owning stream notices during the next announce.
//!
//! # Suppression
//!
//! `disable` uses a counter rather than a flag so that nested scopes
//! compose: an outer scope stays in effect across an inner disable/enable
//! pair. A depth below zero means suppressed.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::weak::Deliver;

/// A single subscription record.
pub struct Observation<V> {
    observer: Box<dyn Deliver<V>>,
    suppression: Cell<i32>,
}

impl<V> Observation<V> {
    pub(crate) fn new(observer: Box<dyn Deliver<V>>) -> Self {
        Self {
            observer,
            suppression: Cell::new(0),
        }
    }

    /// Deliver `value` and report whether the observation is still alive.
    ///
    /// A suppressed observation is not invoked but counts as alive, so it is
    /// never pruned merely for being disabled.
    pub fn apply(&self, value: &V) -> bool {
        if self.is_suppressed() {
            return true;
        }
        self.observer.apply_if_alive(value)
    }

    /// Check whether delivery is currently suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.suppression.get() < 0
    }

    /// Current suppression depth (negative while suppressed).
    pub fn suppression_depth(&self) -> i32 {
        self.suppression.get()
    }
}

impl<V> fmt::Debug for Observation<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observation")
            .field("suppression", &self.suppression.get())
            .finish_non_exhaustive()
    }
}

/// Guard that lifts one level of suppression when dropped.
///
/// Restoring in `Drop` keeps the counter balanced even if the scope panics.
struct Suppressed<'a, V> {
    observation: &'a Observation<V>,
}

impl<'a, V> Suppressed<'a, V> {
    fn enter(observation: &'a Observation<V>) -> Self {
        let depth = observation.suppression.get() - 1;
        observation.suppression.set(depth);
        tracing::trace!(depth, "observation disabled");
        Self { observation }
    }
}

impl<V> Drop for Suppressed<'_, V> {
    fn drop(&mut self) {
        let depth = self.observation.suppression.get() + 1;
        self.observation.suppression.set(depth);
        tracing::trace!(depth, "observation re-enabled");
    }
}

/// Handle to a registered observation, returned by `observe`.
///
/// The handle is only good for temporarily disabling the observation. It
/// does not control the subscription's lifetime; that is tied to the
/// context object passed to `observe`.
pub struct ObservationHandle<V> {
    observation: Rc<Observation<V>>,
}

impl<V> ObservationHandle<V> {
    pub(crate) fn new(observation: Rc<Observation<V>>) -> Self {
        Self { observation }
    }

    /// Run `scope` with this observation suppressed.
    ///
    /// Announcements made while `scope` runs are not delivered to this
    /// observation. Calls can be nested; delivery resumes once the outermost
    /// scope returns.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// // Push an edit without echoing it back into our own cache.
    /// handle.disable(|| edits.announce(edit));
    /// ```
    pub fn disable<R>(&self, scope: impl FnOnce() -> R) -> R {
        let _suppressed = Suppressed::enter(&self.observation);
        scope()
    }

    /// Check whether the observation is currently suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.observation.is_suppressed()
    }

    /// Deliver `value` to this observation only.
    pub(crate) fn replay(&self, value: &V) -> bool {
        self.observation.apply(value)
    }
}

impl<V> Clone for ObservationHandle<V> {
    fn clone(&self) -> Self {
        Self {
            observation: Rc::clone(&self.observation),
        }
    }
}

impl<V> fmt::Debug for ObservationHandle<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObservationHandle")
            .field(&self.observation)
            .finish()
    }
}

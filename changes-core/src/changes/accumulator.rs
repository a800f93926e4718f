//! Accumulator Implementation
//!
//! An Accumulator folds a stream of inputs into a continuously updated value
//! and broadcasts every new value on an internal stream.
//!
//! # How Accumulators Work
//!
//! 1. On construction the accumulator stores the initial value and observes
//!    its source, using itself as the observation context.
//!
//! 2. Each input is folded into the current value, which is then announced
//!    on the internal stream.
//!
//! 3. `observe` registers on the internal stream and immediately replays the
//!    current value to the new observer. A late subscriber therefore never
//!    has to query the state separately.
//!
//! # Lifetime
//!
//! The accumulator holds its source strongly; the source only sees the
//! accumulator through a weak observation. Dropping the last accumulator
//! handle releases the subscription, which the source prunes on its next
//! announce.
//!
//! Observing an accumulator from another pipeline stage replays its current
//! value into that stage at construction time, before the stage has any
//! observers of its own.

use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use super::combinators::Observable;
use super::observation::ObservationHandle;
use super::stream::{KeepAlive, Stream};

struct AccumulatorInner<A> {
    current: RefCell<A>,
    changes: Stream<A>,
    _upstream: KeepAlive,
}

/// A folded value that evolves with its source stream.
///
/// Cloning an `Accumulator` creates a new handle to the same state.
///
/// # Example
///
/// ```rust,ignore
/// let deposits = Stream::new();
/// let balance = deposits.accumulate(0, |amount, total| total + amount);
///
/// deposits.announce(10);
/// deposits.announce(5);
/// assert_eq!(balance.current(), 15);
/// ```
pub struct Accumulator<A> {
    inner: Rc<AccumulatorInner<A>>,
}

impl<A: Clone + 'static> Accumulator<A> {
    /// Fold `source` into a value starting from `initial`.
    ///
    /// `fold` receives the incoming value and the current accumulated value
    /// and returns the new accumulated value.
    #[track_caller]
    pub fn new<O, F>(source: &O, initial: A, fold: F) -> Self
    where
        O: Observable,
        F: Fn(&O::Value, &A) -> A + 'static,
    {
        let inner = Rc::new(AccumulatorInner {
            current: RefCell::new(initial),
            changes: Stream::new(),
            _upstream: source.keep_alive(),
        });

        source.observe(&inner, move |acc, value| {
            let next = fold(value, &*acc.current.borrow());
            acc.current.replace(next.clone());
            acc.changes.announce(next);
        });

        Self { inner }
    }

    /// A clone of the current accumulated value.
    pub fn current(&self) -> A {
        self.inner.current.borrow().clone()
    }

    /// Access the current value by reference without cloning.
    pub fn with_current<R>(&self, f: impl FnOnce(&A) -> R) -> R {
        f(&*self.inner.current.borrow())
    }

    /// Number of observations on the internal update stream.
    pub fn observer_count(&self) -> usize {
        self.inner.changes.observer_count()
    }

    /// Source location where the accumulator was created.
    pub fn origin(&self) -> &'static Location<'static> {
        self.inner.changes.origin()
    }
}

impl<A: Clone + 'static> Observable for Accumulator<A> {
    type Value = A;

    /// Register `observer` for future updates and immediately call it with
    /// the current value.
    fn observe<C, F>(&self, context: &Rc<C>, observer: F) -> ObservationHandle<A>
    where
        C: ?Sized + 'static,
        F: Fn(&C, &A) + 'static,
    {
        let handle = self.inner.changes.observe(context, observer);
        let current = self.current();
        handle.replay(&current);
        handle
    }

    fn keep_alive(&self) -> KeepAlive {
        Rc::clone(&self.inner) as KeepAlive
    }
}

impl<A> Clone for Accumulator<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: fmt::Debug> fmt::Debug for Accumulator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("current", &*self.inner.current.borrow())
            .field("changes", &self.inner.changes)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

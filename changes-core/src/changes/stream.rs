//! Stream Implementation
//!
//! A Stream is the fundamental change-propagation channel. It keeps an
//! ordered list of observations and delivers every announced value to each
//! of them.
//!
//! # How Streams Work
//!
//! 1. `observe` wraps the callback in a weak handle bound to a context
//!    object and appends it to the observer list.
//!
//! 2. `announce` takes a snapshot of the list, applies the value to each
//!    observation in registration order, and then drops exactly those
//!    observations that reported their context as gone.
//!
//! 3. Nothing else ever removes an observation. Pruning is lazy: a dead
//!    observer lingers until the next announce on the same stream.
//!
//! # Re-entrancy
//!
//! Observer callbacks run without any borrow on the observer list held, so
//! they may announce on other streams, on this stream, or register new
//! observers. An observer registered during an announce first sees the
//! next announce.
//!
//! # Keep-alive Edges
//!
//! A derived stream may retain an upstream node (see [`KeepAlive`]). The
//! edge only ever points from derived to upstream; the upstream refers back
//! to the derived stream solely through a weak observation, so pipelines
//! never form reference cycles.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use smallvec::SmallVec;

use super::access::{Inlet, Outlet};
use super::combinators::Observable;
use super::observation::{Observation, ObservationHandle};
use super::weak::WeakHandle;

/// Type-erased strong reference that keeps a pipeline stage alive.
pub type KeepAlive = Rc<dyn Any>;

type ObserverList<V> = SmallVec<[Rc<Observation<V>>; 4]>;

pub(crate) struct StreamInner<V> {
    observers: RefCell<ObserverList<V>>,

    /// Where the stream was created, for log records.
    origin: &'static Location<'static>,

    retained: Option<KeepAlive>,
}

impl<V: 'static> StreamInner<V> {
    pub(crate) fn announce(&self, value: V) {
        let snapshot: ObserverList<V> = self.observers.borrow().clone();
        tracing::trace!(origin = %self.origin, observers = snapshot.len(), "announce");

        if snapshot.is_empty() {
            return;
        }

        let mut stale: SmallVec<[Rc<Observation<V>>; 2]> = SmallVec::new();
        for observation in snapshot {
            if !observation.apply(&value) {
                stale.push(observation);
            }
        }

        if !stale.is_empty() {
            self.observers
                .borrow_mut()
                .retain(|entry| !stale.iter().any(|dead| Rc::ptr_eq(dead, &*entry)));
            tracing::debug!(
                origin = %self.origin,
                pruned = stale.len(),
                "pruned stale observers"
            );
        }
    }

    fn observe<C, F>(&self, context: &Rc<C>, observer: F) -> ObservationHandle<V>
    where
        C: ?Sized + 'static,
        F: Fn(&C, &V) + 'static,
    {
        let observation = Rc::new(Observation::new(Box::new(WeakHandle::new(
            context, observer,
        ))));
        self.observers.borrow_mut().push(Rc::clone(&observation));
        ObservationHandle::new(observation)
    }
}

/// A channel of values of type `V`.
///
/// Cloning a `Stream` creates a new handle to the **same** channel: both
/// handles share the observer list.
///
/// # Example
///
/// ```rust,ignore
/// let edits = Stream::new();
/// let view = Rc::new(View::default());
///
/// edits.observe(&view, |view, edit| view.apply(edit));
/// edits.announce(Edit::Clear);   // view.apply runs
///
/// drop(view);
/// edits.announce(Edit::Clear);   // nobody runs; the observation is pruned
/// ```
pub struct Stream<V> {
    pub(super) inner: Rc<StreamInner<V>>,
}

impl<V: 'static> Stream<V> {
    /// Create a stream with no observers.
    #[track_caller]
    pub fn new() -> Self {
        Self::with_retained(None)
    }

    /// Create a stream that keeps `upstream` alive for as long as the stream
    /// itself lives.
    #[track_caller]
    pub(crate) fn retaining(upstream: KeepAlive) -> Self {
        Self::with_retained(Some(upstream))
    }

    #[track_caller]
    fn with_retained(retained: Option<KeepAlive>) -> Self {
        let origin = Location::caller();
        tracing::trace!(%origin, "stream created");
        Self {
            inner: Rc::new(StreamInner {
                observers: RefCell::new(SmallVec::new()),
                origin,
                retained,
            }),
        }
    }

    /// Deliver `value` to every live observer, in registration order.
    ///
    /// Observations whose context has gone are removed as part of this call.
    /// A panicking observer aborts the announcement for all observers after
    /// it; the panic propagates to the caller unchanged.
    pub fn announce(&self, value: V) {
        self.inner.announce(value);
    }

    /// Write-only view of this stream.
    pub fn inlet(&self) -> Inlet<V> {
        Inlet::new(self.clone())
    }

    /// Read-only view of this stream.
    pub fn outlet(&self) -> Outlet<V> {
        Outlet::new(self.clone())
    }

    /// Number of registered observations, including dead ones that have
    /// not been pruned yet.
    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }

    /// Source location where the stream was created.
    pub fn origin(&self) -> &'static Location<'static> {
        self.inner.origin
    }
}

impl<V: 'static> Observable for Stream<V> {
    type Value = V;

    fn observe<C, F>(&self, context: &Rc<C>, observer: F) -> ObservationHandle<V>
    where
        C: ?Sized + 'static,
        F: Fn(&C, &V) + 'static,
    {
        self.inner.observe(context, observer)
    }

    fn keep_alive(&self) -> KeepAlive {
        Rc::clone(&self.inner) as KeepAlive
    }
}

impl<V: 'static> Default for Stream<V> {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Stream<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for Stream<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("origin", &format_args!("{}", self.inner.origin))
            .field("observer_count", &self.inner.observers.borrow().len())
            .field("retains_upstream", &self.inner.retained.is_some())
            .finish()
    }
}

/// A stream that only conveys points in time.
pub type Triggers = Stream<()>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

//! Capability-restricted views over a stream.
//!
//! A producer that owns a [`Stream`] can hand an [`Inlet`] to collaborators
//! that should only push values and an [`Outlet`] to collaborators that should
//! only listen. Neither view has state of its own.

use std::fmt;
use std::rc::Rc;

use super::combinators::Observable;
use super::observation::ObservationHandle;
use super::stream::{KeepAlive, Stream};

/// Write-only view of a stream.
pub struct Inlet<V> {
    stream: Stream<V>,
}

impl<V: 'static> Inlet<V> {
    pub(crate) fn new(stream: Stream<V>) -> Self {
        Self { stream }
    }

    /// Announce `value` on the underlying stream.
    pub fn announce(&self, value: V) {
        self.stream.announce(value);
    }
}

impl<V> Clone for Inlet<V> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
        }
    }
}

impl<V> fmt::Debug for Inlet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Inlet").field(&self.stream).finish()
    }
}

/// Read-only view of a stream.
///
/// An `Outlet` is [`Observable`], so pipelines can be built from it just as
/// from the stream itself.
pub struct Outlet<V> {
    stream: Stream<V>,
}

impl<V: 'static> Outlet<V> {
    pub(crate) fn new(stream: Stream<V>) -> Self {
        Self { stream }
    }
}

impl<V: 'static> Observable for Outlet<V> {
    type Value = V;

    fn observe<C, F>(&self, context: &Rc<C>, observer: F) -> ObservationHandle<V>
    where
        C: ?Sized + 'static,
        F: Fn(&C, &V) + 'static,
    {
        self.stream.observe(context, observer)
    }

    fn keep_alive(&self) -> KeepAlive {
        self.stream.keep_alive()
    }
}

impl<V> Clone for Outlet<V> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
        }
    }
}

impl<V> fmt::Debug for Outlet<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Outlet").field(&self.stream).finish()
    }
}

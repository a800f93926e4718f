//! Weakly-bound function application.
//!
//! A [`WeakHandle`] pairs a non-owning reference to a context object with a
//! function that is only applied while that context is still alive. It is the
//! building block that lets a stream hold on to its observers without keeping
//! the objects they belong to alive.

use std::rc::{Rc, Weak};

/// A non-owning reference to a context plus a deferred function application.
///
/// The handle never extends the lifetime of the context. Once the last
/// strong reference to the context is dropped, [`resolve`](Self::resolve)
/// yields `None` and [`apply_if_alive`](Deliver::apply_if_alive) reports the
/// handle as dead.
pub struct WeakHandle<C: ?Sized, F> {
    context: Weak<C>,
    bound: F,
}

impl<C: ?Sized, F> WeakHandle<C, F> {
    /// Bind `bound` to a weak reference to `context`.
    pub fn new(context: &Rc<C>, bound: F) -> Self {
        Self {
            context: Rc::downgrade(context),
            bound,
        }
    }

    /// Get the context if it is still alive.
    pub fn resolve(&self) -> Option<Rc<C>> {
        self.context.upgrade()
    }

    /// Check whether the context is still alive without upgrading.
    pub fn is_alive(&self) -> bool {
        self.context.strong_count() > 0
    }
}

/// Delivery of a value to a weakly-bound receiver.
///
/// This is the type-erased face of a [`WeakHandle`] that an observer list
/// stores: the concrete context type is captured at registration time and
/// disappears behind this trait.
pub trait Deliver<V: ?Sized> {
    /// Apply the bound function to `value` if the context is alive.
    ///
    /// Returns `false` if the context is gone, in which case nothing was
    /// invoked and the caller may drop the receiver.
    fn apply_if_alive(&self, value: &V) -> bool;
}

impl<C, V, F> Deliver<V> for WeakHandle<C, F>
where
    C: ?Sized,
    V: ?Sized,
    F: Fn(&C, &V),
{
    fn apply_if_alive(&self, value: &V) -> bool {
        match self.resolve() {
            Some(context) => {
                (self.bound)(&context, value);
                true
            }
            None => false,
        }
    }
}

//! Change Propagation Primitives
//!
//! This module implements weakly-bound publish/subscribe streams and the
//! combinators that build dataflow pipelines out of them.
//!
//! # Concepts
//!
//! ## Streams
//!
//! A [`Stream`] delivers announced values to its observers. Every
//! observation is bound to a context object that the stream only references
//! weakly, so subscribing never keeps the subscriber alive. Observations whose
//! context has gone are pruned during the next announce; there is no explicit
//! unregister.
//!
//! ## Inlets and Outlets
//!
//! An [`Inlet`] can only announce and an [`Outlet`] can only observe. They
//! let the owner of a stream hand out exactly the capability a collaborator
//! needs.
//!
//! ## Accumulators
//!
//! An [`Accumulator`] folds a stream into a current value. New observers get
//! the current value immediately and every update afterwards.
//!
//! ## Combinators
//!
//! `map`, `filter`, `merge` and `accumulate` are provided by the
//! [`Observable`] trait; [`lift2`] combines two accumulators. Each derived
//! stage retains its sources, and sources reach their derived stages only
//! through weak observations, so pipelines never form reference cycles.
//!
//! # Threading
//!
//! Everything here is single-threaded and synchronous: `announce` runs all
//! observers on the calling thread before returning, and the types are
//! neither `Send` nor `Sync`. Hosts that need cross-thread delivery must
//! confine a stream graph to one executor.

mod weak;
mod observation;
mod stream;
mod access;
mod accumulator;
mod combinators;
mod either;

pub use weak::{Deliver, WeakHandle};
pub use observation::{Observation, ObservationHandle};
pub use stream::{KeepAlive, Stream, Triggers};
pub use access::{Inlet, Outlet};
pub use accumulator::Accumulator;
pub use combinators::{lift2, Observable};
pub use either::Either;

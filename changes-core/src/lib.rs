//! Changes Core
//!
//! This crate provides minimal, FRP-style change propagation:
//!
//! - Streams whose subscriptions are bound to weakly referenced contexts and
//!   vanish together with them
//! - Capability views (inlets and outlets) over streams
//! - Accumulators that fold a stream into a replayed current value
//! - Pipeline combinators (`map`, `filter`, `merge`, `accumulate`, `lift2`)
//!   that keep their upstream alive without reference cycles
//!
//! On top of these sits a small goals model, the application layer that
//! folds edit streams into its live state.
//!
//! # Architecture
//!
//! - `changes`: the propagation primitives
//! - `goals`: goal records, edits, seed configuration and the model store
//!
//! # Example
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use changes_core::changes::{lift2, Observable, Stream};
//!
//! let prices = Stream::new();
//! let quantities = Stream::new();
//!
//! let price = prices.accumulate(0, |p, _| *p);
//! let quantity = quantities.accumulate(1, |q, _| *q);
//! let total = lift2(&price, &quantity, |p, q| p * q);
//!
//! let view = Rc::new(());
//! total.observe(&view, |_, total| println!("total: {total}"));  // prints 0
//!
//! prices.announce(5);       // prints 5
//! quantities.announce(3);   // prints 15
//! ```

pub mod changes;
pub mod goals;

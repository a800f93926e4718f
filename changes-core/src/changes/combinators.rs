//! Observables and Combinators
//!
//! [`Observable`] is the read side shared by streams, outlets and
//! accumulators. Its provided methods build pipelines: each combinator
//! creates a new stage that observes its source with the stage itself as
//! context and retains the source, so a pipeline lives exactly as long as
//! its most derived stage is referenced.
//!
//! # Pruning of Dropped Stages
//!
//! When a derived stage becomes unreachable, its observation on the source
//! goes dead but stays listed until the source announces again. This is the
//! same lazy pruning every stream applies to its observers.

use std::rc::Rc;

use super::accumulator::Accumulator;
use super::either::Either;
use super::observation::ObservationHandle;
use super::stream::{KeepAlive, Stream};

/// A source of values that can be observed.
pub trait Observable {
    /// The type of observed values.
    type Value: 'static;

    /// Register `observer` together with a context whose lifetime bounds the
    /// observation.
    ///
    /// Only a weak reference to `context` is kept. Once the context is
    /// dropped, the observer is never invoked again and is pruned on the next
    /// announce. The observer runs on the thread that announces.
    fn observe<C, F>(&self, context: &Rc<C>, observer: F) -> ObservationHandle<Self::Value>
    where
        C: ?Sized + 'static,
        F: Fn(&C, &Self::Value) + 'static;

    /// A strong, type-erased reference that keeps this node alive.
    fn keep_alive(&self) -> KeepAlive;

    /// Derive a stream announcing `transform(value)` for every value.
    #[track_caller]
    fn map<U, F>(&self, transform: F) -> Stream<U>
    where
        Self: Sized,
        U: 'static,
        F: Fn(&Self::Value) -> U + 'static,
    {
        let mapped = Stream::retaining(self.keep_alive());
        self.observe(&mapped.inner, move |stage, value| {
            stage.announce(transform(value));
        });
        mapped
    }

    /// Derive a stream re-announcing only values for which `predicate` holds.
    #[track_caller]
    fn filter<F>(&self, predicate: F) -> Stream<Self::Value>
    where
        Self: Sized,
        Self::Value: Clone,
        F: Fn(&Self::Value) -> bool + 'static,
    {
        let filtered = Stream::retaining(self.keep_alive());
        self.observe(&filtered.inner, move |stage, value| {
            if predicate(value) {
                stage.announce(value.clone());
            }
        });
        filtered
    }

    /// Merge this source with `right` into a stream of tagged values.
    ///
    /// Values from `self` arrive as `Left`, values from `right` as `Right`,
    /// each in the order its source announced them.
    #[track_caller]
    fn merge<O>(&self, right: &O) -> Stream<Either<Self::Value, O::Value>>
    where
        Self: Sized,
        O: Observable,
        Self::Value: Clone,
        O::Value: Clone,
    {
        let sources: (KeepAlive, KeepAlive) = (self.keep_alive(), right.keep_alive());
        let merged = Stream::retaining(Rc::new(sources));
        self.observe(&merged.inner, |stage, value: &Self::Value| {
            stage.announce(Either::Left(value.clone()));
        });
        right.observe(&merged.inner, |stage, value: &O::Value| {
            stage.announce(Either::Right(value.clone()));
        });
        merged
    }

    /// Fold this source into an [`Accumulator`].
    #[track_caller]
    fn accumulate<A, F>(&self, initial: A, fold: F) -> Accumulator<A>
    where
        Self: Sized,
        A: Clone + 'static,
        F: Fn(&Self::Value, &A) -> A + 'static,
    {
        Accumulator::new(self, initial, fold)
    }
}

/// Combine two accumulators point-wise.
///
/// The result starts at `combine(left, right)` and is recomputed whenever
/// either side changes, so it always equals `combine` applied to both
/// current values.
///
/// # Example
///
/// ```rust,ignore
/// let total = lift2(&subtotal, &shipping, |s, h| s + h);
/// ```
#[track_caller]
pub fn lift2<A, B, C, F>(left: &Accumulator<A>, right: &Accumulator<B>, combine: F) -> Accumulator<C>
where
    A: Clone + 'static,
    B: Clone + 'static,
    C: Clone + 'static,
    F: Fn(&A, &B) -> C + 'static,
{
    let initial = left.with_current(|a| right.with_current(|b| combine(a, b)));
    let (left_now, right_now) = (left.clone(), right.clone());

    left.merge(right).accumulate(initial, move |change, _| match change {
        Either::Left(a) => right_now.with_current(|b| combine(a, b)),
        Either::Right(b) => left_now.with_current(|a| combine(a, b)),
    })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recorder<T: Clone + 'static>(
        source: &impl Observable<Value = T>,
    ) -> (Rc<RefCell<Vec<T>>>, ObservationHandle<T>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle = source.observe(&log, |log, value: &T| log.borrow_mut().push(value.clone()));
        (log, handle)
    }

    #[test]
    fn map_transforms_each_value() {
        let source: Stream<i32> = Stream::new();
        let doubled = source.map(|v| v * 2);
        let (log, _) = recorder(&doubled);

        source.announce(1);
        source.announce(5);
        assert_eq!(*log.borrow(), vec![2, 10]);
    }

    #[test]
    fn filter_drops_rejected_values() {
        let source: Stream<i32> = Stream::new();
        let even = source.filter(|v| v % 2 == 0);
        let (log, _) = recorder(&even);

        for v in 1..=6 {
            source.announce(v);
        }
        assert_eq!(*log.borrow(), vec![2, 4, 6]);
    }

    #[test]
    fn merge_tags_by_source() {
        let numbers: Stream<i32> = Stream::new();
        let words: Stream<&'static str> = Stream::new();
        let merged = numbers.merge(&words);
        let (log, _) = recorder(&merged);

        numbers.announce(1);
        words.announce("a");
        numbers.announce(2);
        assert_eq!(
            *log.borrow(),
            vec![Either::Left(1), Either::Right("a"), Either::Left(2)]
        );
    }

    #[test]
    fn chained_pipeline_survives_intermediate_drops() {
        let source: Stream<i32> = Stream::new();
        let inlet = source.inlet();
        let tail = source.map(|v| v + 1).filter(|v| *v > 2).map(|v| v.to_string());
        drop(source);

        let (log, _) = recorder(&tail);
        inlet.announce(1);
        inlet.announce(2);
        inlet.announce(3);
        assert_eq!(*log.borrow(), vec!["3".to_string(), "4".to_string()]);
    }

    #[test]
    fn dropped_stage_is_pruned_lazily() {
        let source: Stream<i32> = Stream::new();
        let mapped = source.map(|v| v * 10);
        assert_eq!(source.observer_count(), 1);

        drop(mapped);
        assert_eq!(source.observer_count(), 1);

        source.announce(1);
        assert_eq!(source.observer_count(), 0);
    }

    #[test]
    fn merged_stream_keeps_both_sources() {
        let left: Stream<u8> = Stream::new();
        let right: Stream<u8> = Stream::new();
        let (left_in, right_in) = (left.inlet(), right.inlet());
        let merged = left.map(|v| v + 1).merge(&right.map(|v| v + 2));
        drop((left, right));

        let (log, _) = recorder(&merged);
        left_in.announce(0);
        right_in.announce(0);
        assert_eq!(*log.borrow(), vec![Either::Left(1), Either::Right(2)]);
    }

    #[test]
    fn lift2_tracks_both_sides() {
        let a_source: Stream<i32> = Stream::new();
        let b_source: Stream<i32> = Stream::new();
        let a = a_source.accumulate(1, |v, _| *v);
        let b = b_source.accumulate(10, |v, _| *v);
        let sum = lift2(&a, &b, |x, y| x + y);

        assert_eq!(sum.current(), 11);

        a_source.announce(2);
        assert_eq!(sum.current(), 12);

        b_source.announce(20);
        assert_eq!(sum.current(), 22);
    }

    #[test]
    fn lift2_replays_combined_value() {
        let a_source: Stream<i32> = Stream::new();
        let b_source: Stream<String> = Stream::new();
        let a = a_source.accumulate(0, |v: &i32, acc: &i32| acc + v);
        let b = b_source.accumulate(String::from("x"), |v, _| v.clone());
        let label = lift2(&a, &b, |n, s| format!("{s}{n}"));

        a_source.announce(3);
        let (log, _) = recorder(&label);
        b_source.announce("y".to_string());
        assert_eq!(*log.borrow(), vec!["x3".to_string(), "y3".to_string()]);
    }

    #[test]
    fn disable_on_derived_stream() {
        let source: Stream<i32> = Stream::new();
        let mapped = source.map(|v| v - 1);
        let (log, handle) = recorder(&mapped);

        handle.disable(|| source.announce(5));
        source.announce(6);
        assert_eq!(*log.borrow(), vec![5]);
    }
}

//! Property tests for stream combinators and accumulators.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;

use changes_core::changes::{lift2, Either, Observable, Stream};

fn record<O>(source: &O) -> Rc<RefCell<Vec<O::Value>>>
where
    O: Observable,
    O::Value: Clone,
{
    let log = Rc::new(RefCell::new(Vec::new()));
    source.observe(&log, |log, value: &O::Value| log.borrow_mut().push(value.clone()));
    log
}

proptest! {
    #[test]
    fn map_preserves_count_and_order(values in prop::collection::vec(any::<i32>(), 0..64)) {
        let source: Stream<i32> = Stream::new();
        let mapped = source.map(|v| v.wrapping_mul(3));
        let log = record(&mapped);

        for v in &values {
            source.announce(*v);
        }

        let expected: Vec<i32> = values.iter().map(|v| v.wrapping_mul(3)).collect();
        let recorded = log.borrow().clone();
        prop_assert_eq!(recorded, expected);
    }

    #[test]
    fn filter_count_matches_predicate(values in prop::collection::vec(any::<u8>(), 0..64)) {
        let source: Stream<u8> = Stream::new();
        let odd = source.filter(|v| v % 2 == 1);
        let log = record(&odd);

        for v in &values {
            source.announce(*v);
        }

        let expected: Vec<u8> = values.iter().copied().filter(|v| v % 2 == 1).collect();
        let recorded = log.borrow().clone();
        prop_assert_eq!(recorded, expected);
    }

    #[test]
    fn merge_loses_and_duplicates_nothing(
        announcements in prop::collection::vec(prop::bool::ANY.prop_flat_map(|left| {
            any::<i16>().prop_map(move |v| if left { Either::Left(v) } else { Either::Right(v) })
        }), 0..64)
    ) {
        let left: Stream<i16> = Stream::new();
        let right: Stream<i16> = Stream::new();
        let merged = left.merge(&right);
        let log = record(&merged);

        for change in &announcements {
            match change {
                Either::Left(v) => left.announce(*v),
                Either::Right(v) => right.announce(*v),
            }
        }

        let recorded = log.borrow().clone();
        prop_assert_eq!(recorded, announcements);
    }

    #[test]
    fn accumulate_replays_left_fold(
        values in prop::collection::vec(any::<i64>(), 0..64),
        split in 0usize..64,
    ) {
        let split = split.min(values.len());
        let source: Stream<i64> = Stream::new();
        let sum = source.accumulate(0i64, |v: &i64, total: &i64| total.wrapping_add(*v));

        for v in &values[..split] {
            source.announce(*v);
        }

        let log = record(&sum);
        for v in &values[split..] {
            source.announce(*v);
        }

        let mut expected = Vec::new();
        let mut total = values[..split].iter().fold(0i64, |t, v| t.wrapping_add(*v));
        expected.push(total);
        for v in &values[split..] {
            total = total.wrapping_add(*v);
            expected.push(total);
        }
        let recorded = log.borrow().clone();
        prop_assert_eq!(recorded, expected);
    }

    #[test]
    fn lift2_never_stale(
        announcements in prop::collection::vec((any::<bool>(), -1000i32..1000), 0..64)
    ) {
        let a_source: Stream<i32> = Stream::new();
        let b_source: Stream<i32> = Stream::new();
        let a = a_source.accumulate(0, |v: &i32, t: &i32| t + v);
        let b = b_source.accumulate(1, |v: &i32, _: &i32| *v);
        let lifted = lift2(&a, &b, |x, y| x * 7 + y);

        for (to_a, v) in announcements {
            if to_a {
                a_source.announce(v);
            } else {
                b_source.announce(v);
            }
            prop_assert_eq!(lifted.current(), a.current() * 7 + b.current());
        }
    }
}

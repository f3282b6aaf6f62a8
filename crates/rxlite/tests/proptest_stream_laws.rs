//! Property-based tests for the stream laws.
//!
//! These verify the algebraic properties that must hold for any input
//! sequence:
//!
//! 1. `from_iterable(xs).collect()` round-trips: order preserved, no loss,
//!    no duplication.
//! 2. `just(v)` yields exactly `[v]` and latches terminal state.
//! 3. `map(f)` equals element-wise `f` over the source result.
//! 4. `filter(p)` equals the subsequence satisfying `p`; it always
//!    completes, even when nothing passes.
//! 5. `take(n)` equals the first `min(n, len)` elements.
//! 6. `flat_map(v -> [v, v])` duplicates each value in place, branches
//!    never interleave when synchronous.
//! 7. `noop` is an identity.
//! 8. `merge` delivers both sources' values yet never latches a terminal.
//! 9. Late subscription replays the full buffer in order.

use proptest::prelude::*;
use rxlite::{Observable, Observer};

// ── Strategies ────────────────────────────────────────────────────────────

fn values_strategy() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::vec(-1000i32..=1000, 0..=64)
}

fn nonempty_values_strategy() -> impl Strategy<Value = Vec<i32>> {
    proptest::collection::vec(-1000i32..=1000, 1..=64)
}

// ── Properties ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn from_iterable_round_trips(xs in values_strategy()) {
        let o = Observable::from_iterable(xs.clone());
        prop_assert_eq!(o.collect(), Ok(xs));
        prop_assert!(o.has_terminal_events());
    }

    #[test]
    fn just_yields_exactly_one(v in any::<i32>()) {
        let o = Observable::just(v);
        prop_assert_eq!(o.collect(), Ok(vec![v]));
        prop_assert!(o.has_terminal_events());
    }

    #[test]
    fn map_is_element_wise(xs in values_strategy()) {
        let mapped = Observable::from_iterable(xs.clone()).map(|v| i64::from(v) * 3 - 1);
        let expected: Vec<i64> = xs.iter().map(|&v| i64::from(v) * 3 - 1).collect();
        prop_assert_eq!(mapped.collect(), Ok(expected));
    }

    #[test]
    fn filter_is_subsequence(xs in values_strategy()) {
        let filtered = Observable::from_iterable(xs.clone()).filter(|v| v % 2 == 0);
        let expected: Vec<i32> = xs.into_iter().filter(|v| v % 2 == 0).collect();
        prop_assert_eq!(filtered.collect(), Ok(expected));
        prop_assert!(filtered.has_terminal_events());
    }

    #[test]
    fn filter_always_false_completes_empty(xs in values_strategy()) {
        let filtered = Observable::from_iterable(xs).filter(|_| false);
        prop_assert_eq!(filtered.collect(), Ok(vec![]));
        prop_assert!(filtered.has_terminal_events());
    }

    #[test]
    fn take_is_prefix(xs in values_strategy(), n in 0usize..=80) {
        let taken = Observable::from_iterable(xs.clone()).take(n);
        let expected: Vec<i32> = xs.into_iter().take(n).collect();
        prop_assert_eq!(taken.collect(), Ok(expected));
    }

    #[test]
    fn flat_map_duplicates_in_place(xs in values_strategy()) {
        let o = Observable::from_iterable(xs.clone())
            .flat_map(|v| Observable::from_iterable(vec![v, v]));
        let expected: Vec<i32> = xs.into_iter().flat_map(|v| [v, v]).collect();
        prop_assert_eq!(o.collect(), Ok(expected));
    }

    #[test]
    fn noop_is_identity(xs in values_strategy()) {
        let o = Observable::from_iterable(xs.clone()).noop();
        prop_assert_eq!(o.collect(), Ok(xs));
        prop_assert!(o.has_terminal_events());
    }

    #[test]
    fn merge_delivers_all_but_never_terminates(
        left in values_strategy(),
        right in values_strategy(),
    ) {
        let merged = Observable::from_iterable(left.clone())
            .merge(&Observable::from_iterable(right.clone()));
        let expected: Vec<i32> = left.into_iter().chain(right).collect();
        prop_assert_eq!(merged.collect(), Ok(expected));
        prop_assert!(!merged.has_terminal_events());
    }

    #[test]
    fn late_subscriber_replays_everything(xs in nonempty_values_strategy()) {
        let o = Observable::new();
        for &v in &xs {
            o.on_next(v);
        }
        prop_assert_eq!(o.collect(), Ok(xs));
        prop_assert!(!o.has_terminal_events());
    }

    #[test]
    fn map_composition_fuses(xs in values_strategy()) {
        let twice = Observable::from_iterable(xs.clone())
            .map(|v| i64::from(v) + 1)
            .map(|v| v * 2);
        let fused = Observable::from_iterable(xs)
            .map(|v| (i64::from(v) + 1) * 2);
        prop_assert_eq!(twice.collect(), fused.collect());
    }
}

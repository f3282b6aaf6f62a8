#![forbid(unsafe_code)]

//! Stream combinators.
//!
//! Every combinator is wired the same way: construct a new empty output
//! observable, subscribe a small private bridge on the source(s), and let
//! the bridge decide what to re-emit into the output. The bridges hold a
//! clone of the output handle plus whatever local state they need (`take`'s
//! counter). All delivery is synchronous re-emission on the caller's stack;
//! errors pass through every combinator unchanged.

use std::cell::Cell;

use crate::error::StreamError;
use crate::observable::Observable;
use crate::observer::Observer;

impl<T: Clone + 'static> Observable<T> {
    /// Forward every signal unchanged through a fresh observable.
    #[must_use]
    pub fn noop(&self) -> Observable<T> {
        let out = Observable::new();
        self.subscribe(Passthrough { out: out.clone() });
        out
    }

    /// Forward only values for which `predicate` returns true. Terminal
    /// signals pass through regardless, so an always-false predicate still
    /// yields a completed, empty stream.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Observable<T> {
        let out = Observable::new();
        self.subscribe(FilterBridge {
            out: out.clone(),
            predicate,
        });
        out
    }

    /// Forward `mapper(value)` for every value.
    #[must_use]
    pub fn map<V: Clone + 'static>(&self, mapper: impl Fn(T) -> V + 'static) -> Observable<V> {
        let out = Observable::new();
        self.subscribe(MapBridge {
            out: out.clone(),
            mapper,
        });
        out
    }

    /// For every value, subscribe to the inner observable `mapper(value)`
    /// and forward its values and errors into the output.
    ///
    /// Inner completion is suppressed: a finished branch does not end the
    /// output. The output completes when the *outer* source completes,
    /// whether or not branches are still live; there is no wait-for-all-
    /// branches join. An inner error propagates to the output immediately
    /// but does not cancel sibling branches.
    #[must_use]
    pub fn flat_map<V: Clone + 'static>(
        &self,
        mapper: impl Fn(T) -> Observable<V> + 'static,
    ) -> Observable<V> {
        let out = Observable::new();
        self.subscribe(FlatMapBridge {
            out: out.clone(),
            mapper,
        });
        out
    }

    /// Forward the first `count` values, then complete the output.
    ///
    /// The completion fires on the first value past the limit, so
    /// `take(0)` completes as soon as the source emits anything. Values the
    /// source keeps emitting afterwards are dropped by the output's
    /// terminal latch.
    #[must_use]
    pub fn take(&self, count: usize) -> Observable<T> {
        let out = Observable::new();
        self.subscribe(TakeBridge {
            out: out.clone(),
            limit: count,
            seen: Cell::new(0),
        });
        out
    }

    /// Interleave values from both sources in delivery order.
    ///
    /// The merged output never forwards completion from either source: it
    /// terminates only if one of the sources errors. Two completed sources
    /// still leave the merged stream open.
    #[must_use]
    pub fn merge(&self, other: &Observable<T>) -> Observable<T> {
        let out = Observable::new();
        self.subscribe(MergeBridge { out: out.clone() });
        other.subscribe(MergeBridge { out: out.clone() });
        out
    }
}

struct Passthrough<T> {
    out: Observable<T>,
}

impl<T: Clone + 'static> Observer<T> for Passthrough<T> {
    fn on_next(&self, value: T) {
        self.out.on_next(value);
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {
        self.out.on_complete();
    }
}

struct FilterBridge<T, P> {
    out: Observable<T>,
    predicate: P,
}

impl<T, P> Observer<T> for FilterBridge<T, P>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool,
{
    fn on_next(&self, value: T) {
        if (self.predicate)(&value) {
            self.out.on_next(value);
        }
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {
        self.out.on_complete();
    }
}

struct MapBridge<V, F> {
    out: Observable<V>,
    mapper: F,
}

impl<T, V, F> Observer<T> for MapBridge<V, F>
where
    V: Clone + 'static,
    F: Fn(T) -> V,
{
    fn on_next(&self, value: T) {
        self.out.on_next((self.mapper)(value));
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {
        self.out.on_complete();
    }
}

struct FlatMapBridge<V, F> {
    out: Observable<V>,
    mapper: F,
}

impl<T, V, F> Observer<T> for FlatMapBridge<V, F>
where
    V: Clone + 'static,
    F: Fn(T) -> Observable<V>,
{
    fn on_next(&self, value: T) {
        let branch = (self.mapper)(value);
        branch.subscribe(InnerBridge {
            out: self.out.clone(),
        });
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {
        self.out.on_complete();
    }
}

/// Bridge for a single flat_map branch: forwards values and errors,
/// swallows the branch's completion.
struct InnerBridge<V> {
    out: Observable<V>,
}

impl<V: Clone + 'static> Observer<V> for InnerBridge<V> {
    fn on_next(&self, value: V) {
        self.out.on_next(value);
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {}
}

struct TakeBridge<T> {
    out: Observable<T>,
    limit: usize,
    seen: Cell<usize>,
}

impl<T: Clone + 'static> Observer<T> for TakeBridge<T> {
    fn on_next(&self, value: T) {
        let seen = self.seen.get() + 1;
        self.seen.set(seen);
        if seen > self.limit {
            self.out.on_complete();
        } else {
            self.out.on_next(value);
        }
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {
        self.out.on_complete();
    }
}

/// Bridge for one side of a merge: forwards values and errors, never
/// forwards completion.
struct MergeBridge<T> {
    out: Observable<T>,
}

impl<T: Clone + 'static> Observer<T> for MergeBridge<T> {
    fn on_next(&self, value: T) {
        self.out.on_next(value);
    }

    fn on_error(&self, err: StreamError) {
        self.out.on_error(err);
    }

    fn on_complete(&self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

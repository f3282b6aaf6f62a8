#![forbid(unsafe_code)]

//! The buffering, multicasting stream core.
//!
//! # Design
//!
//! [`Observable<T>`] wraps its state in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). A producer emits through the [`Observer`] impl;
//! every mutation runs a delivery pass that pushes buffered values and any
//! terminal signal to all current subscribers, synchronously, on the
//! caller's stack.
//!
//! # Invariants
//!
//! 1. Buffered values are delivered in insertion order, value-major: each
//!    value reaches every subscriber before the next value is delivered.
//! 2. Once a terminal signal is set, `on_next` is silently dropped.
//! 3. Subscribers are notified in registration order and are never removed.
//! 4. With no subscribers, emitted values accumulate in the buffer and are
//!    replayed in full to the first subscriber.
//! 5. After a terminal delivery the buffer is retained, so a subscription
//!    arriving after the terminal re-delivers the buffered values to all
//!    current subscribers before re-delivering the terminal signal.
//!
//! # Failure modes
//!
//! - **Re-entrant emission into the same observable** from inside one of its
//!   own subscribers violates the single-writer discipline; values emitted
//!   that way can be lost when the in-flight pass clears the buffer.
//!   Downstream emission (a subscriber forwarding into a *different*
//!   observable) is the normal combinator wiring and is fully supported.
//! - **Unbounded buffering**: a producer that emits forever with no
//!   subscriber grows the buffer without limit. Backpressure is out of
//!   scope.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::error::StreamError;
use crate::event::Event;
use crate::observer::Observer;

/// Terminal latch. One slot with completion precedence: `Complete` is never
/// displaced, an error may be displaced by a later terminal call.
#[derive(Debug, Clone)]
enum Terminal {
    Complete,
    Error(StreamError),
}

/// Shared interior for [`Observable<T>`].
struct Inner<T> {
    /// Values not yet delivered in a completed drain, in emission order.
    buffer: Vec<T>,
    terminal: Option<Terminal>,
    /// Registration order, append-only. There is no unsubscribe.
    subscribers: Vec<Rc<dyn Observer<T>>>,
}

/// A multicast, buffering, terminal-latching event source.
///
/// Cloning an `Observable` creates a new handle to the **same** inner state;
/// a combinator's output handle and the handles held by its bridges all see
/// one buffer, one terminal latch, one subscriber list.
///
/// `Observable` is itself an [`Observer`], so observables chain: subscribing
/// a clone of observable B to observable A forwards A's signals into B.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("buffered", &inner.buffer.len())
            .field("terminal", &inner.terminal)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T> Default for Observable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Observable<T> {
    /// Create an empty observable: no terminal state, empty buffer, no
    /// subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                buffer: Vec::new(),
                terminal: None,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Whether a terminal signal (completion or error) has been latched.
    #[must_use]
    pub fn has_terminal_events(&self) -> bool {
        self.inner.borrow().terminal.is_some()
    }

    /// Number of registered subscribers. Useful for assertions and
    /// diagnostics; the delivery path never consults it beyond emptiness.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

impl<T: Clone + 'static> Observable<T> {
    /// Construct an observable and run `setup` against it synchronously.
    ///
    /// The observable is passed to `setup` in its observer role so the
    /// caller can emit inline. All emissions inside `setup` happen before
    /// `create` returns; with no subscriber yet they land in the buffer and
    /// replay on first subscription.
    #[must_use]
    pub fn create(setup: impl FnOnce(&Observable<T>)) -> Self {
        let observable = Self::new();
        setup(&observable);
        observable
    }

    /// A stream of exactly one value, then completion.
    #[must_use]
    pub fn just(value: T) -> Self {
        Self::create(|o| {
            o.on_next(value);
            o.on_complete();
        })
    }

    /// A stream of each value in order, then completion.
    #[must_use]
    pub fn from_iterable(values: impl IntoIterator<Item = T>) -> Self {
        Self::create(|o| {
            for value in values {
                o.on_next(value);
            }
            o.on_complete();
        })
    }

    /// Register a subscriber, then immediately run a delivery pass so it
    /// receives any buffered values and the current terminal state.
    pub fn subscribe(&self, observer: impl Observer<T> + 'static) {
        let count = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.push(Rc::new(observer));
            inner.subscribers.len()
        };
        trace!(subscribers = count, "subscribe");
        self.deliver();
    }

    /// Dispatch a materialized [`Event`] to the matching observer method.
    pub fn emit(&self, event: Event<T>) {
        match event {
            Event::Next(value) => self.on_next(value),
            Event::Error(err) => self.on_error(err),
            Event::Complete => self.on_complete(),
        }
    }

    /// Synchronously drain this observable into a vector.
    ///
    /// Subscribes an accumulating observer; because subscription triggers an
    /// immediate delivery pass, every value the producer has already emitted
    /// is collected before this returns. A delivered error signal is
    /// returned as `Err`; completion needs no special handling.
    pub fn collect(&self) -> Result<Vec<T>, StreamError> {
        let values = Rc::new(RefCell::new(Vec::new()));
        let error = Rc::new(RefCell::new(None));
        self.subscribe(CollectSink {
            values: Rc::clone(&values),
            error: Rc::clone(&error),
        });
        if let Some(err) = error.borrow_mut().take() {
            return Err(err);
        }
        let collected = values.take();
        Ok(collected)
    }

    /// The delivery pass, run after every mutation.
    ///
    /// Subscriber list, buffered values, and terminal state are snapshotted
    /// inside a borrow scope and callbacks run outside it, so a subscriber
    /// forwarding into downstream observables on this same stack cannot hit
    /// a borrow conflict.
    fn deliver(&self) {
        let (subscribers, values, terminal) = {
            let inner = self.inner.borrow();
            if inner.subscribers.is_empty() {
                return;
            }
            (
                inner.subscribers.clone(),
                inner.buffer.clone(),
                inner.terminal.clone(),
            )
        };

        for value in &values {
            for subscriber in &subscribers {
                subscriber.on_next(value.clone());
            }
        }

        match terminal {
            Some(Terminal::Complete) => {
                trace!(delivered = values.len(), "deliver: complete");
                for subscriber in &subscribers {
                    subscriber.on_complete();
                }
                // Buffer intentionally retained: completion short-circuits
                // before the clear, and later subscriptions replay it.
            }
            Some(Terminal::Error(err)) => {
                trace!(delivered = values.len(), "deliver: error");
                for subscriber in &subscribers {
                    subscriber.on_error(err.clone());
                }
            }
            None => {
                self.inner.borrow_mut().buffer.clear();
            }
        }
    }
}

impl<T: Clone + 'static> Observer<T> for Observable<T> {
    fn on_next(&self, value: T) {
        if self.has_terminal_events() {
            trace!("on_next after terminal: dropped");
            return;
        }
        self.inner.borrow_mut().buffer.push(value);
        self.deliver();
    }

    fn on_error(&self, err: StreamError) {
        {
            let mut inner = self.inner.borrow_mut();
            // Completion wins: once latched, a late error cannot displace it.
            // A repeated error may; the last error delivered wins.
            if matches!(inner.terminal, Some(Terminal::Complete)) {
                trace!(%err, "on_error after completion: dropped");
                return;
            }
            trace!(%err, "terminal: error");
            inner.terminal = Some(Terminal::Error(err));
        }
        self.deliver();
    }

    fn on_complete(&self) {
        trace!("terminal: complete");
        self.inner.borrow_mut().terminal = Some(Terminal::Complete);
        self.deliver();
    }
}

/// Accumulator behind [`Observable::collect`].
struct CollectSink<T> {
    values: Rc<RefCell<Vec<T>>>,
    error: Rc<RefCell<Option<StreamError>>>,
}

impl<T> Observer<T> for CollectSink<T> {
    fn on_next(&self, value: T) {
        self.values.borrow_mut().push(value);
    }

    fn on_error(&self, err: StreamError) {
        *self.error.borrow_mut() = Some(err);
    }

    fn on_complete(&self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

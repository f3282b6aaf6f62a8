#![forbid(unsafe_code)]

//! The consumer capability interface.
//!
//! An [`Observer`] receives the three stream signals. Methods take `&self`:
//! observers are stored as shared `Rc<dyn Observer<T>>` handles and may be
//! invoked from within an upstream emission call, so implementors keep any
//! local state behind `Cell`/`RefCell`. This is also what lets
//! [`Observable`](crate::Observable) implement `Observer` for itself, which
//! is how combinator chains are wired.

use crate::error::StreamError;

/// Capability to receive stream notifications.
///
/// # Contract
///
/// 1. `on_next` may be called any number of times.
/// 2. After the first `on_error` or `on_complete` delivered by a conforming
///    source, no further `on_next` follows.
/// 3. All calls happen synchronously on the caller's stack; there is no
///    scheduler and no cross-thread delivery.
pub trait Observer<T> {
    /// Receive a value.
    fn on_next(&self, value: T);

    /// Receive the terminal error signal.
    fn on_error(&self, err: StreamError);

    /// Receive the terminal completion signal.
    fn on_complete(&self);
}

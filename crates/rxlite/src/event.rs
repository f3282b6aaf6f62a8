#![forbid(unsafe_code)]

//! Tagged stream notifications.
//!
//! [`Event<T>`] is the materialized form of the three observer signals. The
//! core dispatches the three signals as separate method calls (see
//! [`Observer`](crate::Observer)); this type exists for call sites that want
//! to carry a notification as a value — recording observers in tests, and
//! [`Observable::emit`](crate::Observable::emit).

use crate::error::StreamError;

/// A single stream notification.
///
/// Once an `Error` or `Complete` has been observed, no further `Next` may
/// follow on the same stream (the terminal invariant).
#[derive(Debug, Clone, PartialEq)]
pub enum Event<T> {
    /// A value.
    Next(T),
    /// Terminal failure signal.
    Error(StreamError),
    /// Terminal completion signal.
    Complete,
}

impl<T> Event<T> {
    /// Whether this event ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Event::Next(_))
    }
}

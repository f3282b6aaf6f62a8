#![forbid(unsafe_code)]

//! Synchronous, single-threaded push streams.
//!
//! # Role
//! `rxlite` is a minimal reactive-stream primitive: a single-producer,
//! multi-subscriber value stream terminated by a completion or error signal,
//! plus a small combinator set built on top of it. Everything runs inline on
//! the caller's stack — there is no scheduler, no thread hand-off, no
//! backpressure, and no unsubscription.
//!
//! # Primary pieces
//! - **[`Observable`]**: the buffering, multicasting, terminal-latching
//!   stream core. Values emitted before anyone subscribes are buffered and
//!   replayed to the first subscriber in order.
//! - **[`Observer`]**: the consumer capability (`on_next` / `on_error` /
//!   `on_complete`). `Observable` implements it too, which is how chains
//!   are wired.
//! - **Combinators**: `noop`, `filter`, `map`, `flat_map`, `take`, `merge` —
//!   each subscribes a bridge on its source and re-emits into a fresh
//!   output observable.
//! - **[`Observable::collect`]**: synchronously drains a stream into a
//!   `Vec`, surfacing a delivered error as `Err`.
//!
//! # Example
//!
//! ```
//! use rxlite::Observable;
//!
//! let doubled = Observable::from_iterable(vec![1, 2, 3])
//!     .map(|v| v * 2)
//!     .filter(|v| *v > 2);
//! assert_eq!(doubled.collect(), Ok(vec![4, 6]));
//! assert!(doubled.has_terminal_events());
//! ```

pub mod error;
pub mod event;
pub mod observable;
pub mod observer;
pub mod ops;

pub use error::StreamError;
pub use event::Event;
pub use observable::Observable;
pub use observer::Observer;

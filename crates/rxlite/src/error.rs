#![forbid(unsafe_code)]

//! The error payload carried by error events.
//!
//! The stream core treats errors as opaque: whatever the producer passes in
//! is forwarded downstream unchanged through every combinator and finally
//! surfaced by [`Observable::collect`](crate::Observable::collect). There is
//! no taxonomy beyond the message because the core never inspects it.

/// Opaque error payload for a stream's error signal.
///
/// Cloneable because every subscriber receives its own copy, and the
/// terminal state replays the error to late subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    message: String,
}

impl StreamError {
    /// Create an error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for StreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stream error: {}", self.message)
    }
}

impl std::error::Error for StreamError {}

impl From<&str> for StreamError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for StreamError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = StreamError::new("boom");
        assert_eq!(err.to_string(), "stream error: boom");
        assert_eq!(err.message(), "boom");
    }

    #[test]
    fn from_str_and_string() {
        let a: StreamError = "bad".into();
        let b: StreamError = String::from("bad").into();
        assert_eq!(a, b);
    }
}

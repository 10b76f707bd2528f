//! Validation error type.
//!
//! A single error kind carrying one fully rendered message. The message text
//! is the whole failure contract: every call site builds its final wording,
//! and each enclosing schema level appends its own member context on the way
//! out.

use thiserror::Error;

/// Result type for schema validation.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Structural validation failure.
///
/// Raised on the first violation found; validation stops immediately and the
/// error unwinds through every enclosing schema level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SchemaError {
    message: String,
}

impl SchemaError {
    /// Creates an error with its final rendered message.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the rendered message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Appends sequence member context, once per nesting level.
    pub(crate) fn for_position(mut self, position: usize) -> Self {
        self.message = format!("{}, for member at position {}", self.message, position);
        self
    }

    /// Appends mapping member context, once per nesting level.
    pub(crate) fn for_key(mut self, key: &str) -> Self {
        self.message = format!("{}, for member '{}'", self.message, key);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_the_display() {
        let err = SchemaError::new("Expected length 3, found length 2");
        assert_eq!(err.message(), "Expected length 3, found length 2");
        assert_eq!(format!("{}", err), "Expected length 3, found length 2");
    }

    #[test]
    fn test_position_suffix_chains_per_level() {
        let err = SchemaError::new("Expected list, found int(1)")
            .for_position(0)
            .for_position(2);
        assert_eq!(
            err.message(),
            "Expected list, found int(1), for member at position 0, for member at position 2"
        );
    }

    #[test]
    fn test_key_suffix() {
        let err = SchemaError::new("Expected length 3, found length 2").for_key("scores");
        assert_eq!(
            err.message(),
            "Expected length 3, found length 2, for member 'scores'"
        );
    }
}

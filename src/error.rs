//! Error types for byob.
//!
//! Errors are strongly typed using thiserror. Only code-level misuse and
//! explicit encode/decode requests produce errors; data arriving from
//! upstream (stored values, embedded blocks, mutation payloads) degrades
//! softly instead.

use thiserror::Error;

/// Precondition violations raised by builders and the session stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cannot query blank field")]
    BlankField,

    #[error("cannot call {operator} before opening a clause with field()")]
    ClauseNotOpen {
        operator: &'static str,
    },

    #[error("session stack cannot be frameless")]
    Frameless,

    #[error("session stack is not initialized")]
    EmptyStack,
}

/// JSON encode/decode failures.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode {what}: {message}")]
    Encode {
        what: &'static str,
        message: String,
    },

    #[error("failed to decode {what}: {message}")]
    Decode {
        what: &'static str,
        message: String,
    },
}

impl CodecError {
    pub(crate) fn encode(what: &'static str, err: &serde_json::Error) -> Self {
        Self::Encode {
            what,
            message: err.to_string(),
        }
    }

    pub(crate) fn decode(what: &'static str, err: &serde_json::Error) -> Self {
        Self::Decode {
            what,
            message: err.to_string(),
        }
    }
}

/// Top-level error type for byob.
#[derive(Debug, Error)]
pub enum ByobError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ByobError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a codec error.
    #[must_use]
    pub const fn is_codec(&self) -> bool {
        matches!(self, Self::Codec(_))
    }
}

/// Result type alias for byob operations.
pub type ByobResult<T> = Result<T, ByobError>;

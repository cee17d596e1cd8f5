//! Attribute processing errors.
//!
//! None of these are fatal to a parse. Handlers return them so the caller
//! can inspect what went wrong, and also report them through `tracing`
//! at the point of failure. The parse continues with the next attribute.

use thiserror::Error;

/// Compact error classification.
///
/// Mirrors [`AttributeError`] without the owned text, for callers that
/// only need to count or filter failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    /// No handler is registered for the attribute name
    UnknownAttribute = 0,
    /// Value text does not convert to the target type
    UnparseableValue,
    /// Value text is not one of the registered tokens
    UnknownToken,
    /// Token registered twice on the same table
    DuplicateToken,
    /// Raw value bytes are not valid UTF-8
    InvalidUtf8,
}

impl ErrorCode {
    /// Get a human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnknownAttribute => "unknown attribute",
            Self::UnparseableValue => "unparseable value",
            Self::UnknownToken => "unknown token",
            Self::DuplicateToken => "duplicate token",
            Self::InvalidUtf8 => "invalid utf-8",
        }
    }
}

/// Error reported by an attribute handler.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    /// Attribute routed to the unknown handler
    #[error("unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    /// Typed conversion failed
    #[error("failed to parse '{text}' as {target}: {reason}")]
    UnparseableValue {
        text: String,
        target: &'static str,
        reason: String,
    },

    /// Token lookup missed
    #[error("unknown enum member '{token}'")]
    UnknownToken { token: String },

    /// Token registration conflict
    #[error("token '{token}' is already registered")]
    DuplicateToken { token: String },

    /// Value bytes could not be decoded
    #[error("value of attribute '{name}' is not valid UTF-8")]
    InvalidUtf8 { name: String },
}

impl AttributeError {
    /// Classification of this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownAttribute { .. } => ErrorCode::UnknownAttribute,
            Self::UnparseableValue { .. } => ErrorCode::UnparseableValue,
            Self::UnknownToken { .. } => ErrorCode::UnknownToken,
            Self::DuplicateToken { .. } => ErrorCode::DuplicateToken,
            Self::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
        }
    }
}

/// Result type alias for attribute handlers.
pub type Result<T> = std::result::Result<T, AttributeError>;

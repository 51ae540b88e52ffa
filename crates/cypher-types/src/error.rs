//! Errors raised by the value model

use thiserror::Error;

/// Errors raised while accessing or assembling values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// A value was accessed as the wrong variant
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// Path elements do not alternate node/relationship or are disconnected
    #[error("invalid path: {message}")]
    InvalidPath { message: String },
}

impl ValueError {
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::InvalidPath {
            message: message.into(),
        }
    }
}

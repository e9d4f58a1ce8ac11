//! Structural errors raised by the field-state store
//!
//! Both variants are contract violations by the calling binder and are
//! expected to end the current binding attempt. Validation problems are not
//! errors here; they are recorded as [`FieldError`](crate::FieldError) data.

use crate::state::ValidationState;
use thiserror::Error;

/// Result type for store operations.
pub type FieldStateResult<T> = std::result::Result<T, FieldStateError>;

/// Errors returned by store mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldStateError {
    /// The key has more segments than the store's insert depth allows.
    #[error("key '{key}' exceeds the maximum field-state depth of {max_depth}")]
    PathTooDeep {
        /// The rejected key.
        key: String,
        /// The configured bound.
        max_depth: usize,
    },

    /// An invalid field cannot be marked valid or skipped.
    #[error("field '{key}' is invalid and cannot be marked {target}")]
    InvalidStateTransition {
        /// Key of the invalid field.
        key: String,
        /// The state the caller tried to set.
        target: ValidationState,
    },
}

impl FieldStateError {
    /// Create a `PathTooDeep` error.
    pub fn path_too_deep(key: impl Into<String>, max_depth: usize) -> Self {
        FieldStateError::PathTooDeep {
            key: key.into(),
            max_depth,
        }
    }

    /// Create an `InvalidStateTransition` error.
    pub fn invalid_transition(key: impl Into<String>, target: ValidationState) -> Self {
        FieldStateError::InvalidStateTransition {
            key: key.into(),
            target,
        }
    }

    /// `true` for `PathTooDeep`.
    pub fn is_path_too_deep(&self) -> bool {
        matches!(self, FieldStateError::PathTooDeep { .. })
    }

    /// `true` for `InvalidStateTransition`.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self, FieldStateError::InvalidStateTransition { .. })
    }

    /// Key the error is about.
    pub fn key(&self) -> &str {
        match self {
            FieldStateError::PathTooDeep { key, .. }
            | FieldStateError::InvalidStateTransition { key, .. } => key,
        }
    }
}

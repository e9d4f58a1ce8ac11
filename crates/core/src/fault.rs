//! Errors recorded against fields
//!
//! These are data, not failures: binders record them against a path and
//! the caller renders them after binding completes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message of the sentinel recorded once the error cap is reached.
pub const TOO_MANY_ERRORS_MESSAGE: &str =
    "The maximum number of allowed field errors has been reached.";

/// Classification of a fault raised while binding a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// The input could not be parsed into the target type.
    Format,
    /// The input parsed but does not fit the target type.
    Overflow,
    /// A body formatter rejected the input with a client-safe message.
    InputFormatter,
    /// A value provider rejected the input with a client-safe message.
    ValueProvider,
    /// Anything else.
    Other,
    /// The error-cap sentinel. Only the store records faults of this kind;
    /// a caller-supplied one is stored as [`FaultKind::Other`].
    TooManyErrors,
}

impl FaultKind {
    /// Conversion faults are re-rendered from field metadata, not stored verbatim.
    pub fn is_conversion(self) -> bool {
        matches!(self, FaultKind::Format | FaultKind::Overflow)
    }

    /// Faults whose message may be shown to the client as-is.
    pub fn is_client_safe(self) -> bool {
        matches!(self, FaultKind::InputFormatter | FaultKind::ValueProvider)
    }
}

/// A fault object: kind, message, and optional stack-style detail.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct Fault {
    /// Fault classification.
    pub kind: FaultKind,
    /// Human-readable message. May be empty.
    pub message: String,
    /// Extra diagnostic detail (for example a captured backtrace).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Fault {
    /// Create a fault with no detail.
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    /// Attach diagnostic detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// A parse failure.
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Format, message)
    }

    /// An out-of-range value.
    pub fn overflow(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Overflow, message)
    }

    /// A client-safe rejection from a body formatter.
    pub fn input_formatter(message: impl Into<String>) -> Self {
        Self::new(FaultKind::InputFormatter, message)
    }

    /// A client-safe rejection from a value provider.
    pub fn value_provider(message: impl Into<String>) -> Self {
        Self::new(FaultKind::ValueProvider, message)
    }

    /// Any other fault.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(FaultKind::Other, message)
    }

    /// The sentinel recorded once the error cap is reached.
    pub fn too_many_errors() -> Self {
        Self::new(FaultKind::TooManyErrors, TOO_MANY_ERRORS_MESSAGE)
    }

    /// `true` for the error-cap sentinel. Decided by kind, not message text.
    pub fn is_too_many_errors(&self) -> bool {
        self.kind == FaultKind::TooManyErrors
    }

    /// Demote a sentinel-kind fault to [`FaultKind::Other`].
    ///
    /// Applied to every fault a caller hands the store, so only the store's
    /// own sentinel keeps the kind.
    pub fn into_recorded(mut self) -> Self {
        if self.kind == FaultKind::TooManyErrors {
            self.kind = FaultKind::Other;
        }
        self
    }
}

/// One problem recorded against a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    /// Free-text message.
    Message(String),
    /// An associated fault object.
    Fault(Fault),
}

impl FieldError {
    /// Human-readable text; for faults, the fault message.
    pub fn message(&self) -> &str {
        match self {
            FieldError::Message(message) => message,
            FieldError::Fault(fault) => &fault.message,
        }
    }

    /// The fault, if this error carries one.
    pub fn fault(&self) -> Option<&Fault> {
        match self {
            FieldError::Message(_) => None,
            FieldError::Fault(fault) => Some(fault),
        }
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::Message(message)
    }
}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::Message(message.to_string())
    }
}

impl From<Fault> for FieldError {
    fn from(fault: Fault) -> Self {
        FieldError::Fault(fault)
    }
}

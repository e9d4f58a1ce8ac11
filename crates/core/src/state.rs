//! Validation state of a field

use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation outcome recorded against a single field.
///
/// `Skipped` behaves like `Valid` when states are aggregated over a
/// subtree, but stays visible as `Skipped` on the entry itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationState {
    /// No validator has looked at the field yet.
    #[default]
    Unvalidated,
    /// At least one error was recorded.
    Invalid,
    /// A validator accepted the field.
    Valid,
    /// Validation was deliberately not performed.
    Skipped,
}

impl ValidationState {
    /// `true` for `Valid` and `Skipped`.
    pub fn is_acceptable(self) -> bool {
        matches!(self, ValidationState::Valid | ValidationState::Skipped)
    }

    /// Lowercase name, as used in messages and serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationState::Unvalidated => "unvalidated",
            ValidationState::Invalid => "invalid",
            ValidationState::Valid => "valid",
            ValidationState::Skipped => "skipped",
        }
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

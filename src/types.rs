//! Public types for fieldstate.
//!
//! This module re-exports types from the member crates with one flat
//! interface.

// ============================================================================
// Field state
// ============================================================================

// The store and its entries
pub use fieldstate_store::{FieldEntry, FieldStateStore};

// Enumeration
pub use fieldstate_store::{Iter, PrefixIter};

// Validation outcome per field and per subtree
pub use fieldstate_core::ValidationState;

// ============================================================================
// Errors and faults
// ============================================================================

// Structural errors returned by store mutations
pub use fieldstate_core::{FieldStateError, FieldStateResult};

// Problems recorded against a field
pub use fieldstate_core::{Fault, FaultKind, FieldError, TOO_MANY_ERRORS_MESSAGE};

// Rendering of conversion faults
pub use fieldstate_store::{BindingMessageProvider, DefaultBindingMessages, FieldMetadata};

// ============================================================================
// Configuration and values
// ============================================================================

pub use fieldstate_core::{StoreOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERRORS};
pub use fieldstate_core::RawValue;

// Key grammar
pub use fieldstate_core::{starts_with_prefix, tokenize, Delimiter, PathSegment};

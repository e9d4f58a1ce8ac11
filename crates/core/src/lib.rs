//! Core types for fieldstate
//!
//! This crate defines the vocabulary shared by the store and its callers:
//! - `path`: field key grammar (`order.items[3].sku`) and segment ordering
//! - `ValidationState`: per-field validation outcome
//! - `Fault` / `FieldError`: problems recorded against a field
//! - `FieldStateError`: structural errors raised by store mutations
//! - `StoreOptions`: error cap and depth bounds

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod fault;
pub mod options;
pub mod path;
pub mod state;

pub use error::{FieldStateError, FieldStateResult};
pub use fault::{Fault, FaultKind, FieldError, TOO_MANY_ERRORS_MESSAGE};
pub use options::{StoreOptions, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERRORS};
pub use path::{compare_segments, starts_with_prefix, tokenize, Delimiter, PathSegment};
pub use state::ValidationState;

/// Raw bound value of a field.
pub use serde_json::Value as RawValue;

//! fieldstate: per-request field binding and validation state
//!
//! A [`FieldStateStore`] records, for each dotted/bracketed field key
//! (`order.items[3].sku`), the raw bound value, its string form, any
//! errors, and a validation state. Keys are matched case-insensitively and
//! stored as a tree, so a caller can ask for one field, every field under a
//! prefix, or the combined validity of a whole subtree.
//!
//! ```
//! use fieldstate::{FieldStateStore, ValidationState};
//!
//! let mut store = FieldStateStore::new();
//! store.set_value("items[0].name", "widget", "widget").unwrap();
//! store.mark_valid("items[0].name").unwrap();
//! store.add_error("items[1].name", "required").unwrap();
//!
//! assert_eq!(store.aggregate_validity("items[0]"), ValidationState::Valid);
//! assert_eq!(store.aggregate_validity("items"), ValidationState::Invalid);
//! assert!(!store.is_valid());
//! ```

mod types;

pub use types::*;

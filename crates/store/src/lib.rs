//! Field-state tree for fieldstate
//!
//! This crate holds the mutable side of the system:
//! - `FieldEntry`: one node of the tree, addressed by a path segment
//! - `FieldStateStore`: recording, lookup, aggregation, merge, removal
//! - `PrefixIter`: iterative pre-order enumeration under a prefix
//! - `BindingMessageProvider`: caller-owned renderer for conversion faults
//!
//! # Logging
//!
//! Events are emitted under the `fieldstate::store` target. The sentinel
//! is logged at `warn`; rejected keys, rejected transitions and merges at
//! `debug`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod enumerator;
pub mod messages;
pub mod node;
pub mod store;

pub use enumerator::{Iter, PrefixIter};
pub use messages::{BindingMessageProvider, DefaultBindingMessages, FieldMetadata};
pub use node::FieldEntry;
pub use store::FieldStateStore;

//! Store configuration
//!
//! [`StoreOptions`] carries the three bounds of a field-state store. It can
//! be built in code or deserialized from a config file:
//!
//! ```toml
//! max_errors = 50
//! max_insert_depth = 16
//! ```

use serde::{Deserialize, Serialize};

/// Default cap on recorded errors.
pub const DEFAULT_MAX_ERRORS: usize = 200;

/// Default bound for both insert depth and aggregation depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Bounds applied by a field-state store.
///
/// ```
/// use fieldstate_core::StoreOptions;
///
/// let opts = StoreOptions::new().max_errors(10).max_insert_depth(None);
/// assert_eq!(opts.max_errors, 10);
/// assert_eq!(opts.max_aggregation_depth, Some(32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Errors recorded through the store before the sentinel replaces them.
    pub max_errors: usize,
    /// Most segments a key may have when it is inserted. `None` disables the check.
    pub max_insert_depth: Option<usize>,
    /// Depth below which aggregation stops looking. `None` disables the cutoff.
    pub max_aggregation_depth: Option<usize>,
}

impl StoreOptions {
    /// Options with default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error cap.
    pub fn max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Set the insert depth bound.
    pub fn max_insert_depth(mut self, depth: Option<usize>) -> Self {
        self.max_insert_depth = depth;
        self
    }

    /// Set the aggregation depth bound.
    pub fn max_aggregation_depth(mut self, depth: Option<usize>) -> Self {
        self.max_aggregation_depth = depth;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
            max_insert_depth: Some(DEFAULT_MAX_DEPTH),
            max_aggregation_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

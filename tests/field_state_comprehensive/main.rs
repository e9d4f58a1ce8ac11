//! Field State Comprehensive Test Suite
//!
//! End-to-end checks of the public `fieldstate` surface, driven the way a
//! request binder and validator would drive it.
//!
//! ## Test Tiers
//!
//! - **Tier 1**: Key grammar and tree shape
//! - **Tier 2**: Binding and validation scenarios
//! - **Tier 3**: Error cap and fault rendering
//! - **Tier 4**: Bounds and configuration
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test field_state_comprehensive
//! ```

// Test modules
mod test_utils;



// Tier 3: Error Cap and Faults
mod tier3_error_cap;
mod tier3_fault_rendering;

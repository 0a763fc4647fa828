//! colstats - column statistics for cost-based query optimization
//!
//! This is the root crate that re-exports all components.

pub use colstats_histogram as histogram;
pub use colstats_types as types;

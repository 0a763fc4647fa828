//! Constants and tunables for cardinality estimation

use serde::{Deserialize, Serialize};

/// Tolerance for frequency and NDV comparisons
pub const EPSILON: f64 = 1e-7;

/// Selectivity assumed when a predicate cannot be estimated from buckets
pub const DEFAULT_SELECTIVITY: f64 = 0.4;

/// Scale factor matching [`DEFAULT_SELECTIVITY`]
pub const DEFAULT_SCALE_FACTOR: f64 = 1.0 / DEFAULT_SELECTIVITY;

/// Scale factor that leaves a row count unchanged
pub const NEUTRAL_SCALE_FACTOR: f64 = 1.0;

/// Smallest distinct count a non-empty bucket may be scaled down to
pub const MIN_DISTINCT: f64 = 1.0;

/// Smallest row count reported for a non-empty relation
pub const MIN_ROWS: f64 = 1.0;

/// Number of draws used by skew estimation
pub const DEFAULT_SKEW_SAMPLE_SIZE: usize = 1000;

/// Width in bytes recorded for a column when none is known
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.0;

/// Distinct values assumed for a boolean column without statistics
/// (true, false and null)
pub const DEFAULT_BOOL_DISTINCT: f64 = 3.0;

/// An MCV list covering more than this fraction of rows is preferred over
/// the plain histogram for non-orderable types
pub const MCV_SELECTION_THRESHOLD: f64 = 0.5;

/// Number of buckets built by ANALYZE when not configured
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 100;

/// Tunables for statistics derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Number of draws used by skew estimation
    pub skew_sample_size: usize,

    /// Fixed seed for skew estimation (None = seeded from entropy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skew_seed: Option<u64>,

    /// Maximum number of buckets built from raw values
    pub histogram_buckets: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            skew_sample_size: DEFAULT_SKEW_SAMPLE_SIZE,
            skew_seed: None,
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

impl StatsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed seed so skew estimates are reproducible
    pub fn with_skew_seed(mut self, seed: u64) -> Self {
        self.skew_seed = Some(seed);
        self
    }

    pub fn with_skew_sample_size(mut self, sample_size: usize) -> Self {
        self.skew_sample_size = sample_size.max(1);
        self
    }

    pub fn with_histogram_buckets(mut self, buckets: usize) -> Self {
        self.histogram_buckets = buckets.max(1);
        self
    }
}

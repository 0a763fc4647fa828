// ============================================================================
// Errors
// ============================================================================

use thiserror::Error;

/// Failures at the boundaries of the statistics layer
///
/// Histogram transforms themselves never fail; these errors come from
/// building histograms out of raw values and from loading persisted
/// statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid bucket: {0}")]
    InvalidBucket(String),

    #[error("invalid histogram: {0}")]
    InvalidHistogram(String),

    #[error("values of type {left} and {right} cannot be compared")]
    IncomparableValues { left: String, right: String },

    #[error("statistics serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("statistics I/O error: {0}")]
    Io(#[from] std::io::Error),
}

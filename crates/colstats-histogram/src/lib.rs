//! Column histograms for cardinality estimation
//!
//! This crate provides the per-column value distribution model used by a
//! cost-based optimizer and the rules that recompute it:
//! - Points and buckets with closed/open bounds
//! - Histograms with null and remainder statistics
//! - Filter, join, anti-join, union and group-by transforms
//! - Normalization, NDV capping and skew estimation
//! - Merging most-common-values lists into histograms
//! - Building histograms from raw values and persisting them
//!
//! Transforms never fail. An input whose statistics are unknown produces a
//! result marked as not well-defined together with a conservative scale
//! factor, so callers always get a usable estimate.

pub mod bucket;
pub mod builder;
pub mod config;
pub mod error;
pub mod histogram;
pub mod mcv;
pub mod persistence;
pub mod point;
pub mod predicate;

pub use bucket::{Bucket, BucketIntersection, BucketMerge};
pub use builder::{HistogramBuilder, SampleSize};
pub use config::StatsConfig;
pub use error::StatsError;
pub use histogram::Histogram;
pub use mcv::merge_mcv_histogram;
pub use persistence::{BucketRecord, DerivedColumnStats};
pub use point::Point;
pub use predicate::StatsCmpType;

pub use colstats_types::{DataType, SqlValue, TypeCapabilities};

//! Column histograms
//!
//! A [`Histogram`] describes one column's value distribution as an ordered
//! list of non-overlapping [`Bucket`]s plus three numbers the buckets do not
//! capture: the null fraction, and the distinct count and frequency of the
//! "remainder" (values known to exist but not placed in any bucket).
//!
//! Transforms live in submodules, one per relational operator, and all
//! return new histograms. Only [`Histogram::normalize`],
//! [`Histogram::cap_ndv`] and skew estimation modify a histogram in place.

mod anti_join;
mod filter;
mod group_by;
mod join;
mod skew;
mod union;

use std::fmt;

use colstats_types::{DataType, TypeCapabilities};

use crate::{
    bucket::Bucket,
    config::{DEFAULT_BOOL_DISTINCT, EPSILON, MIN_DISTINCT},
};

/// Value distribution of a single column
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    buckets: Vec<Bucket>,
    is_well_defined: bool,
    null_freq: f64,
    distinct_remaining: f64,
    freq_remaining: f64,
    ndv_was_capped: bool,
    skew: Option<f64>,
    stats_missing: bool,
    capabilities: TypeCapabilities,
}

impl Histogram {
    /// Well-defined histogram over the given buckets with no nulls or remainder
    pub fn new(buckets: Vec<Bucket>) -> Self {
        Self::with_stats(buckets, true, 0.0, 0.0, 0.0)
    }

    /// Histogram with explicit null and remainder statistics
    ///
    /// # Arguments
    /// * `buckets` - Sorted, non-overlapping buckets
    /// * `is_well_defined` - False when the statistics are defaults rather than measured
    /// * `null_freq` - Fraction of rows that are NULL
    /// * `distinct_remaining` - Distinct values not covered by any bucket
    /// * `freq_remaining` - Fraction of rows holding those values
    pub fn with_stats(
        buckets: Vec<Bucket>,
        is_well_defined: bool,
        null_freq: f64,
        distinct_remaining: f64,
        freq_remaining: f64,
    ) -> Self {
        let histogram =
            Self::from_parts(buckets, is_well_defined, null_freq, distinct_remaining, freq_remaining);
        debug_assert!(histogram.is_valid(), "invalid histogram:\n{}", histogram);
        histogram
    }

    /// Assemble a histogram without checking invariants
    pub(crate) fn from_parts(
        buckets: Vec<Bucket>,
        is_well_defined: bool,
        null_freq: f64,
        distinct_remaining: f64,
        freq_remaining: f64,
    ) -> Self {
        let capabilities = buckets
            .first()
            .map(|b| TypeCapabilities::of_value(b.lower().value()))
            .unwrap_or_default();
        Histogram {
            buckets,
            is_well_defined,
            null_freq,
            distinct_remaining,
            freq_remaining,
            ndv_was_capped: false,
            skew: None,
            stats_missing: false,
            capabilities,
        }
    }

    /// Well-defined histogram describing no rows
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Histogram whose statistics are unknown
    pub fn undefined() -> Self {
        Self::with_stats(Vec::new(), false, 0.0, 0.0, 0.0)
    }

    /// Histogram used when a column has no collected statistics
    ///
    /// A boolean column of a non-empty relation can still be described: at
    /// most three distinct values covering every row.
    pub fn default_for_type(data_type: &DataType, is_empty_relation: bool) -> Self {
        let mut histogram = if *data_type == DataType::Boolean && !is_empty_relation {
            Self::with_stats(Vec::new(), true, 0.0, DEFAULT_BOOL_DISTINCT, 1.0)
        } else {
            Self::undefined()
        };
        histogram.stats_missing = true;
        histogram.capabilities = data_type.capabilities();
        histogram
    }

    /// Override the inferred type capabilities
    pub fn with_capabilities(mut self, capabilities: TypeCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// New histogram sharing this one's type capabilities
    pub(crate) fn derive(
        &self,
        buckets: Vec<Bucket>,
        null_freq: f64,
        distinct_remaining: f64,
        freq_remaining: f64,
    ) -> Histogram {
        Histogram {
            buckets,
            is_well_defined: true,
            null_freq,
            distinct_remaining,
            freq_remaining,
            ndv_was_capped: false,
            skew: None,
            stats_missing: false,
            capabilities: self.capabilities,
        }
    }

    /// Not-well-defined result of a transform over this histogram
    pub(crate) fn derive_undefined(&self) -> Histogram {
        let mut histogram = self.derive(Vec::new(), 0.0, 0.0, 0.0);
        histogram.is_well_defined = false;
        histogram
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_well_defined(&self) -> bool {
        self.is_well_defined
    }

    pub fn null_freq(&self) -> f64 {
        self.null_freq
    }

    pub fn distinct_remaining(&self) -> f64 {
        self.distinct_remaining
    }

    pub fn freq_remaining(&self) -> f64 {
        self.freq_remaining
    }

    pub fn is_ndv_capped(&self) -> bool {
        self.ndv_was_capped
    }

    /// Cached skew, if it has been estimated
    pub fn skew(&self) -> Option<f64> {
        self.skew
    }

    pub fn stats_missing(&self) -> bool {
        self.stats_missing
    }

    pub fn capabilities(&self) -> TypeCapabilities {
        self.capabilities
    }

    pub fn has_nulls(&self) -> bool {
        self.null_freq > EPSILON
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Sum of bucket frequencies
    pub fn frequency_buckets(&self) -> f64 {
        self.buckets.iter().map(Bucket::frequency).sum()
    }

    /// Fraction of rows with a non-null value
    pub fn frequency_non_null(&self) -> f64 {
        self.frequency_buckets() + self.freq_remaining
    }

    /// Total frequency described by the histogram
    pub fn frequency(&self) -> f64 {
        let mut frequency = self.frequency_non_null();
        if self.has_nulls() {
            frequency += self.null_freq;
        }
        frequency
    }

    /// Distinct values in buckets and remainder
    pub fn num_distinct_non_null(&self) -> f64 {
        self.buckets.iter().map(Bucket::distinct).sum::<f64>() + self.distinct_remaining
    }

    /// Distinct values, counting NULL as one value when present
    pub fn num_distinct(&self) -> f64 {
        let null_distinct = if self.has_nulls() { 1.0 } else { 0.0 };
        self.num_distinct_non_null() + null_distinct
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty() && !self.has_nulls() && self.distinct_remaining < EPSILON
    }

    /// No row mass at all, whatever the distinct counts say
    pub fn is_trivially_empty(&self) -> bool {
        self.buckets.is_empty() && self.frequency() <= EPSILON
    }

    pub fn is_normalized(&self) -> bool {
        (self.frequency() - 1.0).abs() < EPSILON
    }

    pub fn contains_only_singletons(&self) -> bool {
        self.buckets.iter().all(Bucket::is_singleton)
    }

    /// Check the structural invariants
    ///
    /// Frequency must not exceed one, remainder frequency needs remainder
    /// distinct values, and buckets of orderable types must be sorted and
    /// disjoint.
    pub fn is_valid(&self) -> bool {
        if self.frequency() > 1.0 + EPSILON {
            return false;
        }
        if self.distinct_remaining < EPSILON && self.freq_remaining > EPSILON {
            return false;
        }
        if self.buckets.iter().any(|b| b.frequency() < 0.0 || b.distinct() < 0.0) {
            return false;
        }
        if self.capabilities.is_orderable {
            return self.buckets.windows(2).all(|pair| pair[0].is_before(&pair[1]));
        }
        true
    }

    // ========================================================================
    // In-place adjustments
    // ========================================================================

    /// Scale frequencies up so they sum to one
    ///
    /// Returns the factor applied, which is the selectivity reciprocal of the
    /// transform that produced this histogram. A histogram without frequency
    /// is left untouched and reports `f64::INFINITY`.
    pub fn normalize(&mut self) -> f64 {
        let total = self.frequency();
        if total <= EPSILON {
            return f64::INFINITY;
        }
        let scale = (1.0 / total).max(1.0);

        for bucket in &mut self.buckets {
            let frequency = bucket.frequency() * scale;
            bucket.set_frequency(frequency);
        }
        self.null_freq *= scale;
        self.freq_remaining = if self.distinct_remaining < EPSILON {
            0.0
        } else {
            (self.freq_remaining * scale).min(1.0)
        };
        scale
    }

    /// Scale distinct counts down so they do not exceed `rows`
    ///
    /// Buckets keep at least one distinct value unless there are more buckets
    /// than rows. Buckets that would fall below that floor are pinned to it
    /// and the rest of the budget is shared proportionally among the others.
    pub fn cap_ndv(&mut self, rows: f64) {
        if self.num_distinct() <= rows + EPSILON {
            return;
        }
        let null_distinct = if self.has_nulls() { 1.0 } else { 0.0 };
        let budget = (rows - null_distinct).max(0.0);
        let floor = if self.buckets.is_empty() {
            0.0
        } else {
            MIN_DISTINCT.min(budget / self.buckets.len() as f64)
        };

        let mut pinned = vec![false; self.buckets.len()];
        let scale = loop {
            let mut pinned_total = 0.0;
            let mut free_total = self.distinct_remaining;
            for (bucket, &is_pinned) in self.buckets.iter().zip(&pinned) {
                if is_pinned {
                    pinned_total += bucket.distinct().min(floor);
                } else {
                    free_total += bucket.distinct();
                }
            }
            if free_total <= EPSILON {
                break 0.0;
            }
            let scale = ((budget - pinned_total) / free_total).clamp(0.0, 1.0);

            let mut changed = false;
            for (bucket, is_pinned) in self.buckets.iter().zip(pinned.iter_mut()) {
                if !*is_pinned && bucket.distinct() * scale < bucket.distinct().min(floor) {
                    *is_pinned = true;
                    changed = true;
                }
            }
            if !changed {
                break scale;
            }
        };

        for (bucket, is_pinned) in self.buckets.iter_mut().zip(pinned) {
            let distinct = if is_pinned {
                bucket.distinct().min(floor)
            } else {
                bucket.distinct() * scale
            };
            bucket.set_distinct(distinct);
        }
        self.distinct_remaining *= scale;
        self.ndv_was_capped = true;
    }

    /// Fold every bucket into the remainder statistics
    ///
    /// Used where bucket positions cannot be trusted, e.g. combining
    /// histograms of non-orderable types.
    pub(crate) fn folded_into_remainder(&self) -> Histogram {
        let mut histogram = self.derive(
            Vec::new(),
            self.null_freq,
            self.num_distinct_non_null(),
            self.frequency_non_null(),
        );
        histogram.is_well_defined = self.is_well_defined;
        histogram
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Histogram (well defined: {})", self.is_well_defined)?;
        for (i, bucket) in self.buckets.iter().enumerate() {
            writeln!(f, "  bucket {}: {}", i, bucket)?;
        }
        writeln!(f, "  null fraction: {:.4}", self.null_freq)?;
        writeln!(f, "  remaining NDV: {:.4}", self.distinct_remaining)?;
        write!(f, "  remaining frequency: {:.4}", self.freq_remaining)?;
        if let Some(skew) = self.skew {
            write!(f, "\n  skew: {:.4}", skew)?;
        }
        if self.ndv_was_capped {
            write!(f, "\n  NDV capped")?;
        }
        Ok(())
    }
}

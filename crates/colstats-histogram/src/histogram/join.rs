// ============================================================================
// Join Transforms
// ============================================================================
//
// Histogram of the join column after `left.col <cmp> right.col`. Bucket
// frequencies of a raw join result are fractions of the cartesian product;
// normalization rescales them and the scale factor carries the selectivity.

use std::cmp::Ordering;

use log::debug;

use super::Histogram;
use crate::{
    bucket::Bucket,
    config::{DEFAULT_SCALE_FACTOR, EPSILON, MIN_DISTINCT, NEUTRAL_SCALE_FACTOR},
    predicate::StatsCmpType,
};

impl Histogram {
    /// Join with another histogram, returning a non-normalized histogram
    ///
    /// Only equality and IS NOT DISTINCT FROM joins are computed from
    /// buckets; every other comparison yields a not-well-defined histogram.
    pub fn join(&self, cmp: StatsCmpType, other: &Histogram) -> Histogram {
        if !self.is_well_defined() || !other.is_well_defined() {
            return self.derive_undefined();
        }
        match cmp {
            StatsCmpType::Eq => self.join_equality(other),
            StatsCmpType::Indf => self.join_indf(other),
            _ => self.derive_undefined(),
        }
    }

    /// Join with another histogram and normalize the result
    ///
    /// # Arguments
    /// * `cmp` - Join comparison
    /// * `rows` - Row count of this side
    /// * `other` - Histogram of the other side's join column
    /// * `rows_other` - Row count of the other side
    ///
    /// Returns the normalized join histogram and the scale factor to divide
    /// the cartesian product by.
    pub fn join_normalized(
        &self,
        cmp: StatsCmpType,
        rows: f64,
        other: &Histogram,
        rows_other: f64,
    ) -> (Histogram, f64) {
        if !cmp.is_equality_like() {
            let scale_factor = if cmp.is_inequality_like() {
                self.inequality_join_scale_factor(rows, other, rows_other)
            } else {
                DEFAULT_SCALE_FACTOR
            };
            return (self.derive_undefined(), scale_factor);
        }

        if !self.is_well_defined() || !other.is_well_defined() {
            debug!("join on undefined histogram, scaling by the smaller input");
            return (self.derive_undefined(), rows.min(rows_other).max(NEUTRAL_SCALE_FACTOR));
        }

        let mut result = self.join(cmp, other);
        result.normalize();

        // the scale factor of an equality join is the larger NDV of the inputs
        let mut scale_factor =
            self.num_distinct().max(MIN_DISTINCT).max(other.num_distinct().max(MIN_DISTINCT));

        let cartesian_product = rows * rows_other;
        if result.is_empty() {
            scale_factor = cartesian_product;
        }

        if cmp == StatsCmpType::Indf {
            // nulls of both sides match each other
            let expected_equal = cartesian_product / scale_factor;
            let null_pairs = rows * self.null_freq() * rows_other * other.null_freq();
            let expected = expected_equal + null_pairs;
            if expected > EPSILON {
                scale_factor = cartesian_product / expected;
            }
        }

        // never estimate more rows than the cartesian product
        (result, scale_factor.min(cartesian_product).max(NEUTRAL_SCALE_FACTOR))
    }

    /// Scale factor of a `<>` or IS DISTINCT FROM join
    ///
    /// Derived from the equality join: the inequality keeps every pair the
    /// equality join rejects.
    pub fn inequality_join_scale_factor(&self, rows: f64, other: &Histogram, rows_other: f64) -> f64 {
        let (_, equality_scale) = self.join_normalized(StatsCmpType::Eq, rows, other, rows_other);
        let cartesian_product = rows * rows_other;

        let selectivity = 1.0 - 1.0 / equality_scale.max(NEUTRAL_SCALE_FACTOR);
        if selectivity > EPSILON {
            (1.0 / selectivity).min(cartesian_product)
        } else {
            cartesian_product
        }
    }

    fn join_equality(&self, other: &Histogram) -> Histogram {
        if !self.capabilities().is_ndv_mappable || !other.capabilities().is_ndv_mappable {
            return self.join_ndv_fallback(other);
        }

        let left = self.buckets();
        let right = other.buckets();
        let mut joined = Vec::new();
        let mut freq_joined_self = 0.0;
        let mut freq_joined_other = 0.0;

        let (mut i, mut j) = (0, 0);
        while i < left.len() && j < right.len() {
            let (b1, b2) = (&left[i], &right[j]);
            if b1.intersects(b2) {
                let intersection = b1.intersect(b2);
                joined.push(intersection.bucket);
                freq_joined_self += intersection.freq_self;
                freq_joined_other += intersection.freq_other;

                match b1.compare_upper_bounds(b2) {
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                    }
                    Ordering::Less => i += 1,
                    Ordering::Greater => j += 1,
                }
            } else if b1.is_before(b2) {
                i += 1;
            } else {
                j += 1;
            }
        }

        let (distinct_remaining, freq_remaining) =
            join_remainder(self, other, &joined, freq_joined_self, freq_joined_other);
        self.derive(joined, 0.0, distinct_remaining, freq_remaining)
    }

    fn join_indf(&self, other: &Histogram) -> Histogram {
        let mut result = self.join_equality(other);
        let max_distinct = self.num_distinct().max(other.num_distinct());
        result.null_freq = if max_distinct > EPSILON {
            self.null_freq() * other.null_freq() / max_distinct
        } else {
            0.0
        };
        result
    }

    /// Join estimate from distinct counts alone, for values that cannot be
    /// placed on a numeric domain
    fn join_ndv_fallback(&self, other: &Histogram) -> Histogram {
        let ndv_self = self.num_distinct_non_null();
        let ndv_other = other.num_distinct_non_null();
        let distinct = ndv_self.min(ndv_other);
        let max_ndv = ndv_self.max(ndv_other);

        debug!("NDV based join estimate: {:.2} x {:.2} distinct values", ndv_self, ndv_other);

        if distinct <= EPSILON || max_ndv <= EPSILON {
            return self.derive(Vec::new(), 0.0, 0.0, 0.0);
        }
        let frequency = (self.frequency_non_null() * other.frequency_non_null() / max_ndv).min(1.0);
        self.derive(Vec::new(), 0.0, distinct, frequency)
    }
}

/// True when both inputs describe their values (buckets or remainder) and
/// at least one has remainder values
fn can_compute_join_remainder(h1: &Histogram, h2: &Histogram) -> bool {
    let has_remainder1 = h1.distinct_remaining() > EPSILON;
    let has_remainder2 = h2.distinct_remaining() > EPSILON;
    if !has_remainder1 && !has_remainder2 {
        return false;
    }
    (has_remainder1 || h1.bucket_count() > 0) && (has_remainder2 || h2.bucket_count() > 0)
}

/// Distinct count and frequency of join results not captured by join buckets
///
/// The remainder of the join is made of three parts: remainder values of one
/// side joining remainder values of the other, and the remainder of each side
/// joining the bucket values of the other side that found no bucket partner.
fn join_remainder(
    h1: &Histogram,
    h2: &Histogram,
    joined: &[Bucket],
    freq_joined1: f64,
    freq_joined2: f64,
) -> (f64, f64) {
    if !can_compute_join_remainder(h1, h2) {
        return (0.0, 0.0);
    }

    let ndv_join: f64 = joined.iter().map(Bucket::distinct).sum();
    let freq_join: f64 = joined.iter().map(Bucket::frequency).sum();
    if 1.0 - freq_join <= EPSILON {
        return (0.0, 0.0);
    }

    let distinct_non_null1 = h1.num_distinct_non_null();
    let distinct_non_null2 = h2.num_distinct_non_null();

    // at most the smaller NDV of the inputs can find a partner
    let ndv_join_remaining = (distinct_non_null1.min(distinct_non_null2) - ndv_join).max(0.0);

    let freq_non_join1 = (h1.frequency_buckets() - freq_joined1).max(0.0);
    let freq_non_join2 = (h2.frequency_buckets() - freq_joined2).max(0.0);
    let ndv_buckets1: f64 = h1.buckets().iter().map(Bucket::distinct).sum();
    let ndv_buckets2: f64 = h2.buckets().iter().map(Bucket::distinct).sum();
    let ndv_non_join1 = ndv_buckets1 - ndv_join;
    let ndv_non_join2 = ndv_buckets2 - ndv_join;

    let freq_remaining1 = h1.freq_remaining();
    let freq_remaining2 = h2.freq_remaining();

    let mut freq_join_remaining = safe_div(
        freq_remaining1 * freq_remaining2,
        h1.distinct_remaining().max(h2.distinct_remaining()),
    );
    freq_join_remaining +=
        safe_div(freq_remaining1 * freq_non_join2, distinct_non_null1.max(ndv_non_join2));
    freq_join_remaining +=
        safe_div(freq_remaining2 * freq_non_join1, distinct_non_null2.max(ndv_non_join1));

    if ndv_join_remaining <= EPSILON {
        return (0.0, 0.0);
    }
    (ndv_join_remaining, freq_join_remaining.min(1.0 - freq_join))
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > EPSILON {
        numerator / denominator
    } else {
        0.0
    }
}

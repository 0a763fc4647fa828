// ============================================================================
// UNION / UNION ALL
// ============================================================================

use log::debug;

use super::Histogram;
use crate::{
    bucket::Bucket,
    config::{EPSILON, MIN_ROWS},
};

impl Histogram {
    /// Histogram of the column after a set union with `other`
    ///
    /// # Arguments
    /// * `rows` - Row count of this input
    /// * `other` - Histogram of the other input's column
    /// * `rows_other` - Row count of the other input
    /// * `is_union_all` - Keep duplicates (UNION ALL) or remove them (UNION)
    ///
    /// Returns the normalized histogram and the estimated output row count.
    pub fn union(
        &self,
        rows: f64,
        other: &Histogram,
        rows_other: f64,
        is_union_all: bool,
    ) -> (Histogram, f64) {
        if !self.is_well_defined() || !other.is_well_defined() {
            debug!("union of undefined histograms, assuming all {} rows survive", rows + rows_other);
            return (self.derive_undefined(), rows + rows_other);
        }

        let capabilities = self.capabilities().intersect(other.capabilities());
        let (mut result, output_rows) = if capabilities.is_orderable {
            self.union_sweep(rows, other, rows_other, is_union_all)
        } else {
            self.folded_into_remainder().union_sweep(
                rows,
                &other.folded_into_remainder(),
                rows_other,
                is_union_all,
            )
        };
        result.capabilities = capabilities;
        result.normalize();
        (result, output_rows)
    }

    /// UNION ALL of two inputs
    pub fn union_all(&self, rows: f64, other: &Histogram, rows_other: f64) -> (Histogram, f64) {
        self.union(rows, other, rows_other, true)
    }

    /// UNION (duplicate eliminating) of two inputs
    pub fn union_distinct(&self, rows: f64, other: &Histogram, rows_other: f64) -> (Histogram, f64) {
        self.union(rows, other, rows_other, false)
    }

    /// Combine the bucket lists in order, tracking row counts per output bucket
    fn union_sweep(
        &self,
        rows: f64,
        other: &Histogram,
        rows_other: f64,
        is_union_all: bool,
    ) -> (Histogram, f64) {
        let total_rows = rows + rows_other;
        let mut pieces: Vec<(Bucket, f64)> = Vec::new();

        let mut left = self.buckets().iter();
        let mut right = other.buckets().iter();
        let mut current_left = left.next().cloned();
        let mut current_right = right.next().cloned();

        loop {
            match (current_left.take(), current_right.take()) {
                (Some(b1), Some(b2)) => {
                    if b1.intersects(&b2) {
                        let merge = b1.merge(&b2, rows, rows_other, is_union_all);
                        let merged_rows = merge.merged.frequency() * total_rows;
                        pieces.push((merge.merged, merged_rows));
                        current_left = merge.residual_self.or_else(|| left.next().cloned());
                        current_right = merge.residual_other.or_else(|| right.next().cloned());
                    } else if b2.is_before(&b1) {
                        pieces.push((b2.clone(), b2.frequency() * rows_other));
                        current_left = Some(b1);
                        current_right = right.next().cloned();
                    } else {
                        pieces.push((b1.clone(), b1.frequency() * rows));
                        current_left = left.next().cloned();
                        current_right = Some(b2);
                    }
                }
                (Some(b1), None) => {
                    pieces.push((b1.clone(), b1.frequency() * rows));
                    current_left = left.next().cloned();
                }
                (None, Some(b2)) => {
                    pieces.push((b2.clone(), b2.frequency() * rows_other));
                    current_right = right.next().cloned();
                }
                (None, None) => break,
            }
        }

        let null_rows_self = self.null_freq() * rows;
        let null_rows_other = other.null_freq() * rows_other;
        let remaining_rows_self = self.freq_remaining() * rows;
        let remaining_rows_other = other.freq_remaining() * rows_other;
        let (null_rows, remaining_rows) = if is_union_all {
            (null_rows_self + null_rows_other, remaining_rows_self + remaining_rows_other)
        } else {
            (null_rows_self.max(null_rows_other), remaining_rows_self.max(remaining_rows_other))
        };
        let distinct_remaining = self.distinct_remaining().max(other.distinct_remaining());

        let output_rows = if is_union_all {
            total_rows
        } else {
            let bucket_rows: f64 = pieces.iter().map(|(_, rows)| rows).sum();
            (bucket_rows + null_rows + remaining_rows).max(MIN_ROWS)
        };

        let to_frequency = |rows: f64| if output_rows > EPSILON { rows / output_rows } else { 0.0 };
        let buckets = pieces
            .into_iter()
            .map(|(mut bucket, bucket_rows)| {
                bucket.set_frequency(to_frequency(bucket_rows));
                bucket
            })
            .collect();
        let freq_remaining =
            if distinct_remaining > EPSILON { to_frequency(remaining_rows) } else { 0.0 };

        let result = self.derive(buckets, to_frequency(null_rows), distinct_remaining, freq_remaining);
        (result, output_rows)
    }
}

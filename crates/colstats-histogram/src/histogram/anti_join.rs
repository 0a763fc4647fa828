// ============================================================================
// Left Anti Semi Join
// ============================================================================

use log::debug;

use super::Histogram;
use crate::{
    bucket::Bucket,
    config::{DEFAULT_SCALE_FACTOR, EPSILON, MIN_ROWS, NEUTRAL_SCALE_FACTOR},
    predicate::StatsCmpType,
};

impl Histogram {
    /// Histogram of the outer rows that find no match in `other`
    ///
    /// Value ranges covered by the inner histogram's buckets are removed from
    /// this histogram's buckets. The remainder is kept as is because its
    /// values cannot be located. Comparisons other than equality and IS NOT
    /// DISTINCT FROM return an unchanged copy.
    pub fn anti_join(&self, cmp: StatsCmpType, other: &Histogram) -> Histogram {
        if !self.is_well_defined() || !other.is_well_defined() {
            return self.derive_undefined();
        }
        let orderable = self.capabilities().is_orderable && other.capabilities().is_orderable;
        if !cmp.is_equality_like() || !orderable {
            return self.clone();
        }

        let buckets = subtract_buckets(self.buckets(), other.buckets());
        let null_freq = self.anti_join_null_freq(cmp, other);
        self.derive(buckets, null_freq, self.distinct_remaining(), self.freq_remaining())
    }

    /// Anti-semi-join normalized, with the scale factor of the outer side
    ///
    /// # Arguments
    /// * `cmp` - Join comparison
    /// * `rows` - Row count of the outer side
    /// * `other` - Histogram of the inner join column
    /// * `ignore_inner` - Skip bucket subtraction and use the default selectivity
    pub fn anti_join_normalized(
        &self,
        cmp: StatsCmpType,
        rows: f64,
        other: &Histogram,
        ignore_inner: bool,
    ) -> (Histogram, f64) {
        if !self.is_well_defined() || !other.is_well_defined() {
            return (self.derive_undefined(), NEUTRAL_SCALE_FACTOR);
        }

        let rows = rows.max(MIN_ROWS);
        let orderable = self.capabilities().is_orderable && other.capabilities().is_orderable;
        if ignore_inner || !cmp.is_equality_like() || !orderable {
            debug!("anti join {} estimated with default selectivity", cmp);
            return (self.clone(), DEFAULT_SCALE_FACTOR.min(rows));
        }

        let mut result = self.anti_join(cmp, other);
        let scale_factor = result.normalize();
        if result.is_empty() {
            return (result, rows);
        }
        (result, scale_factor.min(rows))
    }

    /// Fraction of outer nulls surviving the anti join
    ///
    /// NULL never equals anything, so with `=` every outer null survives.
    /// With IS NOT DISTINCT FROM, outer nulls are matched away as soon as the
    /// inner side has any null.
    fn anti_join_null_freq(&self, cmp: StatsCmpType, other: &Histogram) -> f64 {
        if cmp != StatsCmpType::Indf {
            return self.null_freq();
        }
        if other.null_freq() > EPSILON {
            0.0
        } else {
            self.null_freq()
        }
    }
}

/// Remove the intervals of `inner` from `outer`
///
/// Both sides are swept in order. A piece of an outer bucket left above an
/// inner bucket becomes the next candidate, since later inner buckets may
/// still overlap it.
fn subtract_buckets(outer: &[Bucket], inner: &[Bucket]) -> Vec<Bucket> {
    let mut result = Vec::with_capacity(outer.len());
    let mut pending = outer.iter();
    let mut candidate: Option<Bucket> = None;
    let mut j = 0;

    loop {
        let current = match candidate.take().or_else(|| pending.next().cloned()) {
            Some(bucket) => bucket,
            None => break,
        };
        let Some(other) = inner.get(j) else {
            result.push(current);
            continue;
        };

        if current.is_before(other) {
            result.push(current);
            continue;
        }
        if other.is_before(&current) {
            j += 1;
            candidate = Some(current);
            continue;
        }

        let (lower, upper) = current.difference(other);
        result.extend(lower);
        if upper.is_some() {
            // the inner bucket ends inside the current one
            j += 1;
            candidate = upper;
        }
    }
    result
}

//! Histogram buckets
//!
//! A bucket is an interval over [`Point`]s whose ends may be closed or open,
//! carrying the fraction of the column's rows that fall inside it and the
//! number of distinct values it holds. Values are assumed to be spread
//! uniformly between the bounds, which is what every scaling rule below
//! relies on.

use std::{cmp::Ordering, fmt};

use rand::Rng;

use crate::{config::EPSILON, point::Point};

/// An interval of a histogram with its frequency and distinct count
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    lower: Point,
    upper: Point,
    lower_closed: bool,
    upper_closed: bool,
    frequency: f64,
    distinct: f64,
}

/// Result of [`Bucket::intersect`]
#[derive(Debug, Clone, PartialEq)]
pub struct BucketIntersection {
    /// Join bucket over the shared interval
    pub bucket: Bucket,
    /// Frequency of the left bucket that lies in the shared interval
    pub freq_self: f64,
    /// Frequency of the right bucket that lies in the shared interval
    pub freq_other: f64,
}

/// Result of [`Bucket::merge`]
#[derive(Debug, Clone, PartialEq)]
pub struct BucketMerge {
    /// Combined bucket, frequency relative to the rows of both inputs
    pub merged: Bucket,
    /// Part of the left bucket above the merged interval
    pub residual_self: Option<Bucket>,
    /// Part of the right bucket above the merged interval
    pub residual_other: Option<Bucket>,
}

impl Bucket {
    /// Create a new bucket
    ///
    /// # Arguments
    /// * `lower`, `upper` - Interval bounds, `lower <= upper`
    /// * `lower_closed`, `upper_closed` - Whether each bound is part of the interval
    /// * `frequency` - Fraction of rows in the interval
    /// * `distinct` - Number of distinct values in the interval
    pub fn new(
        lower: Point,
        upper: Point,
        lower_closed: bool,
        upper_closed: bool,
        frequency: f64,
        distinct: f64,
    ) -> Self {
        debug_assert!(!upper.less_than(&lower), "bucket bounds out of order: {} > {}", lower, upper);
        debug_assert!(
            !lower.equals(&upper) || (lower_closed && upper_closed),
            "singleton bucket at {} must be closed on both ends",
            lower
        );
        debug_assert!(frequency >= 0.0 && distinct >= 0.0);
        Bucket { lower, upper, lower_closed, upper_closed, frequency, distinct }
    }

    /// A one-value bucket `[point, point]` with one distinct value
    pub fn singleton_at(point: Point, frequency: f64) -> Self {
        Bucket::new(point.clone(), point, true, true, frequency, 1.0)
    }

    pub fn lower(&self) -> &Point {
        &self.lower
    }

    pub fn upper(&self) -> &Point {
        &self.upper
    }

    pub fn is_lower_closed(&self) -> bool {
        self.lower_closed
    }

    pub fn is_upper_closed(&self) -> bool {
        self.upper_closed
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn distinct(&self) -> f64 {
        self.distinct
    }

    pub fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }

    pub fn set_distinct(&mut self, distinct: f64) {
        self.distinct = distinct;
    }

    pub fn is_singleton(&self) -> bool {
        self.lower.equals(&self.upper)
    }

    /// Width of the interval on the statistics domain (1 for a singleton)
    pub fn width(&self) -> f64 {
        if self.is_singleton() {
            1.0
        } else {
            self.upper.distance(&self.lower)
        }
    }

    // ========================================================================
    // Point tests
    // ========================================================================

    /// True iff the point lies within the interval, respecting bound closedness
    pub fn contains(&self, point: &Point) -> bool {
        if point.is_null() {
            return false;
        }
        if self.is_singleton() {
            return self.lower.equals(point);
        }
        if (self.lower_closed && self.lower.equals(point))
            || (self.upper_closed && self.upper.equals(point))
        {
            return true;
        }
        self.lower.less_than(point) && point.less_than(&self.upper)
    }

    /// True if every value of the bucket is greater than the point
    pub fn is_before_point(&self, point: &Point) -> bool {
        if self.lower_closed {
            self.lower.greater_than(point)
        } else {
            point.less_than_or_equal(&self.lower)
        }
    }

    /// True if every value of the bucket is less than the point
    pub fn is_after_point(&self, point: &Point) -> bool {
        if self.upper_closed {
            self.upper.less_than(point)
        } else {
            self.upper.less_than_or_equal(point)
        }
    }

    /// Fraction of the bucket at or below the point
    pub fn overlap(&self, point: &Point) -> f64 {
        if self.upper.less_than_or_equal(point) {
            return 1.0;
        }
        if !self.contains(point) {
            return 0.0;
        }
        if self.is_singleton() {
            return 1.0;
        }
        let width = self.upper.distance(&self.lower);
        if width <= EPSILON {
            return 1.0;
        }
        (point.distance(&self.lower) / width).clamp(0.0, 1.0)
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Bucket `[lower, point]` (upper closed per `include_upper`) with
    /// frequency and distinct scaled to the retained fraction
    ///
    /// Returns `None` when nothing is retained, e.g. scaling `[5, 10]` to an
    /// open bound at 5.
    pub fn scale_upper(&self, point: &Point, include_upper: bool) -> Option<Bucket> {
        if self.lower.equals(point) {
            if !include_upper || !self.lower_closed {
                return None;
            }
            return Some(self.singleton(point));
        }

        let (frequency, distinct) = if self.upper.equals(point) {
            (self.frequency, self.distinct)
        } else {
            let overlap = self.overlap(point);
            (self.frequency * overlap, self.distinct * overlap)
        };

        Some(Bucket::new(
            self.lower.clone(),
            point.clone(),
            self.lower_closed,
            include_upper,
            frequency,
            distinct,
        ))
    }

    /// Bucket `[point, upper]` (lower closed per `include_lower`) with
    /// frequency and distinct scaled to the retained fraction
    pub fn scale_lower(&self, point: &Point, include_lower: bool) -> Option<Bucket> {
        if self.upper.equals(point) {
            if !include_lower || !self.upper_closed {
                return None;
            }
            return Some(self.singleton(point));
        }

        let (frequency, distinct) = if self.lower.equals(point) {
            (self.frequency, self.distinct)
        } else {
            let remaining = 1.0 - self.overlap(point);
            (self.frequency * remaining, self.distinct * remaining)
        };

        Some(Bucket::new(
            point.clone(),
            self.upper.clone(),
            include_lower,
            self.upper_closed,
            frequency,
            distinct,
        ))
    }

    /// Part of the bucket strictly above the point
    ///
    /// Integer domains start the remainder at the successor of the point so
    /// the result stays closed.
    pub fn greater_than(&self, point: &Point) -> Option<Bucket> {
        if self.is_singleton() || self.upper.equals(point) {
            return None;
        }
        match point.successor() {
            Some(next) => {
                if self.contains(&next) {
                    self.scale_lower(&next, true)
                } else {
                    None
                }
            }
            None => self.scale_lower(point, false),
        }
    }

    /// One-value bucket at `point` carrying the per-value frequency of this bucket
    pub fn singleton(&self, point: &Point) -> Bucket {
        let frequency = self.frequency / self.distinct.max(1.0);
        Bucket::singleton_at(point.clone(), frequency.min(1.0))
    }

    /// Rescale the frequency from one row count to another
    pub fn update_frequency(&self, rows_old: f64, rows_new: f64) -> Bucket {
        let mut bucket = self.clone();
        bucket.frequency = if rows_new > EPSILON {
            self.frequency * rows_old / rows_new
        } else {
            0.0
        };
        bucket
    }

    // ========================================================================
    // Bound comparison
    // ========================================================================

    /// Compare lower bounds; a closed bound sorts before an open one at the same point
    pub fn compare_lower_bounds(&self, other: &Bucket) -> Ordering {
        if self.lower.equals(&other.lower) {
            match (self.lower_closed, other.lower_closed) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => Ordering::Equal,
            }
        } else if self.lower.less_than(&other.lower) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Compare upper bounds; a closed bound sorts after an open one at the same point
    pub fn compare_upper_bounds(&self, other: &Bucket) -> Ordering {
        if self.upper.equals(&other.upper) {
            match (self.upper_closed, other.upper_closed) {
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                _ => Ordering::Equal,
            }
        } else if self.upper.less_than(&other.upper) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Compare this lower bound with the other bucket's upper bound
    ///
    /// Equal points compare equal only when both bounds are closed, i.e. the
    /// intervals touch in a shared value.
    pub fn compare_lower_to_upper(&self, other: &Bucket) -> Ordering {
        if self.lower.greater_than(&other.upper) {
            return Ordering::Greater;
        }
        if self.lower.less_than(&other.upper) {
            return Ordering::Less;
        }
        if self.lower_closed && other.upper_closed {
            Ordering::Equal
        } else {
            Ordering::Greater
        }
    }

    // ========================================================================
    // Bucket relationships
    // ========================================================================

    /// True if the other bucket lies entirely within this one
    pub fn subsumes(&self, other: &Bucket) -> bool {
        if self.is_singleton() && other.is_singleton() {
            return self.lower.equals(&other.lower);
        }
        if other.is_singleton() {
            return self.contains(&other.lower);
        }
        self.compare_lower_bounds(other) != Ordering::Greater
            && self.compare_upper_bounds(other) != Ordering::Less
    }

    /// True iff the two intervals share at least one value
    pub fn intersects(&self, other: &Bucket) -> bool {
        if self.is_singleton() && other.is_singleton() {
            return self.lower.equals(&other.lower);
        }
        if self.is_singleton() {
            return other.contains(&self.lower);
        }
        if other.is_singleton() {
            return self.contains(&other.lower);
        }
        if self.subsumes(other) || other.subsumes(self) {
            return true;
        }
        if self.compare_lower_bounds(other) != Ordering::Greater {
            other.compare_lower_to_upper(self) != Ordering::Greater
        } else {
            self.compare_lower_to_upper(other) != Ordering::Greater
        }
    }

    /// True if this bucket ends before the other begins
    pub fn is_before(&self, other: &Bucket) -> bool {
        !self.intersects(other) && self.upper.less_than_or_equal(&other.lower)
    }

    /// True if this bucket begins after the other ends
    pub fn is_after(&self, other: &Bucket) -> bool {
        !self.intersects(other) && other.upper.less_than_or_equal(&self.lower)
    }

    // ========================================================================
    // Combination
    // ========================================================================

    /// Join two overlapping buckets over their shared interval
    ///
    /// Each side contributes the fraction of its frequency and distinct count
    /// that falls in the shared interval. Values in the smaller distinct set
    /// are assumed to find a match in the larger one, so the join frequency is
    /// the product of both contributions divided by the larger distinct count.
    pub fn intersect(&self, other: &Bucket) -> BucketIntersection {
        debug_assert!(self.intersects(other));

        let (lower, lower_closed) = if self.lower.equals(&other.lower) {
            (self.lower.clone(), self.lower_closed && other.lower_closed)
        } else if self.lower.greater_than(&other.lower) {
            (self.lower.clone(), self.lower_closed)
        } else {
            (other.lower.clone(), other.lower_closed)
        };
        let (upper, upper_closed) = if self.upper.equals(&other.upper) {
            (self.upper.clone(), self.upper_closed && other.upper_closed)
        } else if self.upper.less_than(&other.upper) {
            (self.upper.clone(), self.upper_closed)
        } else {
            (other.upper.clone(), other.upper_closed)
        };

        let singleton = lower.equals(&upper);
        let distance = if singleton { 1.0 } else { upper.distance(&lower) };

        let (ratio_self, ratio_other) = if self.is_singleton() && other.is_singleton() {
            (1.0, 1.0)
        } else {
            (overlap_ratio(distance, self.width()), overlap_ratio(distance, other.width()))
        };

        let distinct_self = ratio_self * self.distinct;
        let distinct_other = ratio_other * other.distinct;
        let freq_self = ratio_self * self.frequency;
        let freq_other = ratio_other * other.frequency;

        let max_distinct = distinct_self.max(distinct_other);
        let frequency = if max_distinct > EPSILON {
            freq_self * freq_other / max_distinct
        } else {
            0.0
        };

        let bucket = Bucket::new(
            lower,
            upper,
            lower_closed || singleton,
            upper_closed || singleton,
            frequency,
            distinct_self.min(distinct_other),
        );

        BucketIntersection { bucket, freq_self, freq_other }
    }

    /// Subtract the other bucket's interval from this one
    ///
    /// Returns the residual below and the residual above the other bucket.
    /// Either or both may be absent.
    pub fn difference(&self, other: &Bucket) -> (Option<Bucket>, Option<Bucket>) {
        if other.subsumes(self) {
            return (None, None);
        }
        if self.is_before(other) {
            return (Some(self.clone()), None);
        }
        if other.is_before(self) {
            return (None, Some(self.clone()));
        }

        let lower = if self.lower.less_than(&other.lower) {
            self.scale_upper(&other.lower, !other.lower_closed)
        } else {
            None
        };
        let upper = if other.upper.less_than(&self.upper) {
            self.scale_lower(&other.upper, !other.upper_closed)
        } else {
            None
        };
        (lower, upper)
    }

    /// Combine two overlapping buckets of histograms being unioned
    ///
    /// The merged bucket spans from the smaller lower bound to the smaller
    /// upper bound; whatever part of either input lies above that re-enters
    /// the caller's sweep as a residual. UNION ALL adds the row mass of both
    /// overlapping parts, UNION keeps the larger one. The distinct count is the
    /// larger of the two parts' counts in both modes.
    pub fn merge(
        &self,
        other: &Bucket,
        rows_self: f64,
        rows_other: f64,
        is_union_all: bool,
    ) -> BucketMerge {
        debug_assert!(self.intersects(other));

        let (lower, lower_closed) = if self.lower.equals(&other.lower) {
            (self.lower.clone(), self.lower_closed || other.lower_closed)
        } else if self.lower.less_than(&other.lower) {
            (self.lower.clone(), self.lower_closed)
        } else {
            (other.lower.clone(), other.lower_closed)
        };

        let (upper, upper_closed, residual_self, residual_other) =
            match self.compare_upper_bounds(other) {
                Ordering::Equal => (self.upper.clone(), self.upper_closed, None, None),
                Ordering::Less => (
                    self.upper.clone(),
                    self.upper_closed,
                    None,
                    other.scale_lower(&self.upper, !self.upper_closed),
                ),
                Ordering::Greater => (
                    other.upper.clone(),
                    other.upper_closed,
                    self.scale_lower(&other.upper, !other.upper_closed),
                    None,
                ),
            };

        let (freq_self, distinct_self) = self.mass_without(residual_self.as_ref());
        let (freq_other, distinct_other) = other.mass_without(residual_other.as_ref());

        let rows_part_self = freq_self * rows_self;
        let rows_part_other = freq_other * rows_other;
        let rows_merged = if is_union_all {
            rows_part_self + rows_part_other
        } else {
            rows_part_self.max(rows_part_other)
        };
        let total_rows = rows_self + rows_other;
        let frequency = if total_rows > EPSILON { rows_merged / total_rows } else { 0.0 };

        let singleton = lower.equals(&upper);
        let merged = Bucket::new(
            lower,
            upper,
            lower_closed || singleton,
            upper_closed || singleton,
            frequency,
            distinct_self.max(distinct_other),
        );

        BucketMerge { merged, residual_self, residual_other }
    }

    /// Frequency and distinct count left after removing a residual piece
    fn mass_without(&self, residual: Option<&Bucket>) -> (f64, f64) {
        match residual {
            Some(r) => (
                (self.frequency - r.frequency).max(0.0),
                (self.distinct - r.distinct).max(0.0),
            ),
            None => (self.frequency, self.distinct),
        }
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// True if both bounds map onto the statistics domain
    pub fn can_sample(&self) -> bool {
        self.lower.is_mappable() && self.upper.is_mappable()
    }

    /// Draw a value uniformly from the interval
    pub fn sample(&self, rng: &mut impl Rng) -> Option<f64> {
        let lower = self.lower.stats_double()?;
        if self.is_singleton() {
            return Some(lower);
        }
        let upper = self.upper.stats_double()?;
        Some(lower + rng.gen::<f64>() * (upper - lower))
    }
}

/// Fraction of a bucket of the given width covered by a sub-interval
fn overlap_ratio(distance: f64, width: f64) -> f64 {
    if width <= EPSILON {
        1.0
    } else {
        (distance / width).clamp(0.0, 1.0)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}, {}{}: freq {:.4}, distinct {:.4}",
            if self.lower_closed { '[' } else { '(' },
            self.lower,
            self.upper,
            if self.upper_closed { ']' } else { ')' },
            self.frequency,
            self.distinct
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn bucket(lower: i64, upper: i64, frequency: f64, distinct: f64) -> Bucket {
        Bucket::new(Point::from(lower), Point::from(upper), true, true, frequency, distinct)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_contains_respects_closedness() {
        let b = Bucket::new(Point::from(1), Point::from(10), true, false, 0.5, 10.0);
        assert!(b.contains(&Point::from(1)));
        assert!(b.contains(&Point::from(5)));
        assert!(!b.contains(&Point::from(10)));
        assert!(!b.contains(&Point::from(0)));
        assert!(!b.contains(&Point::null()));
    }

    #[test]
    fn test_point_position() {
        let b = Bucket::new(Point::from(1), Point::from(10), false, false, 0.5, 10.0);
        assert!(b.is_before_point(&Point::from(1)));
        assert!(b.is_before_point(&Point::from(0)));
        assert!(b.is_after_point(&Point::from(10)));
        assert!(!b.is_after_point(&Point::from(9)));
    }

    #[test]
    fn test_overlap() {
        let b = bucket(0, 10, 1.0, 10.0);
        assert!(approx(b.overlap(&Point::from(5)), 0.5));
        assert!(approx(b.overlap(&Point::from(10)), 1.0));
        assert!(approx(b.overlap(&Point::from(20)), 1.0));
        assert!(approx(b.overlap(&Point::from(-1)), 0.0));
    }

    #[test]
    fn test_singleton_uses_per_value_frequency() {
        let b = bucket(1, 10, 0.5, 10.0);
        let s = b.singleton(&Point::from(5));
        assert!(s.is_singleton());
        assert!(approx(s.frequency(), 0.05));
        assert!(approx(s.distinct(), 1.0));
    }

    #[test]
    fn test_scale_upper() {
        let b = bucket(0, 10, 1.0, 10.0);
        let scaled = b.scale_upper(&Point::from(4), false).unwrap();
        assert_eq!(scaled.upper(), &Point::from(4));
        assert!(!scaled.is_upper_closed());
        assert!(approx(scaled.frequency(), 0.4));
        assert!(approx(scaled.distinct(), 4.0));

        assert!(b.scale_upper(&Point::from(0), false).is_none());
        assert!(b.scale_upper(&Point::from(0), true).unwrap().is_singleton());
    }

    #[test]
    fn test_scale_lower() {
        let b = bucket(0, 10, 1.0, 10.0);
        let scaled = b.scale_lower(&Point::from(4), true).unwrap();
        assert_eq!(scaled.lower(), &Point::from(4));
        assert!(approx(scaled.frequency(), 0.6));
        assert!(b.scale_lower(&Point::from(10), false).is_none());
    }

    #[test]
    fn test_greater_than_uses_successor() {
        let b = bucket(0, 10, 1.0, 10.0);
        let gt = b.greater_than(&Point::from(4)).unwrap();
        assert_eq!(gt.lower(), &Point::from(5));
        assert!(gt.is_lower_closed());
        assert!(approx(gt.frequency(), 0.5));
        assert!(b.greater_than(&Point::from(10)).is_none());

        let real = Bucket::new(Point::from(0.0), Point::from(10.0), true, true, 1.0, 10.0);
        let gt = real.greater_than(&Point::from(4.0)).unwrap();
        assert!(!gt.is_lower_closed());
        assert!(approx(gt.frequency(), 0.6));
    }

    #[test]
    fn test_intersects_touching_bounds() {
        let a = Bucket::new(Point::from(1), Point::from(5), true, false, 0.5, 4.0);
        let b = bucket(5, 10, 0.5, 5.0);
        assert!(!a.intersects(&b));
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));

        let c = bucket(1, 5, 0.5, 5.0);
        assert!(c.intersects(&b));
        assert!(!c.is_before(&b));
    }

    #[test]
    fn test_subsumes() {
        let outer = bucket(0, 100, 1.0, 100.0);
        assert!(outer.subsumes(&bucket(10, 20, 0.1, 10.0)));
        assert!(outer.subsumes(&Bucket::singleton_at(Point::from(100), 0.01)));
        assert!(!bucket(10, 20, 0.1, 10.0).subsumes(&outer));
    }

    #[test]
    fn test_intersect_identical_buckets() {
        let a = bucket(0, 10, 1.0, 10.0);
        let result = a.intersect(&a.clone());
        assert!(approx(result.bucket.distinct(), 10.0));
        assert!(approx(result.bucket.frequency(), 0.1));
        assert!(approx(result.freq_self, 1.0));
        assert!(approx(result.freq_other, 1.0));
    }

    #[test]
    fn test_intersect_partial_overlap() {
        let a = bucket(0, 10, 1.0, 10.0);
        let b = bucket(5, 15, 1.0, 10.0);
        let result = a.intersect(&b);
        assert_eq!(result.bucket.lower(), &Point::from(5));
        assert_eq!(result.bucket.upper(), &Point::from(10));
        assert!(approx(result.freq_self, 0.5));
        assert!(approx(result.freq_other, 0.5));
        assert!(approx(result.bucket.distinct(), 5.0));
        assert!(approx(result.bucket.frequency(), 0.05));
    }

    #[test]
    fn test_difference() {
        let a = bucket(0, 10, 1.0, 10.0);

        let (lower, upper) = a.difference(&bucket(4, 6, 0.2, 2.0));
        let lower = lower.unwrap();
        let upper = upper.unwrap();
        assert_eq!(lower.upper(), &Point::from(4));
        assert!(!lower.is_upper_closed());
        assert_eq!(upper.lower(), &Point::from(6));
        assert!(!upper.is_lower_closed());

        assert_eq!(a.difference(&bucket(-5, 20, 1.0, 25.0)), (None, None));
        assert_eq!(a.difference(&bucket(20, 30, 1.0, 10.0)), (Some(a.clone()), None));
        assert_eq!(a.difference(&bucket(-30, -20, 1.0, 10.0)), (None, Some(a.clone())));
    }

    #[test]
    fn test_merge_identical_union_all() {
        let a = bucket(1, 5, 1.0, 5.0);
        let result = a.merge(&a.clone(), 10.0, 10.0, true);
        assert!(approx(result.merged.frequency(), 1.0));
        assert!(approx(result.merged.distinct(), 5.0));
        assert!(result.residual_self.is_none());
        assert!(result.residual_other.is_none());
    }

    #[test]
    fn test_merge_identical_union_dedups() {
        let a = bucket(1, 5, 1.0, 5.0);
        let result = a.merge(&a.clone(), 10.0, 10.0, false);
        assert!(approx(result.merged.frequency(), 0.5));
    }

    #[test]
    fn test_merge_leaves_residual() {
        let a = bucket(0, 10, 1.0, 10.0);
        let b = bucket(5, 20, 1.0, 15.0);
        let result = a.merge(&b, 10.0, 10.0, true);
        assert_eq!(result.merged.lower(), &Point::from(0));
        assert_eq!(result.merged.upper(), &Point::from(10));
        assert!(result.residual_self.is_none());
        let residual = result.residual_other.unwrap();
        assert_eq!(residual.lower(), &Point::from(10));
        assert!(!residual.is_lower_closed());
        assert!(approx(residual.frequency(), 10.0 / 15.0));
        // all of `a` plus a third of `b`, over 20 rows
        assert!(approx(result.merged.frequency(), (10.0 + 10.0 / 3.0) / 20.0));
    }

    #[test]
    fn test_update_frequency() {
        let b = bucket(0, 10, 0.5, 10.0).update_frequency(10.0, 20.0);
        assert!(approx(b.frequency(), 0.25));
    }

    #[test]
    fn test_sample_stays_within_bounds() {
        let b = bucket(0, 10, 1.0, 10.0);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = b.sample(&mut rng).unwrap();
            assert!((0.0..=10.0).contains(&v));
        }
        assert!(Bucket::singleton_at(Point::from("a"), 1.0).sample(&mut rng).is_none());
    }

    #[test]
    fn test_display() {
        let b = Bucket::new(Point::from(1), Point::from(10), true, false, 0.5, 10.0);
        assert_eq!(b.to_string(), "[1, 10): freq 0.5000, distinct 10.0000");
    }
}

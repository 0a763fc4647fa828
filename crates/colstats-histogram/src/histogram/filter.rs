// ============================================================================
// Filter Transforms
// ============================================================================
//
// Histogram of a column after applying `column <cmp> constant`. Results are
// not normalized: their total frequency is the selectivity of the predicate,
// which `filter_normalized` turns into a scale factor.

use log::debug;

use super::Histogram;
use crate::{
    bucket::Bucket,
    config::{DEFAULT_SCALE_FACTOR, DEFAULT_SELECTIVITY, EPSILON},
    point::Point,
    predicate::StatsCmpType,
};

impl Histogram {
    /// Apply a comparison with a constant, returning a non-normalized histogram
    pub fn filter(&self, cmp: StatsCmpType, point: &Point) -> Histogram {
        if !self.is_well_defined() {
            return self.derive_undefined();
        }
        if cmp.is_range() && !self.capabilities().is_orderable {
            return self.derive_undefined();
        }

        match cmp {
            StatsCmpType::Eq => self.filter_equal(point),
            StatsCmpType::Indf => self.filter_indf(point),
            StatsCmpType::NotEq => self.filter_not_equal(point),
            StatsCmpType::Idf => self.filter_idf(point),
            StatsCmpType::Lt => self.filter_less(point, false),
            StatsCmpType::LtEq => self.filter_less(point, true),
            StatsCmpType::Gt => self.filter_greater(point, false),
            StatsCmpType::GtEq => self.filter_greater(point, true),
            StatsCmpType::Other => self.derive_undefined(),
        }
    }

    /// Apply a comparison with a constant and normalize the result
    ///
    /// Returns the normalized histogram and the scale factor (reciprocal of
    /// the predicate's selectivity). Predicates that cannot be estimated from
    /// buckets produce a not-well-defined histogram and the default scale
    /// factor.
    pub fn filter_normalized(&self, cmp: StatsCmpType, point: &Point) -> (Histogram, f64) {
        let unsupported = cmp == StatsCmpType::Other
            || (cmp.is_range() && !self.capabilities().is_orderable);
        if !self.is_well_defined() || unsupported {
            debug!(
                "filter {} {} estimated with default selectivity (well defined: {})",
                cmp,
                point,
                self.is_well_defined()
            );
            return (self.derive_undefined(), DEFAULT_SCALE_FACTOR);
        }

        let mut result = self.filter(cmp, point);
        let scale_factor = result.normalize();
        (result, scale_factor)
    }

    /// Bucket containing the point, if any
    pub fn find_bucket(&self, point: &Point) -> Option<&Bucket> {
        if self.capabilities().is_orderable {
            let idx = self.buckets().partition_point(|b| b.is_after_point(point));
            self.buckets().get(idx).filter(|b| b.contains(point))
        } else {
            self.buckets().iter().find(|b| b.contains(point))
        }
    }

    fn filter_equal(&self, point: &Point) -> Histogram {
        if point.is_null() {
            return self.derive(Vec::new(), self.null_freq(), 0.0, 0.0);
        }

        let buckets = match self.find_bucket(point) {
            Some(bucket) if bucket.is_singleton() => vec![bucket.clone()],
            Some(bucket) => vec![bucket.singleton(point)],
            // assume the value is one of the distinct values not in any bucket
            None if self.distinct_remaining() > EPSILON => {
                let frequency = (self.freq_remaining() / self.distinct_remaining()).min(1.0);
                vec![Bucket::singleton_at(point.clone(), frequency)]
            }
            None => Vec::new(),
        };
        self.derive(buckets, 0.0, 0.0, 0.0)
    }

    fn filter_indf(&self, point: &Point) -> Histogram {
        if point.is_null() {
            return self.derive(Vec::new(), self.null_freq(), 0.0, 0.0);
        }
        self.filter_equal(point)
    }

    fn filter_not_equal(&self, point: &Point) -> Histogram {
        let buckets = self.split_around(point);
        self.derive(buckets, 0.0, self.distinct_remaining(), self.freq_remaining())
    }

    // NULL IS DISTINCT FROM a value, so a non-null constant keeps the nulls
    fn filter_idf(&self, point: &Point) -> Histogram {
        let buckets = self.split_around(point);
        let null_freq = if point.is_null() { 0.0 } else { self.null_freq() };
        self.derive(buckets, null_freq, self.distinct_remaining(), self.freq_remaining())
    }

    /// Copy of the buckets with the point cut out of the bucket holding it
    fn split_around(&self, point: &Point) -> Vec<Bucket> {
        let mut buckets = Vec::with_capacity(self.bucket_count() + 1);
        for bucket in self.buckets() {
            if point.is_null() || !bucket.contains(point) {
                buckets.push(bucket.clone());
                continue;
            }
            buckets.extend(bucket.scale_upper(point, false));
            buckets.extend(bucket.greater_than(point));
        }
        buckets
    }

    fn filter_less(&self, point: &Point, include_point: bool) -> Histogram {
        if point.is_null() {
            return self.derive(Vec::new(), 0.0, 0.0, 0.0);
        }

        let mut buckets = Vec::new();
        for bucket in self.buckets() {
            if bucket.is_before_point(point) {
                break;
            }
            if bucket.is_after_point(point) {
                buckets.push(bucket.clone());
                continue;
            }
            buckets.extend(bucket.scale_upper(point, include_point));
            break;
        }

        let (distinct_remaining, freq_remaining) = self.remainder_with_default_selectivity();
        self.derive(buckets, 0.0, distinct_remaining, freq_remaining)
    }

    fn filter_greater(&self, point: &Point, include_point: bool) -> Histogram {
        if point.is_null() {
            return self.derive(Vec::new(), 0.0, 0.0, 0.0);
        }

        let mut buckets = Vec::new();
        let mut idx = 0;
        while idx < self.bucket_count() {
            let bucket = &self.buckets()[idx];
            if bucket.is_before_point(point) {
                break;
            }
            idx += 1;
            if bucket.contains(point) {
                let piece = if include_point {
                    bucket.scale_lower(point, true)
                } else {
                    bucket.greater_than(point)
                };
                buckets.extend(piece);
                break;
            }
        }
        buckets.extend(self.buckets()[idx..].iter().cloned());

        let (distinct_remaining, freq_remaining) = self.remainder_with_default_selectivity();
        self.derive(buckets, 0.0, distinct_remaining, freq_remaining)
    }

    /// Remainder values have no position, so range predicates keep a fixed share
    fn remainder_with_default_selectivity(&self) -> (f64, f64) {
        let distinct = self.distinct_remaining() * DEFAULT_SELECTIVITY;
        if distinct > EPSILON {
            (distinct, self.freq_remaining() * DEFAULT_SELECTIVITY)
        } else {
            (0.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(lower: i64, upper: i64, frequency: f64, distinct: f64) -> Bucket {
        Bucket::new(Point::from(lower), Point::from(upper), true, true, frequency, distinct)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample_histogram() -> Histogram {
        Histogram::with_stats(
            vec![bucket(1, 10, 0.5, 10.0), bucket(20, 29, 0.3, 10.0)],
            true,
            0.1,
            5.0,
            0.1,
        )
    }

    #[test]
    fn test_equal_inside_bucket() {
        let h = Histogram::new(vec![bucket(1, 10, 0.5, 10.0)]);
        let result = h.filter(StatsCmpType::Eq, &Point::from(5));
        assert_eq!(result.bucket_count(), 1);
        let b = &result.buckets()[0];
        assert_eq!(b.lower(), &Point::from(5));
        assert_eq!(b.upper(), &Point::from(5));
        assert!(approx(b.frequency(), 0.05));
        assert!(approx(b.distinct(), 1.0));
    }

    #[test]
    fn test_equal_from_remainder() {
        let result = sample_histogram().filter(StatsCmpType::Eq, &Point::from(15));
        assert_eq!(result.bucket_count(), 1);
        assert!(approx(result.buckets()[0].frequency(), 0.02));
        assert_eq!(result.null_freq(), 0.0);
    }

    #[test]
    fn test_equal_no_match() {
        let h = Histogram::new(vec![bucket(1, 10, 0.5, 10.0)]);
        let result = h.filter(StatsCmpType::Eq, &Point::from(50));
        assert!(result.is_empty());
        assert_eq!(result.frequency(), 0.0);
    }

    #[test]
    fn test_equal_null_keeps_nulls() {
        let result = sample_histogram().filter(StatsCmpType::Eq, &Point::null());
        assert_eq!(result.bucket_count(), 0);
        assert!(approx(result.null_freq(), 0.1));
    }

    #[test]
    fn test_not_equal_splits_bucket() {
        let result = sample_histogram().filter(StatsCmpType::NotEq, &Point::from(5));
        assert_eq!(result.bucket_count(), 3);
        assert_eq!(result.buckets()[0].upper(), &Point::from(5));
        assert!(!result.buckets()[0].is_upper_closed());
        assert_eq!(result.buckets()[1].lower(), &Point::from(6));
        assert_eq!(result.null_freq(), 0.0);
        assert!(approx(result.distinct_remaining(), 5.0));
        assert!(result.frequency() < sample_histogram().frequency());
    }

    #[test]
    fn test_idf_null_handling() {
        let keeps = sample_histogram().filter(StatsCmpType::Idf, &Point::from(5));
        assert!(approx(keeps.null_freq(), 0.1));

        let drops = sample_histogram().filter(StatsCmpType::Idf, &Point::null());
        assert_eq!(drops.null_freq(), 0.0);
        assert_eq!(drops.bucket_count(), 2);
    }

    #[test]
    fn test_indf_null_point() {
        let result = sample_histogram().filter(StatsCmpType::Indf, &Point::null());
        assert_eq!(result.bucket_count(), 0);
        assert!(approx(result.frequency(), 0.1));
    }

    #[test]
    fn test_less_than() {
        let result = sample_histogram().filter(StatsCmpType::Lt, &Point::from(25));
        assert_eq!(result.bucket_count(), 2);
        assert!(approx(result.buckets()[0].frequency(), 0.5));
        let trimmed = &result.buckets()[1];
        assert_eq!(trimmed.upper(), &Point::from(25));
        assert!(!trimmed.is_upper_closed());
        assert!(approx(trimmed.frequency(), 0.3 * 5.0 / 9.0));
        assert!(approx(result.distinct_remaining(), 2.0));
        assert!(approx(result.freq_remaining(), 0.04));
        assert_eq!(result.null_freq(), 0.0);
    }

    #[test]
    fn test_less_than_at_lower_bound() {
        let h = Histogram::new(vec![bucket(1, 10, 0.5, 10.0)]);
        assert!(h.filter(StatsCmpType::Lt, &Point::from(1)).is_empty());
        let result = h.filter(StatsCmpType::LtEq, &Point::from(1));
        assert_eq!(result.bucket_count(), 1);
        assert!(result.buckets()[0].is_singleton());
    }

    #[test]
    fn test_greater_than() {
        let result = sample_histogram().filter(StatsCmpType::Gt, &Point::from(5));
        assert_eq!(result.bucket_count(), 2);
        assert_eq!(result.buckets()[0].lower(), &Point::from(6));
        assert!(approx(result.buckets()[1].frequency(), 0.3));

        let result = sample_histogram().filter(StatsCmpType::GtEq, &Point::from(15));
        assert_eq!(result.bucket_count(), 1);
        assert_eq!(result.buckets()[0].lower(), &Point::from(20));
    }

    #[test]
    fn test_greater_equal_at_upper_bound() {
        let h = Histogram::new(vec![bucket(1, 10, 0.5, 10.0)]);
        let result = h.filter(StatsCmpType::GtEq, &Point::from(10));
        assert!(result.buckets()[0].is_singleton());
        assert!(h.filter(StatsCmpType::Gt, &Point::from(10)).is_empty());
    }

    #[test]
    fn test_filter_normalized_scale_factor() {
        let h = Histogram::new(vec![bucket(1, 10, 0.5, 10.0), bucket(11, 20, 0.5, 10.0)]);
        let (result, scale) = h.filter_normalized(StatsCmpType::Eq, &Point::from(5));
        assert!(approx(scale, 1.0 / 0.05));
        assert!(result.is_normalized());
    }

    #[test]
    fn test_filter_undefined_input() {
        let (result, scale) = Histogram::undefined().filter_normalized(StatsCmpType::Eq, &Point::from(1));
        assert!(!result.is_well_defined());
        assert!(approx(scale, DEFAULT_SCALE_FACTOR));
    }

    #[test]
    fn test_range_filter_on_text_uses_default() {
        let h = Histogram::new(vec![
            Bucket::singleton_at(Point::from("a"), 0.5),
            Bucket::singleton_at(Point::from("b"), 0.5),
        ]);
        let (result, scale) = h.filter_normalized(StatsCmpType::Lt, &Point::from("b"));
        assert!(!result.is_well_defined());
        assert!(approx(scale, DEFAULT_SCALE_FACTOR));

        let (result, scale) = h.filter_normalized(StatsCmpType::Eq, &Point::from("b"));
        assert!(result.is_well_defined());
        assert!(approx(scale, 2.0));
    }

    #[test]
    fn test_find_bucket() {
        let h = sample_histogram();
        assert_eq!(h.find_bucket(&Point::from(25)), Some(&h.buckets()[1]));
        assert_eq!(h.find_bucket(&Point::from(15)), None);
        assert_eq!(h.find_bucket(&Point::from(100)), None);
    }
}

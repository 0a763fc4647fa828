// ============================================================================
// GROUP BY
// ============================================================================

use log::debug;

use super::Histogram;
use crate::config::{DEFAULT_SELECTIVITY, EPSILON, MIN_DISTINCT, MIN_ROWS};

impl Histogram {
    /// Histogram of the grouping column after duplicate elimination
    ///
    /// Every distinct value becomes one output row, so bucket frequencies
    /// become their share of the total distinct count. All nulls collapse
    /// into a single group.
    ///
    /// # Arguments
    /// * `total_rows` - Row count of the grouped input, an upper bound on the groups
    ///
    /// Returns the histogram and the estimated number of groups.
    pub fn group_by(&self, total_rows: f64) -> (Histogram, f64) {
        if !self.is_well_defined() {
            return (self.derive_undefined(), MIN_DISTINCT / DEFAULT_SELECTIVITY);
        }

        let total_distinct = self.num_distinct();
        if total_distinct <= EPSILON {
            debug!("group by over a histogram without distinct values");
            return (self.derive(Vec::new(), 0.0, 0.0, 0.0), 0.0);
        }

        let buckets = self
            .buckets()
            .iter()
            .map(|bucket| {
                let mut grouped = bucket.clone();
                grouped.set_frequency(bucket.distinct() / total_distinct);
                grouped
            })
            .collect();
        let null_freq = if self.has_nulls() { (1.0 / total_distinct).min(1.0) } else { 0.0 };
        let freq_remaining = if self.distinct_remaining() > EPSILON {
            (self.distinct_remaining() / total_distinct).min(1.0)
        } else {
            0.0
        };

        let mut result = self.derive(buckets, null_freq, self.distinct_remaining(), freq_remaining);
        result.normalize();
        let groups = result.num_distinct().min(total_rows.max(MIN_ROWS));
        (result, groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bucket::Bucket, point::Point};

    fn bucket(lower: i64, upper: i64, frequency: f64, distinct: f64) -> Bucket {
        Bucket::new(Point::from(lower), Point::from(upper), true, true, frequency, distinct)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_frequency_follows_distinct() {
        let h = Histogram::new(vec![bucket(1, 10, 0.9, 10.0), bucket(11, 40, 0.1, 30.0)]);
        let (result, groups) = h.group_by(1000.0);
        assert!(approx(result.buckets()[0].frequency(), 0.25));
        assert!(approx(result.buckets()[1].frequency(), 0.75));
        assert!(approx(result.buckets()[1].distinct(), 30.0));
        assert!(approx(groups, 40.0));
        assert!(result.is_normalized());
    }

    #[test]
    fn test_nulls_collapse_to_one_group() {
        let h = Histogram::with_stats(vec![bucket(1, 4, 0.5, 4.0)], true, 0.3, 5.0, 0.2);
        let (result, groups) = h.group_by(1000.0);
        assert!(approx(result.null_freq(), 0.1));
        assert!(approx(result.freq_remaining(), 0.5));
        assert!(approx(groups, 10.0));
    }

    #[test]
    fn test_groups_capped_by_rows() {
        let h = Histogram::new(vec![bucket(1, 100, 1.0, 100.0)]);
        let (_, groups) = h.group_by(20.0);
        assert!(approx(groups, 20.0));
    }

    #[test]
    fn test_undefined_and_empty() {
        let (result, groups) = Histogram::undefined().group_by(100.0);
        assert!(!result.is_well_defined());
        assert!(approx(groups, 2.5));

        let (result, groups) = Histogram::empty().group_by(100.0);
        assert!(result.is_empty());
        assert_eq!(groups, 0.0);
    }
}

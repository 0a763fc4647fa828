//! Building histograms from column values
//!
//! The ANALYZE side of the statistics layer. Values are optionally sampled,
//! sorted, and cut into equal-depth buckets. A run of equal values is never
//! split across buckets, so every value lives in exactly one bucket and the
//! buckets stay disjoint even for heavily repeated values.
//!
//! Types without a usable order (character strings) get one singleton bucket
//! per most frequent value instead, with every other value in the remainder.

use std::cmp::Ordering;

use colstats_types::SqlValue;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    bucket::Bucket,
    config::{StatsConfig, DEFAULT_HISTOGRAM_BUCKETS},
    error::StatsError,
    histogram::Histogram,
    point::Point,
};

/// Sample size specification
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSize {
    /// Exact number of rows to sample
    RowCount(usize),

    /// Fraction of the rows (0.0 to 1.0)
    Percentage(f64),

    /// Automatically determine sample size based on row count
    ///
    /// Strategy:
    /// - Small inputs (< 1000 rows): No sampling, use all rows
    /// - Medium inputs (1K-100K rows): 10% sample
    /// - Large inputs (> 100K rows): Fixed 10K row sample
    Adaptive,
}

impl SampleSize {
    /// Determine actual sample size for a given input
    ///
    /// Returns (sample_size, should_sample) tuple
    pub fn determine(&self, total_rows: usize) -> (usize, bool) {
        match self {
            SampleSize::RowCount(count) => {
                let sample_size = (*count).min(total_rows);
                (sample_size, sample_size < total_rows)
            }
            SampleSize::Percentage(pct) => {
                let sample_size = (total_rows as f64 * pct).ceil() as usize;
                let sample_size = sample_size.min(total_rows).max(1);
                (sample_size, sample_size < total_rows)
            }
            SampleSize::Adaptive => {
                if total_rows < 1000 {
                    (total_rows, false)
                } else if total_rows < 100_000 {
                    ((total_rows / 10).max(1000), true)
                } else {
                    (10_000, true)
                }
            }
        }
    }
}

/// Builds equal-depth histograms from raw column values
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBuilder {
    max_buckets: usize,
    sample_size: Option<SampleSize>,
}

impl Default for HistogramBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BUCKETS)
    }
}

impl HistogramBuilder {
    /// Create a builder producing at most `max_buckets` buckets
    pub fn new(max_buckets: usize) -> Self {
        Self { max_buckets: max_buckets.max(1), sample_size: None }
    }

    pub fn from_config(config: &StatsConfig) -> Self {
        Self::new(config.histogram_buckets)
    }

    /// Build from a sample instead of every value
    pub fn with_sampling(mut self, sample_size: SampleSize) -> Self {
        self.sample_size = Some(sample_size);
        self
    }

    pub fn max_buckets(&self) -> usize {
        self.max_buckets
    }

    /// Build a histogram, sampling with an entropy-seeded source if configured
    pub fn build(&self, values: &[SqlValue]) -> Result<Histogram, StatsError> {
        let mut rng = StdRng::from_entropy();
        self.build_with_rng(values, &mut rng)
    }

    /// Build a histogram using `rng` for sampling
    ///
    /// # Arguments
    /// * `values` - Column values, NULLs included
    /// * `rng` - Random source for the sample
    ///
    /// # Errors
    /// `IncomparableValues` if the non-null values mix kinds that cannot be
    /// compared, e.g. integers and strings.
    pub fn build_with_rng(
        &self,
        values: &[SqlValue],
        rng: &mut impl Rng,
    ) -> Result<Histogram, StatsError> {
        let sampled;
        let values = match &self.sample_size {
            Some(size) => match size.determine(values.len()) {
                (sample_size, true) => {
                    debug!("building histogram from {} of {} values", sample_size, values.len());
                    sampled = reservoir_sample(values, sample_size, rng);
                    &sampled[..]
                }
                _ => values,
            },
            None => values,
        };
        if values.is_empty() {
            return Ok(Histogram::empty());
        }

        let total = values.len() as f64;
        let mut non_null: Vec<&SqlValue> = values.iter().filter(|v| !v.is_null()).collect();
        let null_freq = (values.len() - non_null.len()) as f64 / total;
        if non_null.is_empty() {
            return Ok(Histogram::with_stats(Vec::new(), true, null_freq, 0.0, 0.0));
        }

        let first = non_null[0];
        if let Some(other) = non_null.iter().find(|v| first.stats_cmp(v).is_none()) {
            return Err(StatsError::IncomparableValues {
                left: first.type_name().to_string(),
                right: other.type_name().to_string(),
            });
        }
        non_null.sort_by(|a, b| a.stats_cmp(b).unwrap_or(Ordering::Equal));
        let runs = value_runs(&non_null);

        let histogram = if first.get_type().capabilities().is_orderable {
            let buckets = self.equal_depth_buckets(&runs, non_null.len(), total);
            Histogram::with_stats(buckets, true, null_freq, 0.0, 0.0)
        } else {
            self.frequent_value_buckets(runs, total, null_freq)
        };
        Ok(histogram)
    }

    fn equal_depth_buckets(&self, runs: &[(&SqlValue, usize)], rows: usize, total: f64) -> Vec<Bucket> {
        let depth = rows.div_ceil(self.max_buckets);
        let mut buckets = Vec::with_capacity(self.max_buckets.min(runs.len()));

        let mut start = 0;
        let mut count = 0;
        for (i, (_, run)) in runs.iter().enumerate() {
            count += run;
            if count >= depth || i + 1 == runs.len() {
                let lower = Point::new(runs[start].0.clone());
                let upper = Point::new(runs[i].0.clone());
                let distinct = (i + 1 - start) as f64;
                buckets.push(Bucket::new(lower, upper, true, true, count as f64 / total, distinct));
                start = i + 1;
                count = 0;
            }
        }
        buckets
    }

    fn frequent_value_buckets(
        &self,
        mut runs: Vec<(&SqlValue, usize)>,
        total: f64,
        null_freq: f64,
    ) -> Histogram {
        runs.sort_by(|a, b| b.1.cmp(&a.1));
        let rest = runs.split_off(runs.len().min(self.max_buckets));
        runs.sort_by(|a, b| a.0.stats_cmp(b.0).unwrap_or(Ordering::Equal));

        let buckets = runs
            .into_iter()
            .map(|(value, count)| Bucket::singleton_at(Point::new(value.clone()), count as f64 / total))
            .collect();
        let distinct_remaining = rest.len() as f64;
        let freq_remaining = rest.iter().map(|(_, count)| *count as f64).sum::<f64>() / total;
        Histogram::with_stats(buckets, true, null_freq, distinct_remaining, freq_remaining)
    }
}

/// Collapse sorted values into (value, occurrences) runs
fn value_runs<'a>(sorted: &[&'a SqlValue]) -> Vec<(&'a SqlValue, usize)> {
    let mut runs: Vec<(&SqlValue, usize)> = Vec::new();
    for &value in sorted {
        match runs.last_mut() {
            Some((last, count)) if last.stats_cmp(value) == Some(Ordering::Equal) => *count += 1,
            _ => runs.push((value, 1)),
        }
    }
    runs
}

/// Reservoir sampling: single-pass, constant memory
///
/// Knuth's Algorithm R - every value ends up in the sample with equal
/// probability
fn reservoir_sample<T: Clone>(rows: &[T], k: usize, rng: &mut impl Rng) -> Vec<T> {
    let k = k.min(rows.len());
    if k == 0 {
        return Vec::new();
    }

    let mut reservoir: Vec<T> = rows.iter().take(k).cloned().collect();
    for (i, row) in rows.iter().enumerate().skip(k) {
        let j = rng.gen_range(0..=i);
        if j < k {
            reservoir[j] = row.clone();
        }
    }
    reservoir
}

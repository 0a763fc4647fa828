// ============================================================================
// Skew estimation
// ============================================================================

use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::Histogram;
use crate::config::{StatsConfig, DEFAULT_SKEW_SAMPLE_SIZE, EPSILON};

/// Skew of a histogram whose rows are spread evenly
const NO_SKEW: f64 = 1.0;

impl Histogram {
    /// Estimate skew with the default sample size and an entropy-seeded source
    pub fn estimate_skew(&mut self) -> f64 {
        let mut rng = StdRng::from_entropy();
        self.estimate_skew_with(DEFAULT_SKEW_SAMPLE_SIZE, &mut rng)
    }

    /// Estimate skew using the sample size and seed of `config`
    pub fn estimate_skew_with_config(&mut self, config: &StatsConfig) -> f64 {
        let mut rng = match config.skew_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.estimate_skew_with(config.skew_sample_size, &mut rng)
    }

    /// Estimate skew by sampling values from the buckets
    ///
    /// Buckets are picked with probability proportional to their frequency
    /// and a value is drawn uniformly from the chosen one. The result is
    /// `1 + |m3| / m2^1.5` over the sample's central moments, so 1.0 means
    /// no skew. It is cached on the histogram.
    ///
    /// # Arguments
    /// * `sample_size` - Number of values to draw
    /// * `rng` - Random source
    pub fn estimate_skew_with<R: Rng>(&mut self, sample_size: usize, rng: &mut R) -> f64 {
        let skew = self.compute_skew(sample_size, rng);
        self.skew = Some(skew);
        skew
    }

    fn compute_skew<R: Rng>(&self, sample_size: usize, rng: &mut R) -> f64 {
        if sample_size == 0
            || !self.is_normalized()
            || self.buckets.is_empty()
            || !self.buckets.iter().all(|b| b.can_sample())
        {
            return NO_SKEW;
        }

        let mut cumulative = Vec::with_capacity(self.buckets.len());
        let mut total = 0.0;
        for bucket in &self.buckets {
            total += bucket.frequency();
            cumulative.push(total);
        }
        if total <= EPSILON {
            return NO_SKEW;
        }

        let mut samples = Vec::with_capacity(sample_size);
        for _ in 0..sample_size {
            let draw = rng.gen::<f64>() * total;
            let index = cumulative.partition_point(|&c| c <= draw).min(self.buckets.len() - 1);
            if let Some(value) = self.buckets[index].sample(rng) {
                samples.push(value);
            }
        }
        if samples.is_empty() {
            return NO_SKEW;
        }

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let (sum2, sum3) = samples.iter().fold((0.0, 0.0), |(s2, s3), x| {
            let d = x - mean;
            (s2 + d * d, s3 + d * d * d)
        });
        let m2 = sum2 / n;
        let m3 = sum3 / n;
        trace!("skew sample of {} values: mean {:.4}, m2 {:.4}, m3 {:.4}", n, mean, m2, m3);

        if m2 <= EPSILON {
            return NO_SKEW;
        }
        NO_SKEW + (m3 / m2.powf(1.5)).abs()
    }
}

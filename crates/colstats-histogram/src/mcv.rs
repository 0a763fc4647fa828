//! Most-common-values lists
//!
//! ANALYZE reports the most frequent values of a column separately from its
//! equal-depth histogram. This module turns such a list into a histogram of
//! singleton buckets and merges it into the plain histogram, splitting plain
//! buckets around the values the list already accounts for.

use std::cmp::Ordering;

use colstats_types::SqlValue;
use log::debug;

use crate::{
    bucket::Bucket,
    config::{EPSILON, MCV_SELECTION_THRESHOLD, MIN_DISTINCT},
    error::StatsError,
    histogram::Histogram,
    point::Point,
};

impl Histogram {
    /// Histogram of singleton buckets, one per most common value
    ///
    /// # Arguments
    /// * `values` - The most common values, in any order
    /// * `frequencies` - Fraction of rows holding each value
    ///
    /// NULL entries are skipped and repeated values have their frequencies
    /// added up.
    pub fn from_mcvs(values: &[SqlValue], frequencies: &[f64]) -> Result<Histogram, StatsError> {
        if values.len() != frequencies.len() {
            return Err(StatsError::InvalidHistogram(format!(
                "{} most common values but {} frequencies",
                values.len(),
                frequencies.len()
            )));
        }

        let mut pairs: Vec<(&SqlValue, f64)> = values
            .iter()
            .zip(frequencies.iter().copied())
            .filter(|(value, _)| !value.is_null())
            .collect();
        if let Some(frequency) = pairs.iter().map(|(_, f)| *f).find(|f| !(0.0..=1.0).contains(f)) {
            return Err(StatsError::InvalidHistogram(format!(
                "most common value frequency {} outside [0, 1]",
                frequency
            )));
        }

        let mut incomparable = None;
        pairs.sort_by(|(a, _), (b, _)| {
            a.stats_cmp(b).unwrap_or_else(|| {
                incomparable.get_or_insert_with(|| (a.type_name(), b.type_name()));
                Ordering::Equal
            })
        });
        if let Some((left, right)) = incomparable {
            return Err(StatsError::IncomparableValues {
                left: left.to_string(),
                right: right.to_string(),
            });
        }

        let mut buckets: Vec<Bucket> = Vec::with_capacity(pairs.len());
        for (value, frequency) in pairs {
            let point = Point::new(value.clone());
            match buckets.last_mut() {
                Some(last) if last.lower().equals(&point) => {
                    last.set_frequency(last.frequency() + frequency);
                }
                _ => buckets.push(Bucket::singleton_at(point, frequency)),
            }
        }

        let histogram = Histogram::from_parts(buckets, true, 0.0, 0.0, 0.0);
        if !histogram.is_valid() {
            return Err(StatsError::InvalidHistogram(
                "most common value frequencies add up to more than 1".to_string(),
            ));
        }
        Ok(histogram)
    }
}

/// Combine a most-common-values histogram with an equal-depth histogram
///
/// Buckets of `hist` holding most common values are split around them; the
/// pieces share the bucket's frequency and distinct count in proportion to
/// their width. When the values cannot be ordered the two histograms cannot
/// be interleaved, and the one describing the larger share of rows wins.
pub fn merge_mcv_histogram(mcv: &Histogram, hist: &Histogram) -> Histogram {
    if mcv.buckets().is_empty() {
        return hist.clone();
    }
    if hist.buckets().is_empty() {
        return mcv.clone();
    }

    let capabilities = mcv.capabilities().intersect(hist.capabilities());
    if !capabilities.is_orderable {
        debug!("most common values of a non-orderable type are not merged");
        return if mcv.frequency() > MCV_SELECTION_THRESHOLD { mcv.clone() } else { hist.clone() };
    }

    let buckets = merge_buckets(mcv.buckets(), hist.buckets());
    Histogram::from_parts(
        buckets,
        true,
        hist.null_freq(),
        hist.distinct_remaining(),
        hist.freq_remaining(),
    )
    .with_capabilities(capabilities)
}

fn merge_buckets(mcvs: &[Bucket], plain: &[Bucket]) -> Vec<Bucket> {
    let mut merged = Vec::with_capacity(mcvs.len() + plain.len());
    let (mut i, mut j) = (0, 0);

    while i < mcvs.len() && j < plain.len() {
        let value = &mcvs[i];
        let bucket = &plain[j];
        if value.is_before(bucket) {
            merged.push(value.clone());
            i += 1;
        } else if bucket.is_before(value) {
            merged.push(bucket.clone());
            j += 1;
        } else {
            let held = mcvs[i..].iter().take_while(|m| bucket.subsumes(m)).count();
            merged.extend(split_bucket(bucket, &mcvs[i..i + held]));
            i += held.max(1);
            j += 1;
        }
    }
    merged.extend_from_slice(&mcvs[i..]);
    merged.extend_from_slice(&plain[j..]);
    merged
}

/// Split a plain bucket around the most common values it holds
fn split_bucket(bucket: &Bucket, values: &[Bucket]) -> Vec<Bucket> {
    let (Some(first), Some(last)) = (values.first(), values.last()) else {
        return vec![bucket.clone()];
    };

    let mut pieces = Vec::with_capacity(values.len() * 2 + 1);
    pieces.extend(valid_piece(bucket.lower(), first.lower(), bucket.is_lower_closed(), false));
    for pair in values.windows(2) {
        pieces.push(pair[0].clone());
        pieces.extend(valid_piece(pair[0].lower(), pair[1].lower(), false, false));
    }
    pieces.push(last.clone());
    pieces.extend(valid_piece(last.lower(), bucket.upper(), false, bucket.is_upper_closed()));

    let distinct = (bucket.distinct() - values.len() as f64).max(MIN_DISTINCT);
    spread_over_pieces(&mut pieces, bucket.frequency(), distinct);
    pieces
}

/// A zero-frequency piece, if the bounds enclose at least one value
fn valid_piece(lower: &Point, upper: &Point, lower_closed: bool, upper_closed: bool) -> Option<Bucket> {
    if upper.less_than(lower) {
        return None;
    }
    if lower.equals(upper) {
        return (lower_closed && upper_closed)
            .then(|| Bucket::new(lower.clone(), upper.clone(), true, true, 0.0, 0.0));
    }
    if lower.value().get_type().is_integral() {
        let open_ends = f64::from(u8::from(!lower_closed) + u8::from(!upper_closed));
        if upper.distance(lower) - open_ends < 0.0 {
            return None;
        }
    }
    Some(Bucket::new(lower.clone(), upper.clone(), lower_closed, upper_closed, 0.0, 0.0))
}

/// Share frequency and distinct count among non-singleton pieces by width
fn spread_over_pieces(pieces: &mut [Bucket], frequency: f64, distinct: f64) {
    let total_width: f64 = pieces.iter().filter(|p| !p.is_singleton()).map(Bucket::width).sum();
    if total_width <= EPSILON {
        return;
    }
    for piece in pieces.iter_mut().filter(|p| !p.is_singleton()) {
        let share = piece.width() / total_width;
        piece.set_frequency(frequency * share);
        piece.set_distinct(distinct * share);
    }
}

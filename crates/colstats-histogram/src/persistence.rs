// ============================================================================
// Persisted Column Statistics
// ============================================================================
//
// Histograms are exchanged as flat records: one per column with its null and
// remainder statistics, and one record per bucket. Loading a record checks
// every invariant a histogram relies on, so transforms never see malformed
// input from disk.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use colstats_types::SqlValue;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{bucket::Bucket, error::StatsError, histogram::Histogram, point::Point};

/// One bucket of a persisted histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketRecord {
    pub lower_bound: SqlValue,
    pub upper_bound: SqlValue,
    pub lower_closed: bool,
    pub upper_closed: bool,
    pub frequency: f64,
    pub distinct: f64,
}

/// Persisted statistics of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedColumnStats {
    pub column_id: u32,
    /// Average width of a value in bytes
    pub width: f64,
    pub null_freq: f64,
    pub distinct_remaining: f64,
    pub freq_remaining: f64,
    pub buckets: Vec<BucketRecord>,
}

impl DerivedColumnStats {
    /// Serialize to a JSON string
    pub fn to_json(&self, pretty: bool) -> Result<String, StatsError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, StatsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the record to a JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), StatsError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a record from a JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, StatsError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

impl Histogram {
    /// Flatten into a persisted record
    ///
    /// # Arguments
    /// * `column_id` - Identifier of the column described
    /// * `width` - Average value width in bytes
    pub fn to_record(&self, column_id: u32, width: f64) -> DerivedColumnStats {
        let buckets = self
            .buckets()
            .iter()
            .map(|b| BucketRecord {
                lower_bound: b.lower().value().clone(),
                upper_bound: b.upper().value().clone(),
                lower_closed: b.is_lower_closed(),
                upper_closed: b.is_upper_closed(),
                frequency: b.frequency(),
                distinct: b.distinct(),
            })
            .collect();
        DerivedColumnStats {
            column_id,
            width,
            null_freq: self.null_freq(),
            distinct_remaining: self.distinct_remaining(),
            freq_remaining: self.freq_remaining(),
            buckets,
        }
    }

    /// Rebuild a histogram from a persisted record
    ///
    /// # Errors
    /// `InvalidBucket` or `InvalidHistogram` when the record breaks a
    /// histogram invariant.
    pub fn from_record(record: &DerivedColumnStats) -> Result<Histogram, StatsError> {
        Self::checked_from_record(record).map_err(|err| {
            warn!("rejecting statistics of column {}: {}", record.column_id, err);
            err
        })
    }

    fn checked_from_record(record: &DerivedColumnStats) -> Result<Histogram, StatsError> {
        check_fraction("null frequency", record.null_freq)?;
        check_fraction("remaining frequency", record.freq_remaining)?;
        if !is_count(record.distinct_remaining) {
            return Err(StatsError::InvalidHistogram(format!(
                "remaining distinct count {} is not a valid count",
                record.distinct_remaining
            )));
        }

        let buckets =
            record.buckets.iter().map(bucket_from_record).collect::<Result<Vec<_>, _>>()?;
        let histogram = Histogram::from_parts(
            buckets,
            true,
            record.null_freq,
            record.distinct_remaining,
            record.freq_remaining,
        );
        if !histogram.is_valid() {
            return Err(StatsError::InvalidHistogram(
                "buckets overlap, are out of order, or frequencies exceed 1".to_string(),
            ));
        }
        Ok(histogram)
    }
}

fn check_fraction(what: &str, value: f64) -> Result<(), StatsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StatsError::InvalidHistogram(format!("{} {} outside [0, 1]", what, value)))
    }
}

fn is_count(value: f64) -> bool {
    value >= 0.0 && value.is_finite()
}

fn bucket_from_record(record: &BucketRecord) -> Result<Bucket, StatsError> {
    let lower = Point::new(record.lower_bound.clone());
    let upper = Point::new(record.upper_bound.clone());
    if lower.is_null() || upper.is_null() {
        return Err(StatsError::InvalidBucket("NULL bucket bound".to_string()));
    }
    if record.lower_bound.stats_cmp(&record.upper_bound).is_none() {
        return Err(StatsError::IncomparableValues {
            left: record.lower_bound.type_name().to_string(),
            right: record.upper_bound.type_name().to_string(),
        });
    }
    if upper.less_than(&lower) {
        return Err(StatsError::InvalidBucket(format!("lower bound {} above upper bound {}", lower, upper)));
    }
    if lower.equals(&upper) && !(record.lower_closed && record.upper_closed) {
        return Err(StatsError::InvalidBucket(format!("empty interval at {}", lower)));
    }
    if !(0.0..=1.0).contains(&record.frequency) || !is_count(record.distinct) {
        return Err(StatsError::InvalidBucket(format!(
            "frequency {} or distinct count {} out of range",
            record.frequency, record.distinct
        )));
    }
    Ok(Bucket::new(
        lower,
        upper,
        record.lower_closed,
        record.upper_closed,
        record.frequency,
        record.distinct,
    ))
}

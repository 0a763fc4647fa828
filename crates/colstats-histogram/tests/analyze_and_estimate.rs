use colstats_histogram::*;
use rand::{rngs::StdRng, SeedableRng};

fn approx(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() < tolerance
}

fn integers(range: std::ops::Range<i64>) -> Vec<SqlValue> {
    range.map(SqlValue::Integer).collect()
}

// ============================================================================
// Built histograms feeding transforms
// ============================================================================

#[test]
fn test_filter_estimates_on_built_histogram() {
    let values = integers(0..1000);
    let h = HistogramBuilder::new(10).build(&values).unwrap();
    assert_eq!(h.bucket_count(), 10);

    // about a quarter of the values lie below 250
    let (below, scale) = h.filter_normalized(StatsCmpType::Lt, &Point::from(250));
    assert!(below.is_normalized());
    assert!(approx(1.0 / scale, 0.25, 0.01), "selectivity {}", 1.0 / scale);

    // one value out of a thousand
    let (equal, scale) = h.filter_normalized(StatsCmpType::Eq, &Point::from(500));
    assert_eq!(equal.bucket_count(), 1);
    assert!(approx(1.0 / scale, 0.001, 1e-6));
}

#[test]
fn test_join_of_built_histograms() {
    let orders = HistogramBuilder::new(20).build(&integers(0..2000)).unwrap();
    let customers = HistogramBuilder::new(20).build(&integers(0..500)).unwrap();

    let (joined, scale) = orders.join_normalized(StatsCmpType::Eq, 2000.0, &customers, 500.0);
    assert!(joined.is_well_defined());
    assert!(joined.is_normalized());
    assert!(approx(scale, 2000.0, 1e-6));
    // each customer matches one order
    assert!(approx(2000.0 * 500.0 / scale, 500.0, 1e-6));
}

#[test]
fn test_anti_join_of_built_histograms() {
    let all = HistogramBuilder::new(10).build(&integers(0..100)).unwrap();
    let low = HistogramBuilder::new(10).build(&integers(0..50)).unwrap();
    let (remaining, scale) = all.anti_join_normalized(StatsCmpType::Eq, 100.0, &low, false);
    assert!(remaining.is_valid());
    assert!(remaining.buckets().iter().all(|b| !b.contains(&Point::from(10))));
    // open pieces left between matched integer ranges keep a little mass
    assert!(scale > 1.7 && scale <= 2.0 + 1e-9, "anti join scale {}", scale);
}

#[test]
fn test_group_by_on_built_histogram() {
    let values: Vec<SqlValue> = (0..1000).map(|i| SqlValue::Integer(i % 40)).collect();
    let h = HistogramBuilder::new(8).build(&values).unwrap();
    let (_, groups) = h.group_by(1000.0);
    assert!(approx(groups, 40.0, 1e-9));
}

#[test]
fn test_sampled_histogram_skew() {
    let mut values = integers(0..100);
    values.extend(std::iter::repeat(SqlValue::Integer(0)).take(900));
    let builder = HistogramBuilder::new(10).with_sampling(SampleSize::Adaptive);
    let mut rng = StdRng::seed_from_u64(42);
    let mut skewed = builder.build_with_rng(&values, &mut rng).unwrap();

    let mut uniform = HistogramBuilder::new(10).build(&integers(0..1000)).unwrap();

    let config = StatsConfig::new().with_skew_seed(42);
    let skewed_estimate = skewed.estimate_skew_with_config(&config);
    let uniform_estimate = uniform.estimate_skew_with_config(&config);
    assert!(skewed_estimate > uniform_estimate);
    assert_eq!(skewed.skew(), Some(skewed_estimate));
}

// ============================================================================
// Most common values
// ============================================================================

#[test]
fn test_mcv_merge_then_filter() {
    let mcv = Histogram::from_mcvs(&[SqlValue::Integer(42)], &[0.5]).unwrap();
    let plain = Histogram::new(vec![Bucket::new(
        Point::from(0),
        Point::from(100),
        true,
        true,
        0.5,
        101.0,
    )]);
    let merged = merge_mcv_histogram(&mcv, &plain);
    assert!(merged.is_valid());
    assert!(merged.is_normalized());

    let hot = merged.filter(StatsCmpType::Eq, &Point::from(42));
    assert!(approx(hot.frequency(), 0.5, 1e-9));

    let cold = merged.filter(StatsCmpType::Eq, &Point::from(7));
    assert!(cold.frequency() < 0.01);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_persisted_statistics_survive_a_file() {
    let mut values = integers(0..300);
    values.extend(std::iter::repeat(SqlValue::Null).take(100));
    let h = HistogramBuilder::new(6).build(&values).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.json");
    h.to_record(12, config::DEFAULT_COLUMN_WIDTH).save_json(&path).unwrap();

    let record = DerivedColumnStats::load_json(&path).unwrap();
    assert_eq!(record.column_id, 12);
    let restored = Histogram::from_record(&record).unwrap();
    assert_eq!(restored, h);
    assert!(approx(restored.null_freq(), 0.25, 1e-12));
}

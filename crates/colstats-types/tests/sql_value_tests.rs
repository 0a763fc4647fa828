use colstats_types::*;

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_integer_ordering() {
    assert!(SqlValue::Integer(1) < SqlValue::Integer(2));
    assert!(SqlValue::Integer(2) > SqlValue::Integer(1));
}

#[test]
fn test_type_mismatch_is_incomparable() {
    assert_eq!(SqlValue::Integer(1).partial_cmp(&SqlValue::Double(1.0)), None);
    assert_eq!(
        SqlValue::Integer(1).stats_cmp(&SqlValue::Double(1.0)),
        Some(std::cmp::Ordering::Equal)
    );
}

#[test]
fn test_cross_kind_numeric_order() {
    let mut values = vec![SqlValue::Double(2.5), SqlValue::Integer(1), SqlValue::Bigint(3)];
    values.sort_by(|a, b| a.stats_cmp(b).unwrap());
    assert_eq!(values, vec![SqlValue::Integer(1), SqlValue::Double(2.5), SqlValue::Bigint(3)]);
}

#[test]
fn test_text_never_compares_to_numbers() {
    let text = SqlValue::Varchar("1".to_string());
    assert_eq!(text.stats_cmp(&SqlValue::Integer(1)), None);
    assert_eq!(SqlValue::Null.stats_cmp(&SqlValue::Null), None);
}

// ============================================================================
// Capabilities and serialization
// ============================================================================

#[test]
fn test_capabilities_follow_type() {
    let text = SqlValue::Varchar("abc".to_string());
    assert_eq!(TypeCapabilities::of_value(&text), TypeCapabilities::text());
    assert_eq!(text.get_type(), DataType::Varchar);
    assert_eq!(text.type_name(), "VARCHAR");
}

#[test]
fn test_serde_round_trip_preserves_kind() {
    let values = vec![
        SqlValue::Integer(-4),
        SqlValue::Unsigned(9),
        SqlValue::Double(0.1),
        SqlValue::Varchar("x".to_string()),
        SqlValue::Date(12),
        SqlValue::Null,
    ];
    let json = serde_json::to_string(&values).unwrap();
    let back: Vec<SqlValue> = serde_json::from_str(&json).unwrap();
    assert_eq!(values, back);
}

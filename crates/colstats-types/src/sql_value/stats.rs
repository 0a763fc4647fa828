//! Statistics view of a value
//!
//! Histogram arithmetic needs distances between bounds, the next value in an
//! integer domain, and an ordering that also works across numeric kinds. All
//! three are defined here on top of the plain value model.

use std::cmp::Ordering;

use crate::sql_value::SqlValue;

impl SqlValue {
    /// Position of this value on the real line, if it has one
    ///
    /// Text and NULL have no numeric image.
    pub fn to_stats_double(&self) -> Option<f64> {
        match self {
            SqlValue::Integer(i) | SqlValue::Bigint(i) => Some(*i as f64),
            SqlValue::Smallint(i) => Some(f64::from(*i)),
            SqlValue::Unsigned(u) => Some(*u as f64),
            SqlValue::Numeric(f) | SqlValue::Double(f) => Some(*f),
            SqlValue::Float(f) | SqlValue::Real(f) => Some(f64::from(*f)),
            SqlValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            SqlValue::Date(d) => Some(f64::from(*d)),
            SqlValue::Time(t) | SqlValue::Timestamp(t) => Some(*t as f64),
            SqlValue::Character(_) | SqlValue::Varchar(_) | SqlValue::Null => None,
        }
    }

    /// The next value of an integer domain, `None` on overflow or for
    /// non-integral kinds
    pub fn successor(&self) -> Option<SqlValue> {
        match self {
            SqlValue::Integer(i) => i.checked_add(1).map(SqlValue::Integer),
            SqlValue::Bigint(i) => i.checked_add(1).map(SqlValue::Bigint),
            SqlValue::Smallint(i) => i.checked_add(1).map(SqlValue::Smallint),
            SqlValue::Unsigned(u) => u.checked_add(1).map(SqlValue::Unsigned),
            SqlValue::Date(d) => d.checked_add(1).map(SqlValue::Date),
            _ => None,
        }
    }

    /// Ordering for statistics purposes
    ///
    /// Same-kind values use their natural order; numeric values of different
    /// kinds (e.g. INTEGER against DOUBLE) compare through their stats doubles.
    pub fn stats_cmp(&self, other: &SqlValue) -> Option<Ordering> {
        if let Some(ordering) = self.partial_cmp(other) {
            return Some(ordering);
        }
        match (self.to_stats_double(), other.to_stats_double()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_double_mapping() {
        assert_eq!(SqlValue::Integer(7).to_stats_double(), Some(7.0));
        assert_eq!(SqlValue::Boolean(true).to_stats_double(), Some(1.0));
        assert_eq!(SqlValue::Date(19000).to_stats_double(), Some(19000.0));
        assert_eq!(SqlValue::Varchar("x".to_string()).to_stats_double(), None);
        assert_eq!(SqlValue::Null.to_stats_double(), None);
    }

    #[test]
    fn test_successor() {
        assert_eq!(SqlValue::Integer(5).successor(), Some(SqlValue::Integer(6)));
        assert_eq!(SqlValue::Smallint(i16::MAX).successor(), None);
        assert_eq!(SqlValue::Double(1.5).successor(), None);
        assert_eq!(SqlValue::Date(3).successor(), Some(SqlValue::Date(4)));
    }

    #[test]
    fn test_stats_cmp_across_numeric_kinds() {
        assert_eq!(
            SqlValue::Integer(2).stats_cmp(&SqlValue::Double(2.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            SqlValue::Bigint(3).stats_cmp(&SqlValue::Integer(3)),
            Some(Ordering::Equal)
        );
        assert_eq!(SqlValue::Integer(1).stats_cmp(&SqlValue::Varchar("1".to_string())), None);
    }
}

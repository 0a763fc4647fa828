//! Rendering of values inside histogram dumps

use std::fmt;

use crate::sql_value::SqlValue;

/// Whole floating values print without a fraction, text is quoted, and
/// temporal values carry their kind so bucket bounds read unambiguously.
impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Integer(v) | SqlValue::Bigint(v) => write!(f, "{}", v),
            SqlValue::Smallint(v) => write!(f, "{}", v),
            SqlValue::Unsigned(v) => write!(f, "{}", v),
            SqlValue::Numeric(v) | SqlValue::Double(v) => fmt_double(*v, f),
            SqlValue::Float(v) | SqlValue::Real(v) => fmt_double(f64::from(*v), f),
            SqlValue::Character(s) | SqlValue::Varchar(s) => write!(f, "'{}'", s.replace('\'', "''")),
            SqlValue::Boolean(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            SqlValue::Date(days) => write!(f, "DATE {}", days),
            SqlValue::Time(micros) => write!(f, "TIME {}", micros),
            SqlValue::Timestamp(micros) => write!(f, "TIMESTAMP {}", micros),
            SqlValue::Null => f.write_str("NULL"),
        }
    }
}

fn fmt_double(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v.is_infinite() {
        f.write_str(if v > 0.0 { "+inf" } else { "-inf" })
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        write!(f, "{:.0}", v)
    } else {
        write!(f, "{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_doubles_drop_fraction() {
        assert_eq!(SqlValue::Double(32.0).to_string(), "32");
        assert_eq!(SqlValue::Numeric(-4373.0).to_string(), "-4373");
        assert_eq!(SqlValue::Double(2.5).to_string(), "2.5");
    }

    #[test]
    fn test_unbounded_doubles() {
        assert_eq!(SqlValue::Double(f64::NAN).to_string(), "NaN");
        assert_eq!(SqlValue::Double(f64::NEG_INFINITY).to_string(), "-inf");
    }

    #[test]
    fn test_text_is_quoted_and_escaped() {
        assert_eq!(SqlValue::Varchar("abc".to_string()).to_string(), "'abc'");
        assert_eq!(SqlValue::Varchar("it's".to_string()).to_string(), "'it''s'");
        assert_eq!(SqlValue::Date(3).to_string(), "DATE 3");
    }
}

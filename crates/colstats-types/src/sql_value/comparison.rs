//! Same-kind ordering of values
//!
//! Only values of one domain are ordered here. Histograms that need to line
//! up INTEGER bounds against DOUBLE bounds go through `stats_cmp`, which falls
//! back to the numeric image of a value.

use std::cmp::Ordering;

use crate::sql_value::SqlValue;

impl PartialOrd for SqlValue {
    /// NULL, NaN and values of different kinds are unordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use SqlValue as V;
        match (self, other) {
            (V::Integer(a), V::Integer(b)) | (V::Bigint(a), V::Bigint(b)) => Some(a.cmp(b)),
            (V::Time(a), V::Time(b)) | (V::Timestamp(a), V::Timestamp(b)) => Some(a.cmp(b)),
            (V::Smallint(a), V::Smallint(b)) => Some(a.cmp(b)),
            (V::Unsigned(a), V::Unsigned(b)) => Some(a.cmp(b)),
            (V::Date(a), V::Date(b)) => Some(a.cmp(b)),
            (V::Boolean(a), V::Boolean(b)) => Some(a.cmp(b)),

            (V::Float(a), V::Float(b)) | (V::Real(a), V::Real(b)) => a.partial_cmp(b),
            (V::Double(a), V::Double(b)) | (V::Numeric(a), V::Numeric(b)) => a.partial_cmp(b),

            // fixed and variable width text share one collation
            (V::Character(a) | V::Varchar(a), V::Character(b) | V::Varchar(b)) => {
                Some(a.as_str().cmp(b.as_str()))
            }

            _ => None,
        }
    }
}

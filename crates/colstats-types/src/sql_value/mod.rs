//! Values that appear as histogram bounds and sample entries

mod comparison;
mod display;
mod stats;

use serde::{Deserialize, Serialize};

use crate::DataType;

/// A single column value
///
/// Temporal kinds hold their integer encodings so that every orderable kind
/// other than text has a direct numeric image for statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    Integer(i64),
    Smallint(i16),
    Bigint(i64),
    Unsigned(u64),
    Numeric(f64),

    Float(f32),
    Real(f32),
    Double(f64),

    Character(String),
    Varchar(String),

    Boolean(bool),

    /// Days since 1970-01-01
    Date(i32),
    /// Microseconds since midnight
    Time(i64),
    /// Microseconds since 1970-01-01 00:00:00
    Timestamp(i64),

    Null,
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// SQL name of the value's kind, used in error reports
    pub fn type_name(&self) -> &'static str {
        self.get_type().name()
    }

    pub fn get_type(&self) -> DataType {
        use SqlValue as V;
        match self {
            V::Integer(_) => DataType::Integer,
            V::Smallint(_) => DataType::Smallint,
            V::Bigint(_) => DataType::Bigint,
            V::Unsigned(_) => DataType::Unsigned,
            V::Numeric(_) => DataType::Numeric,
            V::Float(_) => DataType::Float,
            V::Real(_) => DataType::Real,
            V::Double(_) => DataType::DoublePrecision,
            V::Character(_) => DataType::Character,
            V::Varchar(_) => DataType::Varchar,
            V::Boolean(_) => DataType::Boolean,
            V::Date(_) => DataType::Date,
            V::Time(_) => DataType::Time,
            V::Timestamp(_) => DataType::Timestamp,
            V::Null => DataType::Null,
        }
    }
}

//! SQL Data Type definitions

use serde::{Deserialize, Serialize};

use crate::TypeCapabilities;

/// Column data types understood by the statistics layer
///
/// Length, precision and time zone details do not influence statistics, so
/// they are not carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    // Exact numeric types
    Integer,
    Smallint,
    Bigint,
    Unsigned,
    Numeric,

    // Approximate numeric types
    Float,
    Real,
    DoublePrecision,

    // Character string types
    Character,
    Varchar,

    Boolean,

    // Date/time types
    Date,
    Time,
    Timestamp,

    // Special type for NULL
    Null,
}

impl DataType {
    /// True for character string types
    pub fn is_text(&self) -> bool {
        matches!(self, DataType::Character | DataType::Varchar)
    }

    /// True for types whose values have a successor (integer-like domains)
    pub fn is_integral(&self) -> bool {
        matches!(
            self,
            DataType::Integer
                | DataType::Smallint
                | DataType::Bigint
                | DataType::Unsigned
                | DataType::Date
        )
    }

    /// Statistics capabilities of this type
    pub fn capabilities(&self) -> TypeCapabilities {
        if self.is_text() {
            TypeCapabilities::text()
        } else {
            TypeCapabilities::ordered()
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Integer => "INTEGER",
            DataType::Smallint => "SMALLINT",
            DataType::Bigint => "BIGINT",
            DataType::Unsigned => "UNSIGNED",
            DataType::Numeric => "NUMERIC",
            DataType::Float => "FLOAT",
            DataType::Real => "REAL",
            DataType::DoublePrecision => "DOUBLE PRECISION",
            DataType::Character => "CHAR",
            DataType::Varchar => "VARCHAR",
            DataType::Boolean => "BOOLEAN",
            DataType::Date => "DATE",
            DataType::Time => "TIME",
            DataType::Timestamp => "TIMESTAMP",
            DataType::Null => "NULL",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

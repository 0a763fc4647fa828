//! Comparison kinds understood by histogram transforms

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison between a column and a constant (filters) or between two
/// columns (joins)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsCmpType {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// IS DISTINCT FROM
    Idf,
    /// IS NOT DISTINCT FROM
    Indf,
    /// Anything without a bucket-level estimation rule
    Other,
}

impl StatsCmpType {
    /// Comparisons that need an ordered value domain
    pub fn is_range(self) -> bool {
        matches!(self, StatsCmpType::Lt | StatsCmpType::LtEq | StatsCmpType::Gt | StatsCmpType::GtEq)
    }

    /// Equality and its null-aware variant
    pub fn is_equality_like(self) -> bool {
        matches!(self, StatsCmpType::Eq | StatsCmpType::Indf)
    }

    /// Inequality and its null-aware variant
    pub fn is_inequality_like(self) -> bool {
        matches!(self, StatsCmpType::NotEq | StatsCmpType::Idf)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            StatsCmpType::Eq => "=",
            StatsCmpType::NotEq => "<>",
            StatsCmpType::Lt => "<",
            StatsCmpType::LtEq => "<=",
            StatsCmpType::Gt => ">",
            StatsCmpType::GtEq => ">=",
            StatsCmpType::Idf => "IS DISTINCT FROM",
            StatsCmpType::Indf => "IS NOT DISTINCT FROM",
            StatsCmpType::Other => "?",
        }
    }
}

impl fmt::Display for StatsCmpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

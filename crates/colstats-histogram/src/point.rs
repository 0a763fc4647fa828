//! Histogram bucket boundary values

use std::{cmp::Ordering, fmt};

use colstats_types::SqlValue;
use serde::{Deserialize, Serialize};

/// A typed boundary value of a bucket
///
/// NULL points never compare equal or less than anything; histograms track
/// nulls separately through their null frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point {
    value: SqlValue,
}

impl Point {
    pub fn new(value: SqlValue) -> Self {
        Point { value }
    }

    pub fn null() -> Self {
        Point { value: SqlValue::Null }
    }

    pub fn value(&self) -> &SqlValue {
        &self.value
    }

    pub fn into_value(self) -> SqlValue {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn order(&self, other: &Point) -> Option<Ordering> {
        if self.is_null() || other.is_null() {
            return None;
        }
        self.value.stats_cmp(&other.value)
    }

    pub fn equals(&self, other: &Point) -> bool {
        self.order(other) == Some(Ordering::Equal)
    }

    pub fn less_than(&self, other: &Point) -> bool {
        self.order(other) == Some(Ordering::Less)
    }

    pub fn less_than_or_equal(&self, other: &Point) -> bool {
        matches!(self.order(other), Some(Ordering::Less | Ordering::Equal))
    }

    pub fn greater_than(&self, other: &Point) -> bool {
        self.order(other) == Some(Ordering::Greater)
    }

    pub fn stats_double(&self) -> Option<f64> {
        self.value.to_stats_double()
    }

    /// True if the point has a numeric image usable for distances and sampling
    pub fn is_mappable(&self) -> bool {
        self.stats_double().is_some()
    }

    /// Distance `self - other` on the statistics domain
    ///
    /// Values without a numeric image are either equal (0) or one unit apart.
    pub fn distance(&self, other: &Point) -> f64 {
        match (self.stats_double(), other.stats_double()) {
            (Some(a), Some(b)) => a - b,
            _ => {
                if self.equals(other) {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    /// The next point of an integer domain
    pub fn successor(&self) -> Option<Point> {
        self.value.successor().map(Point::new)
    }

    /// The smaller of two points; `self` when incomparable
    pub fn min<'a>(&'a self, other: &'a Point) -> &'a Point {
        if other.less_than(self) {
            other
        } else {
            self
        }
    }

    /// The larger of two points; `self` when incomparable
    pub fn max<'a>(&'a self, other: &'a Point) -> &'a Point {
        if other.greater_than(self) {
            other
        } else {
            self
        }
    }
}

impl From<SqlValue> for Point {
    fn from(value: SqlValue) -> Self {
        Point::new(value)
    }
}

impl From<i64> for Point {
    fn from(value: i64) -> Self {
        Point::new(SqlValue::Integer(value))
    }
}

impl From<f64> for Point {
    fn from(value: f64) -> Self {
        Point::new(SqlValue::Double(value))
    }
}

impl From<&str> for Point {
    fn from(value: &str) -> Self {
        Point::new(SqlValue::Varchar(value.to_string()))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

//! Statistics capabilities of a value type
//!
//! Histogram code never looks types up in a global context. Instead every
//! histogram carries a descriptor saying what its bound type supports.

use serde::{Deserialize, Serialize};

use crate::{DataType, SqlValue};

/// What statistics code may assume about a column's value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeCapabilities {
    /// Values have a total order usable for range predicates and bucket sorting
    pub is_orderable: bool,
    /// Values map to an ordered numeric domain, enabling bucket-based joins
    pub is_ndv_mappable: bool,
}

impl TypeCapabilities {
    /// Capabilities of numeric, boolean and temporal types
    pub const fn ordered() -> Self {
        TypeCapabilities { is_orderable: true, is_ndv_mappable: true }
    }

    /// Capabilities of character string types: equality only
    pub const fn text() -> Self {
        TypeCapabilities { is_orderable: false, is_ndv_mappable: false }
    }

    /// Capabilities implied by a value. NULL carries no type and is treated as ordered.
    pub fn of_value(value: &SqlValue) -> Self {
        match value.get_type() {
            DataType::Null => Self::ordered(),
            ty => ty.capabilities(),
        }
    }

    /// Capabilities that hold for both sides of a binary operation
    pub fn intersect(self, other: TypeCapabilities) -> Self {
        TypeCapabilities {
            is_orderable: self.is_orderable && other.is_orderable,
            is_ndv_mappable: self.is_ndv_mappable && other.is_ndv_mappable,
        }
    }
}

impl Default for TypeCapabilities {
    fn default() -> Self {
        Self::ordered()
    }
}

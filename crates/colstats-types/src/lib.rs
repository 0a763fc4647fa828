//! Value model for column statistics
//!
//! This crate provides the typed values histogram bounds are made of:
//! - SQL values and their ordering and display
//! - Data type definitions
//! - The numeric image of a value used for distance and sampling
//! - Capability descriptors that tell statistics code whether a type can be
//!   ordered and mapped to a numeric domain

mod capabilities;
mod data_type;
mod sql_value;

pub use capabilities::TypeCapabilities;
pub use data_type::DataType;
pub use sql_value::SqlValue;

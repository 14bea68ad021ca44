//! Numeric transformations applied to extracted columns.

pub mod series;
pub mod statistics;

//! Analysis of generated point sets

/// Distance statistics and relative radius
pub mod statistics;

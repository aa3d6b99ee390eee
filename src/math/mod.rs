//! Mathematical utilities for the algorithm

/// Sphere packing radius estimates and radius schedules
pub mod packing;
/// Seeded uniform candidate generation
pub mod sampling;
/// Generic floating-point scalar trait
pub mod scalar;

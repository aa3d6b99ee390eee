//! Floating-point scalar abstraction shared by every generic component
//!
//! Points are `[F; D]` arrays where `F` is `f32` or `f64`. The trait only adds
//! lossless-enough conversions from the `f64` constants and `usize` counts the
//! algorithm mixes into its arithmetic.

use num_traits::{Float, NumCast};
use std::fmt::{Debug, Display};

/// Coordinate and weight type used throughout the crate
pub trait Scalar: Float + Debug + Display + Send + Sync + 'static {
    /// Convert an `f64` constant into this scalar type
    ///
    /// Yields NaN only if the value cannot be represented at all, which
    /// never happens for the primitive float types.
    fn from_f64(value: f64) -> Self {
        <Self as NumCast>::from(value).unwrap_or_else(Self::nan)
    }

    /// Convert an element count into this scalar type
    fn from_count(count: usize) -> Self {
        <Self as NumCast>::from(count).unwrap_or_else(Self::nan)
    }

    /// Widen to `f64` for reporting
    fn to_f64_lossy(self) -> f64 {
        <f64 as NumCast>::from(self).unwrap_or(f64::NAN)
    }
}

impl<T> Scalar for T where T: Float + Debug + Display + Send + Sync + 'static {}

//! Axis-aligned sampling domain

use crate::io::configuration::{DEFAULT_BOUNDS_MAX, DEFAULT_BOUNDS_MIN};
use crate::math::scalar::Scalar;

/// Axis-aligned box bounding the sampling domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<F, const D: usize> {
    /// Minimum corner (inclusive)
    pub min: [F; D],
    /// Maximum corner
    pub max: [F; D],
}

impl<F: Scalar, const D: usize> Bounds<F, D> {
    /// Create bounds from two corners
    pub const fn new(min: [F; D], max: [F; D]) -> Self {
        Self { min, max }
    }

    /// The unit hyper-cube `[0, 1]^D`
    pub fn unit() -> Self {
        Self {
            min: [F::from_f64(DEFAULT_BOUNDS_MIN); D],
            max: [F::from_f64(DEFAULT_BOUNDS_MAX); D],
        }
    }

    /// Length of the box along one dimension
    pub fn extent(&self, dim: usize) -> F {
        match (self.min.get(dim), self.max.get(dim)) {
            (Some(&lo), Some(&hi)) => hi - lo,
            _ => F::zero(),
        }
    }

    /// Product of the extents along all `D` dimensions
    pub fn volume(&self) -> F {
        (0..D).fold(F::one(), |volume, dim| volume * self.extent(dim))
    }

    /// Check if a point lies inside the box, faces included
    pub fn contains(&self, point: &[F; D]) -> bool {
        point
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .all(|(&p, (&lo, &hi))| p >= lo && p <= hi)
    }
}

impl<F: Scalar, const D: usize> Default for Bounds<F, D> {
    fn default() -> Self {
        Self::unit()
    }
}

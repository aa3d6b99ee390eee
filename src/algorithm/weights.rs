//! Weight functions estimating how crowded a sample's neighbourhood is
//!
//! A weight function receives two neighbouring points, their squared
//! distance and the current cutoff radius, and returns the contribution of
//! the second point to the first point's weight. Heavier samples are
//! eliminated first. Functions must be symmetric in the two points so that
//! removing a sample exactly cancels what it added to its neighbours.

use crate::math::scalar::Scalar;

/// Pairwise weight contribution used by the elimination engine
///
/// Implemented for every `Fn(&[F; D], &[F; D], F, F) -> F` closure, so
/// callers can pass a closure directly.
pub trait WeightFunction<F, const D: usize> {
    /// Weight that `p1` adds to `p0` at squared distance `dist2`
    fn weight(&self, p0: &[F; D], p1: &[F; D], dist2: F, d_max: F) -> F;
}

impl<F, const D: usize, T> WeightFunction<F, D> for T
where
    T: Fn(&[F; D], &[F; D], F, F) -> F,
{
    fn weight(&self, p0: &[F; D], p1: &[F; D], dist2: F, d_max: F) -> F {
        self(p0, p1, dist2, d_max)
    }
}

/// Falloff `(1 - d/d_max)^alpha` with optional weight limiting
///
/// With limiting, distances below `d_min` are treated as `d_min`, so a pair
/// of nearly coincident samples cannot dominate every other weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultWeight<F> {
    /// Falloff exponent
    pub alpha: F,
    /// Distance below which the weight stops growing
    pub d_min: Option<F>,
}

impl<F: Scalar> DefaultWeight<F> {
    /// Unlimited falloff with exponent `alpha`
    pub const fn new(alpha: F) -> Self {
        Self { alpha, d_min: None }
    }

    /// Falloff that clamps distances below `d_min`
    pub const fn limited(alpha: F, d_min: F) -> Self {
        Self {
            alpha,
            d_min: Some(d_min),
        }
    }

    /// Evaluate the falloff at distance `d`
    pub fn falloff(&self, d: F, d_max: F) -> F {
        let d = self.d_min.map_or(d, |d_min| d.max(d_min));
        // Clamp at zero so rounding just past d_max never yields NaN powers
        (F::one() - d / d_max).max(F::zero()).powf(self.alpha)
    }
}

impl<F: Scalar, const D: usize> WeightFunction<F, D> for DefaultWeight<F> {
    fn weight(&self, _p0: &[F; D], _p1: &[F; D], dist2: F, d_max: F) -> F {
        self.falloff(dist2.sqrt(), d_max)
    }
}

//! Seeded candidate generation

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::math::scalar::Scalar;
use crate::spatial::Bounds;

/// `count` points drawn uniformly from `bounds` with a reproducible seed
pub fn uniform_candidates<F: Scalar, const D: usize>(
    count: usize,
    bounds: &Bounds<F, D>,
    seed: u64,
) -> Vec<[F; D]> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut point = bounds.min;
            for (dim, coord) in point.iter_mut().enumerate() {
                let t = F::from_f64(rng.random::<f64>());
                *coord = *coord + t * bounds.extent(dim);
            }
            point
        })
        .collect()
}

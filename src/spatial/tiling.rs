//! Ghost point generation for periodic sampling domains
//!
//! A point closer than `d_max` to a face of the domain gets a copy shifted
//! by the domain extent across that face. Copies are shifted again across
//! every later dimension whose face is also close, so a corner point in `D`
//! dimensions yields up to `2^D - 1` ghosts. Ghosts keep the identity of
//! their source point and are tagged so they are never selected.

use bitvec::prelude::*;

use crate::math::scalar::Scalar;
use crate::spatial::bounds::Bounds;

/// Real points followed by their ghost copies
#[derive(Debug, Clone)]
pub struct TiledPoints<F, const D: usize> {
    /// Coordinates of every point, real points first
    pub points: Vec<[F; D]>,
    /// Identity of every point (ghosts carry their source's index)
    pub ids: Vec<usize>,
    /// Set for ghost points
    pub ghosts: BitVec,
}

impl<F: Scalar, const D: usize> TiledPoints<F, D> {
    /// Number of real points
    pub fn real_count(&self) -> usize {
        self.ghosts.count_zeros()
    }

    /// Number of ghost points
    pub fn ghost_count(&self) -> usize {
        self.ghosts.count_ones()
    }
}

/// Append ghost copies of every point within `d_max` of a domain face
pub fn tile_points<F: Scalar, const D: usize>(
    points: &[[F; D]],
    bounds: &Bounds<F, D>,
    d_max: F,
) -> TiledPoints<F, D> {
    let mut tiled = TiledPoints {
        points: points.to_vec(),
        ids: (0..points.len()).collect(),
        ghosts: bitvec![0; points.len()],
    };

    // (point, first dimension still to reflect across)
    let mut pending: Vec<([F; D], usize)> = Vec::with_capacity(D);

    for (index, point) in points.iter().enumerate() {
        pending.push((*point, 0));
        while let Some((current, first_dim)) = pending.pop() {
            for dim in first_dim..D {
                for ghost in reflections(&current, bounds, d_max, dim) {
                    tiled.points.push(ghost);
                    tiled.ids.push(index);
                    tiled.ghosts.push(true);
                    pending.push((ghost, dim + 1));
                }
            }
        }
    }

    tiled
}

// Copies of `point` shifted across the faces of `dim` that lie within `d_max`
fn reflections<F: Scalar, const D: usize>(
    point: &[F; D],
    bounds: &Bounds<F, D>,
    d_max: F,
    dim: usize,
) -> impl Iterator<Item = [F; D]> {
    let extent = bounds.extent(dim);
    let (Some(&coord), Some(&lo), Some(&hi)) =
        (point.get(dim), bounds.min.get(dim), bounds.max.get(dim))
    else {
        return [None, None].into_iter().flatten();
    };

    let shifted = |offset: F| {
        let mut ghost = *point;
        if let Some(c) = ghost.get_mut(dim) {
            *c = coord + offset;
        }
        ghost
    };

    let below = (hi - coord < d_max).then(|| shifted(-extent));
    let above = (coord - lo < d_max).then(|| shifted(extent));
    [below, above].into_iter().flatten()
}

//! Quality measures of a point set
//!
//! The relative radius compares the point set's Poisson disk radius (half
//! its minimum pairwise distance) to the densest packing of the same number
//! of points. Well-distributed blue-noise sets sit around 0.65-0.85; uniform
//! random sets sit far below.

use crate::io::error::Result;
use crate::math::{packing::max_poisson_disk_radius, scalar::Scalar};
use crate::spatial::KdTree;

/// Summary statistics of a point set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSetStats<F> {
    /// Number of points
    pub count: usize,
    /// Smallest distance between two distinct points
    pub min_distance: F,
    /// Mean distance from each point to its nearest neighbour
    pub mean_nearest_distance: F,
    /// Half the minimum distance over the densest-packing radius
    pub relative_radius: F,
}

impl<F: Scalar> PointSetStats<F> {
    /// Measure `points` as a sample set of a domain with volume `domain_size`
    ///
    /// Returns `Ok(None)` for fewer than two points.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimensions < 2` or `domain_size` is not positive.
    pub fn compute<const D: usize>(
        points: &[[F; D]],
        domain_size: F,
        dimensions: usize,
    ) -> Result<Option<Self>> {
        let distances = nearest_neighbor_distances(points);
        let (Some(min_distance), Some(mean_nearest_distance)) =
            (min_of(&distances), mean_of(&distances))
        else {
            return Ok(None);
        };

        let r_max = max_poisson_disk_radius(dimensions, points.len(), domain_size)?;
        Ok(Some(Self {
            count: points.len(),
            min_distance,
            mean_nearest_distance,
            relative_radius: min_distance / (F::from_f64(2.0) * r_max),
        }))
    }
}

/// Distance from every point to its nearest other point
///
/// Coincident points report zero. A single point has no neighbour and
/// yields an empty result.
pub fn nearest_neighbor_distances<F: Scalar, const D: usize>(points: &[[F; D]]) -> Vec<F> {
    if points.len() < 2 {
        return Vec::new();
    }
    let tree = KdTree::build(points);
    points
        .iter()
        .enumerate()
        .filter_map(|(index, point)| tree.nearest(point, Some(index)))
        .map(|neighbor| neighbor.dist2.sqrt())
        .collect()
}

/// Smallest distance between two points of the set
pub fn min_pairwise_distance<F: Scalar, const D: usize>(points: &[[F; D]]) -> Option<F> {
    min_of(&nearest_neighbor_distances(points))
}

/// Mean nearest-neighbour distance of the set
pub fn mean_nearest_neighbor_distance<F: Scalar, const D: usize>(points: &[[F; D]]) -> Option<F> {
    mean_of(&nearest_neighbor_distances(points))
}

/// Poisson disk radius of the set relative to the densest packing
///
/// # Errors
///
/// Returns an error if `dimensions < 2` or `domain_size` is not positive.
pub fn relative_radius<F: Scalar, const D: usize>(
    points: &[[F; D]],
    domain_size: F,
    dimensions: usize,
) -> Result<Option<F>> {
    Ok(PointSetStats::compute(points, domain_size, dimensions)?.map(|stats| stats.relative_radius))
}

fn min_of<F: Scalar>(values: &[F]) -> Option<F> {
    values.iter().copied().reduce(F::min)
}

fn mean_of<F: Scalar>(values: &[F]) -> Option<F> {
    if values.is_empty() {
        return None;
    }
    let total = values.iter().copied().fold(F::zero(), |sum, v| sum + v);
    Some(total / F::from_count(values.len()))
}

//! Static k-d tree answering radius and nearest-neighbour queries
//!
//! The tree is built once over a point slice and never modified. Every stored
//! slot remembers the position it had in the build input, an identity used by
//! callers to map duplicates back to their source, and whether it is a ghost
//! copy created for a periodic domain.

use bitvec::prelude::*;
use std::cmp::Ordering;

use crate::io::configuration::KD_LEAF_SIZE;
use crate::io::error::{AlgorithmError, Result};
use crate::math::scalar::Scalar;

/// A stored point reported by a query
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a, F, const D: usize> {
    /// Position of the point in the slice the tree was built from
    pub slot: usize,
    /// Identity recorded for the point at build time
    pub id: usize,
    /// Whether the point is a ghost copy of another point
    pub ghost: bool,
    /// Coordinates of the stored point
    pub point: &'a [F; D],
    /// Squared Euclidean distance to the query point
    pub dist2: F,
}

#[derive(Debug, Clone, Copy)]
enum Node<F> {
    /// Interior node splitting on `dim` at `value`
    Split {
        dim: usize,
        value: F,
        left: usize,
        right: usize,
    },
    /// Range `start..end` into the reordered point storage
    Leaf { start: usize, end: usize },
}

/// A k-d tree over `D`-dimensional points with per-slot identities
#[derive(Debug, Clone)]
pub struct KdTree<F, const D: usize> {
    nodes: Vec<Node<F>>,
    points: Vec<[F; D]>,
    slots: Vec<usize>,
    ids: Vec<usize>,
    ghosts: BitVec,
}

impl<F: Scalar, const D: usize> KdTree<F, D> {
    /// Build a tree where each point's identity is its position in `points`
    pub fn build(points: &[[F; D]]) -> Self {
        let ids: Vec<usize> = (0..points.len()).collect();
        let ghosts = bitvec![0; points.len()];
        Self::build_unchecked(points, &ids, &ghosts)
    }

    /// Build a tree with caller-supplied identities and ghost tags
    ///
    /// # Errors
    ///
    /// Returns an error if `ids` or `ghosts` differ in length from `points`.
    pub fn build_with_ids(points: &[[F; D]], ids: &[usize], ghosts: &BitSlice) -> Result<Self> {
        if ids.len() != points.len() || ghosts.len() != points.len() {
            return Err(AlgorithmError::InvalidPointData {
                reason: format!(
                    "{} points were given {} identities and {} ghost tags",
                    points.len(),
                    ids.len(),
                    ghosts.len()
                ),
            });
        }
        Ok(Self::build_unchecked(points, ids, ghosts))
    }

    fn build_unchecked(points: &[[F; D]], ids: &[usize], ghosts: &BitSlice) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            points: Vec::with_capacity(points.len()),
            slots: Vec::with_capacity(points.len()),
            ids: Vec::with_capacity(points.len()),
            ghosts: BitVec::with_capacity(points.len()),
        };
        if points.is_empty() {
            return tree;
        }

        let mut order: Vec<usize> = (0..points.len()).collect();
        tree.build_node(points, &mut order, 0);

        // Store points in leaf order so leaves scan contiguous memory
        for &slot in &order {
            if let (Some(point), Some(&id)) = (points.get(slot), ids.get(slot)) {
                tree.points.push(*point);
                tree.slots.push(slot);
                tree.ids.push(id);
                tree.ghosts
                    .push(ghosts.get(slot).as_deref().copied().unwrap_or(false));
            }
        }

        tree
    }

    fn build_node(&mut self, points: &[[F; D]], order: &mut [usize], start: usize) -> usize {
        let count = order.len();
        let node_index = self.nodes.len();

        if count <= KD_LEAF_SIZE {
            self.nodes.push(Node::Leaf {
                start,
                end: start + count,
            });
            return node_index;
        }

        let dim = widest_dimension(points, order);
        let median = count / 2;
        order.select_nth_unstable_by(median, |&a, &b| {
            coordinate(points, a, dim)
                .partial_cmp(&coordinate(points, b, dim))
                .unwrap_or(Ordering::Equal)
        });
        let value = order
            .get(median)
            .map_or_else(F::zero, |&slot| coordinate(points, slot, dim));

        // Placeholder until both children exist
        self.nodes.push(Node::Leaf { start: 0, end: 0 });

        let (lower, upper) = order.split_at_mut(median);
        let left = self.build_node(points, lower, start);
        let right = self.build_node(points, upper, start + median);

        if let Some(node) = self.nodes.get_mut(node_index) {
            *node = Node::Split {
                dim,
                value,
                left,
                right,
            };
        }

        node_index
    }

    /// Visit every stored point within `radius` of `point`
    ///
    /// The visitor receives each neighbour (the query point itself included
    /// when it is stored) together with the live squared search radius.
    /// Shrinking that value narrows the remainder of the search. Visiting
    /// order is unspecified.
    pub fn query_radius<V>(&self, point: &[F; D], radius: F, mut visitor: V)
    where
        V: FnMut(Neighbor<'_, F, D>, &mut F),
    {
        if self.nodes.is_empty() {
            return;
        }
        let mut radius2 = radius * radius;
        self.query_node(0, point, &mut radius2, &mut visitor);
    }

    fn query_node<V>(&self, node_index: usize, point: &[F; D], radius2: &mut F, visitor: &mut V)
    where
        V: FnMut(Neighbor<'_, F, D>, &mut F),
    {
        let Some(&node) = self.nodes.get(node_index) else {
            return;
        };

        match node {
            Node::Leaf { start, end } => {
                for pos in start..end {
                    let Some(stored) = self.points.get(pos) else {
                        continue;
                    };
                    let dist2 = squared_distance(point, stored);
                    if dist2 <= *radius2 {
                        visitor(self.neighbor_at(pos, stored, dist2), radius2);
                    }
                }
            }
            Node::Split {
                dim,
                value,
                left,
                right,
            } => {
                let query = point.get(dim).copied().unwrap_or_else(F::zero);
                let diff = query - value;
                let (near, far) = if query <= value {
                    (left, right)
                } else {
                    (right, left)
                };

                self.query_node(near, point, radius2, visitor);
                if diff * diff <= *radius2 {
                    self.query_node(far, point, radius2, visitor);
                }
            }
        }
    }

    /// Find the closest stored point whose identity differs from `exclude_id`
    pub fn nearest(&self, point: &[F; D], exclude_id: Option<usize>) -> Option<Neighbor<'_, F, D>> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best: Option<(usize, F)> = None;
        self.nearest_node(0, point, exclude_id, &mut best);
        best.and_then(|(pos, dist2)| {
            self.points
                .get(pos)
                .map(|stored| self.neighbor_at(pos, stored, dist2))
        })
    }

    fn nearest_node(
        &self,
        node_index: usize,
        point: &[F; D],
        exclude_id: Option<usize>,
        best: &mut Option<(usize, F)>,
    ) {
        let Some(&node) = self.nodes.get(node_index) else {
            return;
        };

        match node {
            Node::Leaf { start, end } => {
                for pos in start..end {
                    if exclude_id.is_some() && self.ids.get(pos).copied() == exclude_id {
                        continue;
                    }
                    let Some(stored) = self.points.get(pos) else {
                        continue;
                    };
                    let dist2 = squared_distance(point, stored);
                    if best.is_none_or(|(_, best_dist2)| dist2 < best_dist2) {
                        *best = Some((pos, dist2));
                    }
                }
            }
            Node::Split {
                dim,
                value,
                left,
                right,
            } => {
                let query = point.get(dim).copied().unwrap_or_else(F::zero);
                let diff = query - value;
                let (near, far) = if query <= value {
                    (left, right)
                } else {
                    (right, left)
                };

                self.nearest_node(near, point, exclude_id, best);
                if best.is_none_or(|(_, best_dist2)| diff * diff < best_dist2) {
                    self.nearest_node(far, point, exclude_id, best);
                }
            }
        }
    }

    fn neighbor_at<'a>(&self, pos: usize, stored: &'a [F; D], dist2: F) -> Neighbor<'a, F, D> {
        Neighbor {
            slot: self.slots.get(pos).copied().unwrap_or(pos),
            id: self.ids.get(pos).copied().unwrap_or(pos),
            ghost: self.ghosts.get(pos).as_deref().copied().unwrap_or(false),
            point: stored,
            dist2,
        }
    }

    /// Number of stored points, ghosts included
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the tree stores no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of stored ghost points
    pub fn ghost_count(&self) -> usize {
        self.ghosts.count_ones()
    }
}

/// Squared Euclidean distance between two points
#[inline]
pub fn squared_distance<F: Scalar, const D: usize>(a: &[F; D], b: &[F; D]) -> F {
    a.iter().zip(b).fold(F::zero(), |sum, (&x, &y)| {
        let d = x - y;
        sum + d * d
    })
}

fn coordinate<F: Scalar, const D: usize>(points: &[[F; D]], slot: usize, dim: usize) -> F {
    points
        .get(slot)
        .and_then(|point| point.get(dim))
        .copied()
        .unwrap_or_else(F::zero)
}

// Splitting along the largest extent keeps cells close to cubical
fn widest_dimension<F: Scalar, const D: usize>(points: &[[F; D]], order: &[usize]) -> usize {
    let mut best_dim = 0;
    let mut best_spread = F::neg_infinity();

    for dim in 0..D {
        let mut lo = F::infinity();
        let mut hi = F::neg_infinity();
        for &slot in order {
            let v = coordinate(points, slot, dim);
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if hi - lo > best_spread {
            best_spread = hi - lo;
            best_dim = dim;
        }
    }

    best_dim
}

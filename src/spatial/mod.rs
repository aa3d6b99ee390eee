//! Spatial data structures for neighbour search
//!
//! This module contains spatial-related functionality including:
//! - The sampling domain box
//! - A static k-d tree with radius queries
//! - Ghost point generation for periodic domains

/// Axis-aligned sampling domain
pub mod bounds;
/// k-d tree with identity-tagged slots
pub mod kdtree;
/// Periodic ghost copies of boundary points
pub mod tiling;

pub use bounds::Bounds;
pub use kdtree::{KdTree, Neighbor};

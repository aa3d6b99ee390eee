//! Weighted sample elimination for blue-noise point sets
//!
//! Given a large set of candidate points in any fixed dimension, the
//! algorithm keeps a smaller subset whose points are evenly spread with no
//! two too close together (Poisson disk or blue-noise sampling). Candidates
//! are weighted by how crowded their neighbourhood is and the heaviest one is
//! eliminated repeatedly. The output can also be ordered progressively so
//! that its prefixes are blue-noise sets of their own.
//!
//! ```
//! use sample_elimination::{EliminationParams, WeightedSampleElimination2};
//! use sample_elimination::math::sampling::uniform_candidates;
//! use sample_elimination::spatial::Bounds;
//!
//! let candidates = uniform_candidates(500, &Bounds::unit(), 7);
//! let mut selected = vec![[0.0_f64; 2]; 100];
//! WeightedSampleElimination2::new()
//!     .eliminate(&candidates, &mut selected, &EliminationParams::default())?;
//! # Ok::<(), sample_elimination::AlgorithmError>(())
//! ```

#![forbid(unsafe_code)]

/// Elimination engine, priority heap, and weight functions
pub mod algorithm;
/// Quality statistics of point sets
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Packing estimates, scalar conversions, and candidate generation
pub mod math;
/// Spatial index, sampling domain, and periodic tiling
pub mod spatial;

pub use algorithm::{
    EliminationConfig, EliminationParams, WeightedSampleElimination, WeightedSampleElimination2,
    WeightedSampleElimination3, WeightedSampleElimination4,
};
pub use io::error::{AlgorithmError, Result};

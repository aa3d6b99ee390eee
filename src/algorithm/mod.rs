/// Weighted sample elimination engine and its parameters
pub mod elimination;
/// Indexed max-heap with in-place key decrease
pub mod heap;
/// Observer hooks reporting elimination progress
pub mod observer;
/// Coarse-to-fine reordering of selected samples
pub mod progressive;
/// Pairwise weight functions
pub mod weights;

pub use elimination::{
    EliminationConfig, EliminationParams, WeightedSampleElimination, WeightedSampleElimination2,
    WeightedSampleElimination3, WeightedSampleElimination4,
};

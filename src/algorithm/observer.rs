//! Hooks for watching an elimination as it runs

use crate::algorithm::heap::IndexedMaxHeap;

/// State after one sample has been eliminated
#[derive(Debug, Clone, Copy)]
pub struct EliminationStep<'a, F> {
    /// 0 for the main pass, then 1, 2, ... for progressive passes
    pub pass: usize,
    /// Number of samples eliminated earlier in this pass
    pub iteration: usize,
    /// Index of the eliminated sample within the pass's point set
    pub local: usize,
    /// Index of the eliminated sample in the caller's input
    pub id: usize,
    /// Weight the sample had when it was eliminated
    pub weight: F,
    /// Samples still alive in this pass
    pub remaining: usize,
    /// Number of samples this pass keeps
    pub target: usize,
    /// Heap after the neighbours' weights were lowered
    pub heap: &'a IndexedMaxHeap<F>,
}

/// Receives progress events from the elimination engine
///
/// All methods default to doing nothing; `()` is the silent observer.
pub trait EliminationObserver<F> {
    /// A pass over `input_size` samples reducing them to `output_size` begins
    fn on_pass_start(&mut self, _pass: usize, _input_size: usize, _output_size: usize) {}

    /// Initial weights are assigned and the heap is built
    fn on_weights_ready(&mut self, _pass: usize, _heap: &IndexedMaxHeap<F>) {}

    /// One sample was eliminated
    fn on_step(&mut self, _step: &EliminationStep<'_, F>) {}

    /// The pass reached its target size
    fn on_pass_end(&mut self, _pass: usize) {}
}

impl<F> EliminationObserver<F> for () {}

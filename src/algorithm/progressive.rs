//! Progressive ordering of an eliminated sample set
//!
//! The selected samples are halved repeatedly: each pass eliminates half of
//! the current prefix with a radius grown to match the halved density, and
//! the eliminated half is left in place behind the survivors. The first
//! sample therefore survives the most passes, and every prefix whose length
//! appears in [`halving_schedule`] is itself a blue-noise set.

use crate::{
    algorithm::{
        elimination::WeightedSampleElimination, observer::EliminationObserver,
        weights::WeightFunction,
    },
    io::{configuration::MIN_PROGRESSIVE_SIZE, error::Result},
    math::{packing::progressive_radius_multiplier, scalar::Scalar},
};

/// Prefix lengths produced by progressively ordering `output_size` samples
///
/// Starts with `output_size` and halves until fewer than
/// [`MIN_PROGRESSIVE_SIZE`] samples would be split.
pub fn halving_schedule(output_size: usize) -> Vec<usize> {
    let mut schedule = vec![output_size];
    let mut size = output_size;
    while size >= MIN_PROGRESSIVE_SIZE {
        size /= 2;
        schedule.push(size);
    }
    schedule
}

impl<F: Scalar, const D: usize> WeightedSampleElimination<F, D> {
    /// Reorder `order` (indices into `input`) from coarse to fine
    pub(crate) fn refine_progressive<W, O>(
        &self,
        input: &[[F; D]],
        order: &mut [usize],
        d_max: F,
        dimensions: usize,
        weight: &W,
        observer: &mut O,
    ) -> Result<()>
    where
        W: WeightFunction<F, D>,
        O: EliminationObserver<F>,
    {
        let multiplier = progressive_radius_multiplier::<F>(dimensions);
        let mut d_max = d_max;
        let mut in_size = order.len();
        let mut pass = 1;

        while in_size >= MIN_PROGRESSIVE_SIZE {
            let out_size = in_size / 2;
            d_max = d_max * multiplier;

            let Some(prefix) = order.get_mut(..in_size) else {
                break;
            };
            let identities = prefix.to_vec();
            let points: Vec<[F; D]> = identities
                .iter()
                .filter_map(|&id| input.get(id).copied())
                .collect();

            let local_order =
                self.eliminate_pass(&points, &identities, out_size, d_max, weight, pass, observer)?;

            // Survivors move to the front, the eliminated half keeps its pass order
            for (slot, local) in prefix.iter_mut().zip(local_order) {
                if let Some(&id) = identities.get(local) {
                    *slot = id;
                }
            }

            in_size = out_size;
            pass += 1;
        }

        Ok(())
    }
}

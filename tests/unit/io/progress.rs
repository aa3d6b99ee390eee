//! Tests for the terminal progress observer

#[cfg(test)]
mod tests {
    use sample_elimination::algorithm::progressive::halving_schedule;
    use sample_elimination::io::progress::ProgressObserver;
    use sample_elimination::math::sampling::uniform_candidates;
    use sample_elimination::spatial::Bounds;
    use sample_elimination::{EliminationParams, WeightedSampleElimination2};

    // Tests that a hidden observer still tracks eliminated samples
    // Verified by skipping the final position update in on_pass_end
    #[test]
    fn test_hidden_observer_tracks_single_pass() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(700, &Bounds::unit(), 13);
        let mut output = vec![[0.0; 2]; 100];
        let mut observer = ProgressObserver::hidden();

        WeightedSampleElimination2::<f64>::new()
            .eliminate_observed_default(
                &candidates,
                &mut output,
                &EliminationParams::default(),
                &mut observer,
            )
            .expect("Failed to eliminate samples");
        observer.finish();

        assert_eq!(observer.passes(), 1);
        assert_eq!(observer.position(), 600);
    }

    // Tests that every progressive pass restarts the bar
    #[test]
    fn test_hidden_observer_counts_progressive_passes() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(200, &Bounds::unit(), 13);
        let mut output = vec![[0.0; 2]; 40];
        let mut observer = ProgressObserver::hidden();

        WeightedSampleElimination2::<f64>::new()
            .eliminate_observed_default(
                &candidates,
                &mut output,
                &EliminationParams::progressive(),
                &mut observer,
            )
            .expect("Failed to eliminate samples");

        assert_eq!(observer.passes(), halving_schedule(40).len());
        // The last pass reduces 5 samples to 2
        assert_eq!(observer.position(), 3);
    }

    // Tests that a fresh observer starts idle
    #[test]
    fn test_new_observer_is_idle() {
        let observer = ProgressObserver::default();

        assert_eq!(observer.passes(), 0);
        assert_eq!(observer.position(), 0);
        observer.finish();
    }
}

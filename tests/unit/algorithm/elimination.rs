//! Tests for the elimination engine configuration and call contract

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use sample_elimination::algorithm::weights::DefaultWeight;
    use sample_elimination::io::configuration::{DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA};
    use sample_elimination::math::sampling::uniform_candidates;
    use sample_elimination::spatial::Bounds;
    use sample_elimination::{
        AlgorithmError, EliminationConfig, EliminationParams, WeightedSampleElimination2,
        WeightedSampleElimination3,
    };

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // Tests the default parameter set of a new engine
    #[test]
    fn test_new_engine_uses_default_parameters() {
        let engine = WeightedSampleElimination2::<f64>::new();

        assert!(close(engine.alpha(), DEFAULT_ALPHA));
        assert!(close(engine.beta(), DEFAULT_BETA));
        assert!(close(engine.gamma(), DEFAULT_GAMMA));
        assert!(!engine.is_tiling());
        assert!(engine.is_weight_limiting());
        assert_eq!(engine.bounds_min(), &[0.0, 0.0]);
        assert_eq!(engine.bounds_max(), &[1.0, 1.0]);
        assert_eq!(engine.config(), &EliminationConfig::default());
    }

    // Tests that setters update the stored configuration
    #[test]
    fn test_setters_update_configuration() {
        let mut engine = WeightedSampleElimination2::<f64>::new();

        engine.set_tiling(true);
        engine.set_weight_limiting(false);
        engine.set_alpha(4.0);
        engine.set_beta(0.5);
        engine.set_gamma(2.0);
        engine.set_bounds_min([-1.0, 0.0]);
        engine.set_bounds_max([1.0, 3.0]);

        assert!(engine.is_tiling());
        assert!(!engine.is_weight_limiting());
        assert!(close(engine.alpha(), 4.0));
        assert!(close(engine.beta(), 0.5));
        assert!(close(engine.gamma(), 2.0));
        assert_eq!(engine.config().bounds, Bounds::new([-1.0, 0.0], [1.0, 3.0]));

        engine.set_bounds(Bounds::unit());
        assert_eq!(engine.bounds_max(), &[1.0, 1.0]);
    }

    // Tests the automatic radius for 100 samples in the unit square
    #[test]
    fn test_resolve_radius_defaults_to_twice_max_poisson_radius() {
        let engine = WeightedSampleElimination2::<f64>::new();
        let expected = 2.0 * (1.0 / (100.0 * 2.0 * 3.0_f64.sqrt())).sqrt();

        let automatic = engine
            .resolve_radius(&EliminationParams::default(), 100)
            .expect("Failed to resolve automatic radius");
        let non_positive = engine
            .resolve_radius(&EliminationParams::default().with_radius(-1.0), 100)
            .expect("Failed to resolve non-positive radius");
        let explicit = engine
            .resolve_radius(&EliminationParams::default().with_radius(0.3), 100)
            .expect("Failed to resolve explicit radius");

        assert!(close(automatic, expected));
        assert!(close(non_positive, expected));
        assert!(close(explicit, 0.3));
    }

    // Tests that a missing domain size falls back to the bounds volume
    #[test]
    fn test_max_poisson_radius_uses_bounds_volume() {
        let mut engine = WeightedSampleElimination2::<f64>::new();
        engine.set_bounds(Bounds::new([0.0, 0.0], [2.0, 2.0]));

        let from_bounds = engine
            .max_poisson_disk_radius(2, 50, None)
            .expect("Failed to compute radius from bounds");
        let explicit = engine
            .max_poisson_disk_radius(2, 50, Some(4.0))
            .expect("Failed to compute radius for explicit size");
        let unit = engine
            .max_poisson_disk_radius(2, 50, Some(1.0))
            .expect("Failed to compute radius for unit size");

        assert!(close(from_bounds, explicit));
        assert!(unit < from_bounds);
    }

    // Tests the limiting distance of the default weight function
    // Verified by swapping input and output sizes in default_weight
    #[test]
    fn test_default_weight_limits_by_size_ratio() {
        let mut engine = WeightedSampleElimination2::<f64>::new();

        let limited = engine.default_weight(1000, 100, 0.2);
        let expected = 0.2 * (1.0 - 0.1_f64.powf(1.5)) * 0.65;
        assert!(limited.d_min.is_some_and(|d_min| close(d_min, expected)));
        assert!(close(limited.alpha, 8.0));

        engine.set_weight_limiting(false);
        assert_eq!(engine.default_weight(1000, 100, 0.2), DefaultWeight::new(8.0));
    }

    // Tests that the output must be smaller than the input
    #[test]
    fn test_eliminate_rejects_output_not_smaller_than_input() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(10, &Bounds::unit(), 1);
        let engine = WeightedSampleElimination2::<f64>::new();

        let mut same = vec![[0.0; 2]; 10];
        let mut larger = vec![[0.0; 2]; 11];

        assert!(matches!(
            engine.eliminate(&candidates, &mut same, &EliminationParams::default()),
            Err(AlgorithmError::InvalidParameter {
                parameter: "output_size",
                ..
            })
        ));
        assert!(
            engine
                .eliminate(&candidates, &mut larger, &EliminationParams::default())
                .is_err()
        );
        assert!(same.iter().all(|point| point == &[0.0, 0.0]));
    }

    // Tests the accepted range of domain dimensionality
    #[test]
    fn test_eliminate_rejects_dimensions_outside_range() {
        let candidates: Vec<[f64; 3]> = uniform_candidates(50, &Bounds::unit(), 1);
        let engine = WeightedSampleElimination3::<f64>::new();
        let mut output = vec![[0.0; 3]; 10];

        for dimensions in [0, 1, 4] {
            let params = EliminationParams::default().with_dimensions(dimensions);
            assert!(matches!(
                engine.eliminate(&candidates, &mut output, &params),
                Err(AlgorithmError::InvalidParameter {
                    parameter: "dimensions",
                    ..
                })
            ));
        }

        let params = EliminationParams::default().with_dimensions(2);
        engine
            .eliminate(&candidates, &mut output, &params)
            .expect("Failed to eliminate with two dimensions");
    }

    // Tests that non-finite coordinates are reported before any work is done
    #[test]
    fn test_eliminate_rejects_non_finite_coordinates() {
        let mut candidates: Vec<[f64; 2]> = uniform_candidates(20, &Bounds::unit(), 1);
        if let Some(point) = candidates.get_mut(7) {
            point[1] = f64::NAN;
        }
        let mut output = vec![[0.0; 2]; 5];

        let result = WeightedSampleElimination2::<f64>::new().eliminate(
            &candidates,
            &mut output,
            &EliminationParams::default(),
        );

        assert!(
            matches!(result, Err(AlgorithmError::InvalidPointData { reason }) if reason.contains("candidate 7"))
        );
    }

    // Tests that tiling needs a non-degenerate domain
    #[test]
    fn test_tiling_rejects_degenerate_bounds() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(20, &Bounds::unit(), 1);
        let mut engine = WeightedSampleElimination2::<f64>::new();
        engine.set_tiling(true);
        engine.set_bounds_max([1.0, 0.0]);
        let mut output = vec![[0.0; 2]; 5];

        let result = engine.eliminate(&candidates, &mut output, &EliminationParams::default());

        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "bounds",
                ..
            })
        ));
    }

    // Tests that a custom weight yielding NaN is reported as a computation error
    #[test]
    fn test_nan_weight_is_reported() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(20, &Bounds::unit(), 1);
        let mut output = vec![[0.0; 2]; 5];
        let broken = |_p0: &[f64; 2], _p1: &[f64; 2], _dist2: f64, _d_max: f64| f64::NAN;

        let result = WeightedSampleElimination2::<f64>::new().eliminate_with(
            &candidates,
            &mut output,
            &EliminationParams::default().with_radius(0.5),
            &broken,
        );

        assert!(matches!(
            result,
            Err(AlgorithmError::Computation {
                operation: "weight initialisation",
                ..
            })
        ));
    }

    // Tests that selected points are distinct candidates
    #[test]
    fn test_eliminate_copies_distinct_candidates() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(300, &Bounds::unit(), 9);
        let mut output = vec![[-1.0; 2]; 75];

        WeightedSampleElimination2::<f64>::new()
            .eliminate(&candidates, &mut output, &EliminationParams::default())
            .expect("Failed to eliminate samples");

        let mut seen = HashSet::new();
        for point in &output {
            let index = candidates.iter().position(|candidate| candidate == point);
            assert!(index.is_some(), "{point:?} is not a candidate");
            assert!(seen.insert(index));
        }
    }

    // Tests the empty output edge case
    #[test]
    fn test_empty_output_is_allowed() {
        let candidates: Vec<[f64; 2]> = uniform_candidates(5, &Bounds::unit(), 1);
        let weight = DefaultWeight::new(8.0);

        let selected = WeightedSampleElimination2::<f64>::new()
            .select_indices(
                &candidates,
                0,
                &EliminationParams::default(),
                &weight,
                &mut (),
            )
            .expect("Failed to select an empty set");

        assert!(selected.is_empty());
    }

    // Tests elimination in single precision
    #[test]
    fn test_eliminate_in_single_precision() {
        let candidates: Vec<[f32; 2]> = uniform_candidates(200, &Bounds::unit(), 4);
        let mut output = vec![[0.0_f32; 2]; 40];

        WeightedSampleElimination2::<f32>::new()
            .eliminate(&candidates, &mut output, &EliminationParams::progressive())
            .expect("Failed to eliminate in single precision");

        assert!(output.iter().flatten().all(|c| c.is_finite()));
    }
}

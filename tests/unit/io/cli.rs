//! Tests for command-line parsing and the selection runner

#[cfg(test)]
mod tests {
    use clap::Parser;
    use sample_elimination::AlgorithmError;
    use sample_elimination::io::cli::{Cli, Runner};
    use sample_elimination::io::configuration::{DEFAULT_CANDIDATES, DEFAULT_OUTPUT_SIZE};
    use sample_elimination::io::points::{read_points, save_points};
    use sample_elimination::spatial::Bounds;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["sample-elim"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("Failed to parse arguments")
    }

    // Tests default values when no flags are given
    #[test]
    fn test_defaults() {
        let cli = parse(&[]);

        assert_eq!(cli.candidates, DEFAULT_CANDIDATES);
        assert_eq!(cli.output_size, DEFAULT_OUTPUT_SIZE);
        assert_eq!(cli.dimensions, 2);
        assert!(!cli.progressive);
        assert!(!cli.tiling);
        assert!(cli.should_show_progress());
        assert_eq!(cli.params().d_max, None);
        assert_eq!(cli.bounds::<2>(), Bounds::unit());
    }

    // Tests that flags reach the engine and the per-call options
    #[test]
    fn test_flags_configure_engine() {
        let cli = parse(&[
            "--progressive",
            "--tiling",
            "--no-weight-limiting",
            "--alpha",
            "6",
            "--radius",
            "0.05",
            "--quiet",
        ]);

        let engine = cli.engine::<2>();
        let params = cli.params();

        assert!(engine.is_tiling());
        assert!(!engine.is_weight_limiting());
        assert!((engine.alpha() - 6.0).abs() < f64::EPSILON);
        assert!(params.progressive);
        assert!(params.d_max.is_some_and(|r| (r - 0.05).abs() < f64::EPSILON));
        assert!(!cli.should_show_progress());
    }

    // Tests that domain flags reach the engine, negative corners included
    #[test]
    fn test_bounds_flags_configure_domain() {
        let cli = parse(&["--bounds-min", "-2", "--bounds-max", "3"]);

        let engine = cli.engine::<3>();

        assert_eq!(engine.bounds_min(), &[-2.0; 3]);
        assert_eq!(engine.bounds_max(), &[3.0; 3]);
    }

    // Tests an end-to-end run writing points and a plot
    #[test]
    fn test_runner_writes_points_and_png() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let points_path = dir.path().join("out/points.txt");
        let png_path = dir.path().join("out/points.png");
        let points_arg = points_path.to_string_lossy().to_string();
        let png_arg = png_path.to_string_lossy().to_string();

        let cli = parse(&[
            "-c",
            "300",
            "-n",
            "40",
            "--progressive",
            "--image-size",
            "64",
            "-o",
            &points_arg,
            "--png",
            &png_arg,
            "-q",
        ]);

        Runner::new(cli).run().expect("Failed to run selection");

        let written = read_points::<2>(&points_path).expect("Failed to read selected points");
        assert_eq!(written.len(), 40);
        let png = fs::metadata(&png_path).expect("Failed to stat plot");
        assert!(png.len() > 0);
    }

    // Tests that candidates can be read from a file
    #[test]
    fn test_runner_reads_candidate_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let input_path = dir.path().join("candidates.txt");
        let output_path = dir.path().join("selected.txt");
        let lines: Vec<String> = (0..20)
            .map(|i| format!("{} {} {}", f64::from(i) / 20.0, 0.5, f64::from(i % 4) / 4.0))
            .collect();
        fs::write(&input_path, lines.join("\n")).expect("Failed to write candidates");
        let input_arg = input_path.to_string_lossy().to_string();
        let output_arg = output_path.to_string_lossy().to_string();

        let cli = parse(&["-d", "3", "-i", &input_arg, "-n", "5", "-o", &output_arg, "-q"]);

        Runner::new(cli).run().expect("Failed to run selection");
        let selected = read_points::<3>(&output_path).expect("Failed to read selected points");
        assert_eq!(selected.len(), 5);
    }

    // Tests that candidates outside the domain are rejected when tiling or plotting
    // Verified by dropping the containment check in run_in
    #[test]
    fn test_runner_rejects_candidates_outside_domain() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let input_path = dir.path().join("wide.txt");
        let output_path = dir.path().join("selected.txt");
        let candidates: Vec<[f64; 2]> = (0..30)
            .map(|i| [f64::from(i) / 10.0, f64::from(i % 5) / 5.0])
            .collect();
        save_points(&input_path, &candidates).expect("Failed to write candidates");
        let input_arg = input_path.to_string_lossy().to_string();
        let output_arg = output_path.to_string_lossy().to_string();

        let tiled = parse(&["-i", &input_arg, "-n", "5", "-o", &output_arg, "-t", "-q"]);
        let result = Runner::new(tiled).run();
        assert!(
            matches!(result, Err(AlgorithmError::InvalidPointData { ref reason }) if reason.contains("candidate 11"))
        );
        assert!(!output_path.exists());

        let widened = parse(&[
            "-i",
            &input_arg,
            "-n",
            "5",
            "-o",
            &output_arg,
            "-t",
            "--bounds-max",
            "3",
            "-q",
        ]);
        Runner::new(widened).run().expect("Failed to run over the widened domain");
        assert!(output_path.exists());

        let untiled = parse(&["-i", &input_arg, "-n", "5", "-o", &output_arg, "-q"]);
        Runner::new(untiled).run().expect("Failed to run without tiling");
    }

    // Tests that an empty or inverted domain is rejected
    #[test]
    fn test_runner_rejects_inverted_bounds() {
        let cli = parse(&["--bounds-min", "1", "--bounds-max", "1", "-q"]);

        let result = Runner::new(cli).run();

        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "bounds",
                ..
            })
        ));
    }

    // Tests that unsupported dimensionalities are rejected
    #[test]
    fn test_runner_rejects_unsupported_dimensions() {
        let cli = parse(&["-d", "5", "-q"]);

        let result = Runner::new(cli).run();

        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "dimensions",
                ..
            })
        ));
    }

    // Tests that select reports invalid sizes instead of panicking
    #[test]
    fn test_select_rejects_oversized_output() {
        let cli = parse(&["-n", "10", "-q"]);
        let candidates = vec![[0.5, 0.5]; 4];

        assert!(Runner::new(cli).select::<2>(&candidates).is_err());
    }
}

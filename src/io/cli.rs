//! Command-line interface selecting blue-noise subsets of candidate points

use crate::algorithm::{EliminationParams, WeightedSampleElimination};
use crate::analysis::statistics::PointSetStats;
use crate::io::configuration::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_BOUNDS_MAX, DEFAULT_BOUNDS_MIN, DEFAULT_CANDIDATES,
    DEFAULT_DIMENSIONS, DEFAULT_GAMMA, DEFAULT_IMAGE_SIZE, DEFAULT_OUTPUT_SIZE, DEFAULT_SEED,
    MAX_CLI_DIMENSIONS,
};
use crate::io::error::{AlgorithmError, Result, WithContext, invalid_parameter};
use crate::io::image::export_points_as_png;
use crate::io::points::{read_points, save_points, write_points};
use crate::io::progress::ProgressObserver;
use crate::math::sampling::uniform_candidates;
use crate::spatial::Bounds;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "sample-elim")]
#[command(
    author,
    version,
    about = "Select blue-noise point subsets with weighted sample elimination"
)]
/// Command-line arguments for the sample elimination tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Candidate point file (one point per line); random candidates if omitted
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Number of uniformly random candidates to generate
    #[arg(short, long, default_value_t = DEFAULT_CANDIDATES)]
    pub candidates: usize,

    /// Number of points to select
    #[arg(short = 'n', long, default_value_t = DEFAULT_OUTPUT_SIZE)]
    pub output_size: usize,

    /// Dimensionality of the points (2 to 4)
    #[arg(short, long, default_value_t = DEFAULT_DIMENSIONS)]
    pub dimensions: usize,

    /// Random seed for reproducible candidate generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Order the output for progressive sampling
    #[arg(short, long)]
    pub progressive: bool,

    /// Treat the domain as periodic
    #[arg(short, long)]
    pub tiling: bool,

    /// Lower corner of the domain along every dimension
    #[arg(long, default_value_t = DEFAULT_BOUNDS_MIN, allow_negative_numbers = true)]
    pub bounds_min: f64,

    /// Upper corner of the domain along every dimension
    #[arg(long, default_value_t = DEFAULT_BOUNDS_MAX, allow_negative_numbers = true)]
    pub bounds_max: f64,

    /// Disable weight limiting in the default weight function
    #[arg(long)]
    pub no_weight_limiting: bool,

    /// Falloff exponent of the weight function
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Weight limiting strength
    #[arg(long, default_value_t = DEFAULT_BETA)]
    pub beta: f64,

    /// Weight limiting response to the output/input ratio
    #[arg(long, default_value_t = DEFAULT_GAMMA)]
    pub gamma: f64,

    /// Weight function cutoff radius (automatic if omitted)
    #[arg(short, long)]
    pub radius: Option<f64>,

    /// Write selected points to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also render the first two coordinates as a PNG
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Edge length of the PNG in pixels
    #[arg(long, default_value_t = DEFAULT_IMAGE_SIZE)]
    pub image_size: usize,

    /// Suppress progress and statistics output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Elimination options requested on the command line
    pub fn params(&self) -> EliminationParams<f64> {
        EliminationParams {
            progressive: self.progressive,
            d_max: self.radius,
            dimensions: None,
        }
    }

    /// Domain box with the same corner coordinates along every dimension
    pub const fn bounds<const D: usize>(&self) -> Bounds<f64, D> {
        Bounds::new([self.bounds_min; D], [self.bounds_max; D])
    }

    /// Engine configured from the command line
    pub fn engine<const D: usize>(&self) -> WeightedSampleElimination<f64, D> {
        let mut engine = WeightedSampleElimination::new();
        engine.set_bounds(self.bounds());
        engine.set_tiling(self.tiling);
        engine.set_weight_limiting(!self.no_weight_limiting);
        engine.set_alpha(self.alpha);
        engine.set_beta(self.beta);
        engine.set_gamma(self.gamma);
        engine
    }
}

/// Runs one selection described by the command line
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load or generate candidates, select points, and write the results
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensionality or domain is invalid, the
    /// candidate file cannot be read, a candidate lies outside the domain
    /// while tiling or plotting, the elimination parameters are invalid, or
    /// an output cannot be written.
    pub fn run(&self) -> Result<()> {
        match self.cli.dimensions {
            2 => self.run_in::<2>(),
            3 => self.run_in::<3>(),
            4 => self.run_in::<4>(),
            other => Err(invalid_parameter(
                "dimensions",
                &other,
                &format!("must lie in 2..={MAX_CLI_DIMENSIONS}"),
            )),
        }
    }

    /// Select points from candidates of dimensionality `D`
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::run`].
    // Allow print for user feedback on statistics
    #[allow(clippy::print_stderr)]
    pub fn run_in<const D: usize>(&self) -> Result<()> {
        let bounds = self.cli.bounds::<D>();
        let (lo, hi) = (self.cli.bounds_min, self.cli.bounds_max);
        let ordered = lo.is_finite() && hi.is_finite() && lo < hi;
        if !ordered {
            return Err(invalid_parameter(
                "bounds",
                &format!("{lo}..{hi}"),
                &"must be finite with the lower corner below the upper corner",
            ));
        }

        let candidates = match &self.cli.input {
            Some(path) => read_points::<D>(path)?,
            None => uniform_candidates(self.cli.candidates, &bounds, self.cli.seed),
        };
        if self.cli.tiling || self.cli.png.is_some() {
            check_inside(&candidates, &bounds)?;
        }

        let start_time = Instant::now();
        let selected = self.select(&candidates)?;
        let elapsed = start_time.elapsed();

        match &self.cli.output {
            Some(path) => save_points(path, &selected).with_operation("write selected points")?,
            None => write_points(&mut std::io::stdout().lock(), &selected)?,
        }

        if let Some(path) = &self.cli.png {
            export_points_as_png(&selected, &bounds, self.cli.image_size, path)?;
        }

        if !self.cli.quiet {
            eprintln!(
                "Selected {} of {} candidates in {:.2?}",
                selected.len(),
                candidates.len(),
                elapsed
            );
            if let Some(stats) = PointSetStats::compute(&selected, bounds.volume(), D)? {
                eprintln!(
                    "min distance {:.6}, mean nearest distance {:.6}, relative radius {:.4}",
                    stats.min_distance, stats.mean_nearest_distance, stats.relative_radius
                );
            }
        }

        Ok(())
    }

    /// Run the elimination on `candidates`, drawing progress unless quiet
    ///
    /// # Errors
    ///
    /// Returns an error if the elimination parameters are invalid.
    pub fn select<const D: usize>(&self, candidates: &[[f64; D]]) -> Result<Vec<[f64; D]>> {
        let engine = self.cli.engine::<D>();
        let params = self.cli.params();
        let mut selected = vec![[0.0; D]; self.cli.output_size];

        let mut observer = if self.cli.should_show_progress() {
            ProgressObserver::new()
        } else {
            ProgressObserver::hidden()
        };
        let result =
            engine.eliminate_observed_default(candidates, &mut selected, &params, &mut observer);
        observer.finish();
        result?;

        Ok(selected)
    }
}

// Periodic tiling and plotting both assume every candidate lies in the domain
fn check_inside<const D: usize>(candidates: &[[f64; D]], bounds: &Bounds<f64, D>) -> Result<()> {
    if let Some(index) = candidates.iter().position(|point| !bounds.contains(point)) {
        return Err(AlgorithmError::InvalidPointData {
            reason: format!(
                "candidate {index} lies outside the domain {:?}..{:?}; \
                 set --bounds-min and --bounds-max to cover it",
                bounds.min, bounds.max
            ),
        });
    }
    Ok(())
}

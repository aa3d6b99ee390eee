//! Weighted sample elimination engine
//!
//! Selects a blue-noise subset of a candidate point set. Every candidate is
//! weighted by how close its neighbours are; the heaviest candidate is then
//! removed repeatedly, with its contribution subtracted from its neighbours,
//! until only the requested number remains.
//!
//! Reference: Cem Yuksel, "Sample Elimination for Generating Poisson Disk
//! Sample Sets", Computer Graphics Forum 34(2), 2015.

use crate::{
    algorithm::{
        heap::IndexedMaxHeap,
        observer::{EliminationObserver, EliminationStep},
        weights::{DefaultWeight, WeightFunction},
    },
    io::{
        configuration::{
            DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_GAMMA, DEFAULT_TILING, DEFAULT_WEIGHT_LIMITING,
        },
        error::{AlgorithmError, Result, computation_error, invalid_parameter},
    },
    math::{
        packing::{max_poisson_disk_radius, weight_limit_fraction},
        scalar::Scalar,
    },
    spatial::{Bounds, KdTree, tiling::tile_points},
};

/// Persistent parameters of the elimination engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EliminationConfig<F, const D: usize> {
    /// Sampling domain, used for tiling and the automatic radius
    pub bounds: Bounds<F, D>,
    /// Falloff exponent of the default weight function
    pub alpha: F,
    /// Weight limiting strength (0 disables limiting)
    pub beta: F,
    /// Response of the limiting radius to the output/input ratio
    pub gamma: F,
    /// Treat the domain as periodic by adding ghost copies near its faces
    pub tiling: bool,
    /// Clamp small distances in the default weight function
    pub weight_limiting: bool,
}

impl<F: Scalar, const D: usize> Default for EliminationConfig<F, D> {
    fn default() -> Self {
        Self {
            bounds: Bounds::unit(),
            alpha: F::from_f64(DEFAULT_ALPHA),
            beta: F::from_f64(DEFAULT_BETA),
            gamma: F::from_f64(DEFAULT_GAMMA),
            tiling: DEFAULT_TILING,
            weight_limiting: DEFAULT_WEIGHT_LIMITING,
        }
    }
}

/// Per-call options of an elimination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EliminationParams<F> {
    /// Order the output so every prefix of the halving schedule is blue noise
    pub progressive: bool,
    /// Cutoff radius of the weight function; `None` or non-positive picks
    /// twice the maximum Poisson disk radius of the output size
    pub d_max: Option<F>,
    /// Dimensionality of the sampled domain; `None` means `D`
    ///
    /// Smaller values are used when sampling a lower-dimensional manifold
    /// embedded in `D`-dimensional space.
    pub dimensions: Option<usize>,
}

impl<F> Default for EliminationParams<F> {
    fn default() -> Self {
        Self {
            progressive: false,
            d_max: None,
            dimensions: None,
        }
    }
}

impl<F: Scalar> EliminationParams<F> {
    /// Options for a progressive elimination with an automatic radius
    pub const fn progressive() -> Self {
        Self {
            progressive: true,
            d_max: None,
            dimensions: None,
        }
    }

    /// Use an explicit cutoff radius
    #[must_use]
    pub fn with_radius(mut self, d_max: F) -> Self {
        self.d_max = Some(d_max);
        self
    }

    /// Sample a domain of the given dimensionality
    #[must_use]
    pub const fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// Weighted sample elimination over `D`-dimensional points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedSampleElimination<F, const D: usize> {
    config: EliminationConfig<F, D>,
}

impl<F: Scalar, const D: usize> Default for WeightedSampleElimination<F, D> {
    fn default() -> Self {
        Self {
            config: EliminationConfig::default(),
        }
    }
}

/// Elimination in 2D
pub type WeightedSampleElimination2<F> = WeightedSampleElimination<F, 2>;
/// Elimination in 3D
pub type WeightedSampleElimination3<F> = WeightedSampleElimination<F, 3>;
/// Elimination in 4D
pub type WeightedSampleElimination4<F> = WeightedSampleElimination<F, 4>;

impl<F: Scalar, const D: usize> WeightedSampleElimination<F, D> {
    /// Create an engine with default parameters over the unit hyper-cube
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from explicit parameters
    pub const fn with_config(config: EliminationConfig<F, D>) -> Self {
        Self { config }
    }

    /// Current parameters
    pub const fn config(&self) -> &EliminationConfig<F, D> {
        &self.config
    }

    /// Turn periodic tiling of the domain on or off
    ///
    /// Without tiling, samples near the domain faces have fewer neighbours
    /// and are eliminated less often. Tiling needs exact bounds.
    pub const fn set_tiling(&mut self, on: bool) {
        self.config.tiling = on;
    }

    /// Whether tiling is on
    pub const fn is_tiling(&self) -> bool {
        self.config.tiling
    }

    /// Turn weight limiting of the default weight function on or off
    pub const fn set_weight_limiting(&mut self, on: bool) {
        self.config.weight_limiting = on;
    }

    /// Whether weight limiting is on
    pub const fn is_weight_limiting(&self) -> bool {
        self.config.weight_limiting
    }

    /// Minimum corner of the sampling domain
    pub const fn bounds_min(&self) -> &[F; D] {
        &self.config.bounds.min
    }

    /// Maximum corner of the sampling domain
    pub const fn bounds_max(&self) -> &[F; D] {
        &self.config.bounds.max
    }

    /// Set the minimum corner of the sampling domain
    pub fn set_bounds_min(&mut self, min: [F; D]) {
        self.config.bounds.min = min;
    }

    /// Set the maximum corner of the sampling domain
    pub fn set_bounds_max(&mut self, max: [F; D]) {
        self.config.bounds.max = max;
    }

    /// Set both corners of the sampling domain
    pub fn set_bounds(&mut self, bounds: Bounds<F, D>) {
        self.config.bounds = bounds;
    }

    /// Falloff exponent of the default weight function
    pub const fn alpha(&self) -> F {
        self.config.alpha
    }

    /// Set the falloff exponent of the default weight function
    pub fn set_alpha(&mut self, alpha: F) {
        self.config.alpha = alpha;
    }

    /// Weight limiting strength
    pub const fn beta(&self) -> F {
        self.config.beta
    }

    /// Set the weight limiting strength; 0 disables limiting
    pub fn set_beta(&mut self, beta: F) {
        self.config.beta = beta;
    }

    /// Limiting response to the output/input ratio
    pub const fn gamma(&self) -> F {
        self.config.gamma
    }

    /// Set the limiting response to the output/input ratio
    pub fn set_gamma(&mut self, gamma: F) {
        self.config.gamma = gamma;
    }

    /// Largest Poisson disk radius `sample_count` samples can reach
    ///
    /// A missing or non-positive `domain_size` is replaced by the volume of
    /// the configured bounds over all `D` dimensions, even when `dimensions`
    /// is smaller than `D`.
    ///
    /// # Errors
    ///
    /// Returns an error if `dimensions < 2`, `sample_count` is zero, or the
    /// resulting domain size is not positive.
    pub fn max_poisson_disk_radius(
        &self,
        dimensions: usize,
        sample_count: usize,
        domain_size: Option<F>,
    ) -> Result<F> {
        let domain_size = domain_size
            .filter(|&size| size > F::zero())
            .unwrap_or_else(|| self.config.bounds.volume());
        max_poisson_disk_radius(dimensions, sample_count, domain_size)
    }

    /// Default weight function for reducing `input_size` samples to `output_size`
    ///
    /// The limiting distance is fixed here from `d_max`; progressive passes
    /// that grow the radius keep using it unchanged.
    pub fn default_weight(
        &self,
        input_size: usize,
        output_size: usize,
        d_max: F,
    ) -> DefaultWeight<F> {
        if self.config.weight_limiting {
            let fraction = weight_limit_fraction(
                input_size,
                output_size,
                self.config.beta,
                self.config.gamma,
            );
            DefaultWeight::limited(self.config.alpha, d_max * fraction)
        } else {
            DefaultWeight::new(self.config.alpha)
        }
    }

    /// Cutoff radius a call with `params` uses for `output_size` samples
    ///
    /// # Errors
    ///
    /// Returns an error if the automatic radius cannot be computed.
    pub fn resolve_radius(&self, params: &EliminationParams<F>, output_size: usize) -> Result<F> {
        match params.d_max {
            Some(d_max) if d_max > F::zero() => Ok(d_max),
            _ => {
                let dimensions = params.dimensions.unwrap_or(D);
                // An empty output still needs a finite radius to run the loop
                let r_max = self.max_poisson_disk_radius(dimensions, output_size.max(1), None)?;
                Ok(F::from_f64(2.0) * r_max)
            }
        }
    }

    /// Select `output.len()` samples from `input` with the default weight function
    ///
    /// # Errors
    ///
    /// Returns an error if `output.len() >= input.len()`, the dimensionality
    /// is outside `2..=D`, or a coordinate is not finite. `output` is left
    /// untouched on error.
    pub fn eliminate(
        &self,
        input: &[[F; D]],
        output: &mut [[F; D]],
        params: &EliminationParams<F>,
    ) -> Result<()> {
        self.eliminate_observed_default(input, output, params, &mut ())
    }

    /// Default-weight elimination reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::eliminate`].
    pub fn eliminate_observed_default<O>(
        &self,
        input: &[[F; D]],
        output: &mut [[F; D]],
        params: &EliminationParams<F>,
        observer: &mut O,
    ) -> Result<()>
    where
        O: EliminationObserver<F>,
    {
        self.validate(input, output.len(), params)?;
        let d_max = self.resolve_radius(params, output.len())?;
        let weight = self.default_weight(input.len(), output.len(), d_max);
        let params = EliminationParams {
            d_max: Some(d_max),
            ..*params
        };
        self.eliminate_observed(input, output, &params, &weight, observer)
    }

    /// Select `output.len()` samples from `input` with a custom weight function
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::eliminate`], and additionally fails if
    /// `weight` yields a NaN weight for any candidate.
    pub fn eliminate_with<W>(
        &self,
        input: &[[F; D]],
        output: &mut [[F; D]],
        params: &EliminationParams<F>,
        weight: &W,
    ) -> Result<()>
    where
        W: WeightFunction<F, D>,
    {
        self.eliminate_observed(input, output, params, weight, &mut ())
    }

    /// Custom-weight elimination reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::eliminate`].
    pub fn eliminate_observed<W, O>(
        &self,
        input: &[[F; D]],
        output: &mut [[F; D]],
        params: &EliminationParams<F>,
        weight: &W,
        observer: &mut O,
    ) -> Result<()>
    where
        W: WeightFunction<F, D>,
        O: EliminationObserver<F>,
    {
        let selected = self.select_indices(input, output.len(), params, weight, observer)?;
        for (slot, id) in output.iter_mut().zip(selected) {
            if let Some(point) = input.get(id) {
                *slot = *point;
            }
        }
        Ok(())
    }

    /// Indices into `input` of the selected samples, in output order
    ///
    /// This is the elimination itself; the point-returning methods only copy
    /// the selected coordinates out. Duplicate coordinates stay
    /// distinguishable by index.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Self::eliminate`].
    pub fn select_indices<W, O>(
        &self,
        input: &[[F; D]],
        output_size: usize,
        params: &EliminationParams<F>,
        weight: &W,
        observer: &mut O,
    ) -> Result<Vec<usize>>
    where
        W: WeightFunction<F, D>,
        O: EliminationObserver<F>,
    {
        let dimensions = self.validate(input, output_size, params)?;
        let d_max = self.resolve_radius(params, output_size)?;

        let identities: Vec<usize> = (0..input.len()).collect();
        let mut order =
            self.eliminate_pass(input, &identities, output_size, d_max, weight, 0, observer)?;
        order.truncate(output_size);

        if params.progressive {
            self.refine_progressive(input, &mut order, d_max, dimensions, weight, observer)?;
        }

        Ok(order)
    }

    /// Check the call contract and return the effective dimensionality
    fn validate(
        &self,
        input: &[[F; D]],
        output_size: usize,
        params: &EliminationParams<F>,
    ) -> Result<usize> {
        if output_size >= input.len() {
            return Err(invalid_parameter(
                "output_size",
                &output_size,
                &format!("must be smaller than the input size {}", input.len()),
            ));
        }

        let dimensions = params.dimensions.unwrap_or(D);
        if !(2..=D).contains(&dimensions) {
            return Err(invalid_parameter(
                "dimensions",
                &dimensions,
                &format!("must lie in 2..={D}"),
            ));
        }

        if let Some(index) = input
            .iter()
            .position(|point| point.iter().any(|c| !c.is_finite()))
        {
            return Err(AlgorithmError::InvalidPointData {
                reason: format!("candidate {index} has a non-finite coordinate"),
            });
        }

        if self.config.tiling
            && let Some(dim) = (0..D).find(|&dim| self.config.bounds.extent(dim) <= F::zero())
        {
            return Err(invalid_parameter(
                "bounds",
                &format!("{:?}..{:?}", self.config.bounds.min, self.config.bounds.max),
                &format!("tiling needs a positive extent along dimension {dim}"),
            ));
        }

        Ok(dimensions)
    }

    /// Reduce `points` to `output_size` samples
    ///
    /// Returns every local index in heap storage order: the survivors occupy
    /// the first `output_size` entries and the eliminated samples follow,
    /// the last one eliminated first. Fails if the weight function produces
    /// a NaN weight.
    pub(crate) fn eliminate_pass<W, O>(
        &self,
        points: &[[F; D]],
        identities: &[usize],
        output_size: usize,
        d_max: F,
        weight: &W,
        pass: usize,
        observer: &mut O,
    ) -> Result<Vec<usize>>
    where
        W: WeightFunction<F, D>,
        O: EliminationObserver<F>,
    {
        observer.on_pass_start(pass, points.len(), output_size);

        let tree = if self.config.tiling {
            let tiled = tile_points(points, &self.config.bounds, d_max);
            KdTree::build_with_ids(&tiled.points, &tiled.ids, &tiled.ghosts)?
        } else {
            KdTree::build(points)
        };

        // Ghosts add to their source's neighbours but never get a weight of their own
        let mut weights = vec![F::zero(); points.len()];
        for (index, (point, total)) in points.iter().zip(weights.iter_mut()).enumerate() {
            tree.query_radius(point, d_max, |neighbor, _| {
                if neighbor.id != index {
                    *total = *total + weight.weight(point, neighbor.point, neighbor.dist2, d_max);
                }
            });
        }

        if let Some(index) = weights.iter().position(|w| w.is_nan()) {
            return Err(computation_error(
                "weight initialisation",
                &format!("sample {index} received a NaN weight"),
            ));
        }

        let mut heap = IndexedMaxHeap::build(weights);
        observer.on_weights_ready(pass, &heap);

        let mut remaining = points.len();
        let mut iteration = 0;
        while remaining > output_size {
            let Some(top) = heap.pop() else {
                break;
            };
            let top_weight = heap.key(top).unwrap_or_else(F::zero);

            if let Some(point) = points.get(top) {
                tree.query_radius(point, d_max, |neighbor, _| {
                    if neighbor.id != top {
                        let amount = weight.weight(point, neighbor.point, neighbor.dist2, d_max);
                        heap.decrease_key(neighbor.id, amount);
                    }
                });
            }
            remaining -= 1;

            observer.on_step(&EliminationStep {
                pass,
                iteration,
                local: top,
                id: identities.get(top).copied().unwrap_or(top),
                weight: top_weight,
                remaining,
                target: output_size,
                heap: &heap,
            });
            iteration += 1;
        }

        observer.on_pass_end(pass);
        Ok(heap.storage_order().to_vec())
    }
}

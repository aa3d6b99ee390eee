//! Algorithm constants and runtime configuration defaults

// Parameters of the default weight function
/// Exponent of the default weight falloff `(1 - d/d_max)^alpha`
pub const DEFAULT_ALPHA: f64 = 8.0;
/// Strength of weight limiting (0 disables limiting)
pub const DEFAULT_BETA: f64 = 0.65;
/// Response of the limiting radius to the output/input size ratio
pub const DEFAULT_GAMMA: f64 = 1.5;

/// Whether the sampling domain is treated as periodic by default
pub const DEFAULT_TILING: bool = false;
/// Whether weight limiting is applied by the default weight function
pub const DEFAULT_WEIGHT_LIMITING: bool = true;

/// Lower corner of the default sampling domain along every dimension
pub const DEFAULT_BOUNDS_MIN: f64 = 0.0;
/// Upper corner of the default sampling domain along every dimension
pub const DEFAULT_BOUNDS_MAX: f64 = 1.0;

// Progressive halving stops once fewer points than this remain
/// Smallest set size that is still split by a progressive pass
pub const MIN_PROGRESSIVE_SIZE: usize = 3;

/// Maximum number of points stored in a k-d tree leaf
pub const KD_LEAF_SIZE: usize = 16;

// Demo command-line defaults
/// Fixed seed for reproducible candidate generation
pub const DEFAULT_SEED: u64 = 42;
/// Number of uniformly random candidates generated when no input is given
pub const DEFAULT_CANDIDATES: usize = 5000;
/// Number of points selected when no output size is given
pub const DEFAULT_OUTPUT_SIZE: usize = 1000;
/// Dimensionality of generated candidates
pub const DEFAULT_DIMENSIONS: usize = 2;
/// Highest dimensionality the command-line tool dispatches to
pub const MAX_CLI_DIMENSIONS: usize = 4;

// Point plot settings
/// Edge length of the rendered point plot in pixels
pub const DEFAULT_IMAGE_SIZE: usize = 512;
/// Radius of a rendered point in pixels
pub const POINT_RADIUS_PX: usize = 1;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Number of eliminations between progress bar refreshes
pub const PROGRESS_UPDATE_INTERVAL: usize = 256;

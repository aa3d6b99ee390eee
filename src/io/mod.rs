//! Input/output operations, configuration, and error handling

/// Command-line interface
pub mod cli;
/// Algorithm constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// PNG plots of point sets
pub mod image;
/// Plain-text point files
pub mod points;
/// Terminal progress display
pub mod progress;

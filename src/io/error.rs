//! Error types and context management for elimination operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all elimination operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Candidate points don't meet algorithm requirements
    ///
    /// Occurs when a point has a non-finite coordinate or a point file
    /// mixes dimensionalities.
    InvalidPointData {
        /// Description of what's wrong with the point data
        reason: String,
    },

    /// A line of a point file could not be parsed
    PointParse {
        /// Path of the point file
        path: PathBuf,
        /// 1-based line number of the offending line
        line: usize,
        /// Description of the parse failure
        reason: String,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save a rendered point plot to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidPointData { reason } => {
                write!(f, "Invalid point data: {reason}")
            }
            Self::PointParse { path, line, reason } => {
                write!(
                    f,
                    "Failed to parse '{}' at line {line}: {reason}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for elimination results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Enriches error messages with the operation that was running
pub trait WithContext<T> {
    /// Record the failing operation on computation and file system errors
    ///
    /// # Errors
    ///
    /// Propagates the underlying error with the operation context applied
    fn with_operation(self, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_operation(self, operation: &'static str) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors that carry an operation name benefit from the context
            match &mut error {
                AlgorithmError::Computation { operation: op, .. }
                | AlgorithmError::FileSystem { operation: op, .. } => *op = operation,
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

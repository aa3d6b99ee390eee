//! Plain-text point files
//!
//! One point per line, coordinates separated by commas and/or whitespace.
//! Blank lines and lines starting with `#` are ignored.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::io::error::{AlgorithmError, Result};
use crate::math::scalar::Scalar;

/// Parse `D`-dimensional points from text
///
/// `path` only labels parse errors.
///
/// # Errors
///
/// Returns an error if a line has the wrong number of coordinates or a
/// coordinate is not a finite number.
pub fn parse_points<const D: usize>(text: &str, path: &Path) -> Result<Vec<[f64; D]>> {
    let mut points = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parse_error = |reason: String| AlgorithmError::PointParse {
            path: path.to_path_buf(),
            line: line_index + 1,
            reason,
        };

        let fields: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|field| !field.is_empty())
            .collect();
        if fields.len() != D {
            return Err(parse_error(format!(
                "expected {D} coordinates, found {}",
                fields.len()
            )));
        }

        let mut point = [0.0; D];
        for (coord, field) in point.iter_mut().zip(&fields) {
            let value: f64 = field
                .parse()
                .map_err(|e| parse_error(format!("'{field}': {e}")))?;
            if !value.is_finite() {
                return Err(parse_error(format!("'{field}' is not finite")));
            }
            *coord = value;
        }
        points.push(point);
    }

    Ok(points)
}

/// Read `D`-dimensional points from a file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn read_points<const D: usize>(path: &Path) -> Result<Vec<[f64; D]>> {
    let text = fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "read points",
        source: e,
    })?;
    parse_points(&text, path)
}

/// Write points one per line with comma-separated coordinates
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_points<F: Scalar, const D: usize, W: Write>(
    writer: &mut W,
    points: &[[F; D]],
) -> Result<()> {
    for point in points {
        let line = point
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write points to a file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written.
pub fn save_points<F: Scalar, const D: usize>(path: &Path, points: &[[F; D]]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    let file = fs::File::create(path).map_err(|e| AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation: "create points file",
        source: e,
    })?;
    let mut writer = std::io::BufWriter::new(file);
    write_points(&mut writer, points).map_err(|e| match e {
        AlgorithmError::FileSystem {
            operation, source, ..
        } => AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        },
        other => other,
    })
}

//! PNG plots of point sets
//!
//! Points are projected onto their first two coordinates, normalised by the
//! sampling bounds, and stamped as small dots onto a raster.

use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::io::configuration::POINT_RADIUS_PX;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::math::scalar::Scalar;
use crate::spatial::Bounds;

/// Coverage raster of the first two coordinates of `points`
///
/// Entry `[row, col]` is 255 where a dot covers the pixel and 0 elsewhere.
/// Rows run along the second coordinate, columns along the first. Points
/// outside `bounds` are skipped.
pub fn rasterize<F: Scalar, const D: usize>(
    points: &[[F; D]],
    bounds: &Bounds<F, D>,
    size: usize,
    dot_radius: usize,
) -> Array2<u8> {
    let mut raster = Array2::<u8>::zeros((size, size));
    if size == 0 || D < 2 {
        return raster;
    }

    let radius = dot_radius as i64;
    let last = size as i64 - 1;

    for point in points {
        let (Some(col), Some(row)) = (
            pixel_coordinate(point, bounds, 0, size),
            pixel_coordinate(point, bounds, 1, size),
        ) else {
            continue;
        };

        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dr * dr + dc * dc > radius * radius {
                    continue;
                }
                let (r, c) = (row + dr, col + dc);
                if (0..=last).contains(&r)
                    && (0..=last).contains(&c)
                    && let Some(cell) = raster.get_mut([r as usize, c as usize])
                {
                    *cell = u8::MAX;
                }
            }
        }
    }

    raster
}

// Pixel index of one coordinate, or None outside the bounds
fn pixel_coordinate<F: Scalar, const D: usize>(
    point: &[F; D],
    bounds: &Bounds<F, D>,
    dim: usize,
    size: usize,
) -> Option<i64> {
    let coord = point.get(dim)?.to_f64_lossy();
    let lo = bounds.min.get(dim)?.to_f64_lossy();
    let extent = bounds.extent(dim).to_f64_lossy();
    if extent <= 0.0 {
        return None;
    }
    let t = (coord - lo) / extent;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    let pixel = (t * size as f64).floor() as i64;
    Some(pixel.min(size as i64 - 1))
}

/// Export the first two coordinates of `points` as a black-on-white PNG
///
/// # Errors
///
/// Returns an error if:
/// - `size` is zero or does not fit an image dimension
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_points_as_png<F: Scalar, const D: usize>(
    points: &[[F; D]],
    bounds: &Bounds<F, D>,
    size: usize,
    output_path: &std::path::Path,
) -> Result<()> {
    let side = u32::try_from(size)
        .ok()
        .filter(|&side| side > 0)
        .ok_or_else(|| invalid_parameter("image_size", &size, &"must be a positive u32"))?;

    let raster = rasterize(points, bounds, size, POINT_RADIUS_PX);
    let mut img = GrayImage::from_pixel(side, side, Luma([u8::MAX]));
    for ((row, col), &value) in raster.indexed_iter() {
        if value > 0 {
            // Flip vertically so the second coordinate grows upwards
            img.put_pixel(col as u32, (size - 1 - row) as u32, Luma([0]));
        }
    }

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

//! Closed-form sphere packing estimates used to pick elimination radii

use crate::io::error::{Result, invalid_parameter};
use crate::math::scalar::Scalar;

/// Largest Poisson disk radius `sample_count` samples can reach in a domain
///
/// Uses the densest known packings in 2D (hexagonal) and 3D (face-centred
/// cubic). Higher dimensions fall back to the volume of the unit ball,
/// built up two dimensions at a time from the 2D or 3D base term.
///
/// # Errors
///
/// Returns an error if `dimensions < 2`, `sample_count` is zero, or
/// `domain_size` is not a positive finite number.
pub fn max_poisson_disk_radius<F: Scalar>(
    dimensions: usize,
    sample_count: usize,
    domain_size: F,
) -> Result<F> {
    if dimensions < 2 {
        return Err(invalid_parameter(
            "dimensions",
            &dimensions,
            &"must be at least 2",
        ));
    }
    if sample_count == 0 {
        return Err(invalid_parameter(
            "sample_count",
            &sample_count,
            &"must be positive",
        ));
    }
    if !(domain_size.is_finite() && domain_size > F::zero()) {
        return Err(invalid_parameter(
            "domain_size",
            &domain_size,
            &"must be a positive finite volume",
        ));
    }

    let sample_area = domain_size / F::from_count(sample_count);
    let two = F::from_f64(2.0);

    let r_max = match dimensions {
        2 => (sample_area / (two * F::from_f64(3.0).sqrt())).sqrt(),
        3 => (sample_area / (F::from_f64(4.0) * two.sqrt())).powf(F::one() / F::from_f64(3.0)),
        _ => {
            let c = unit_ball_volume::<F>(dimensions);
            (sample_area / c).powf(F::one() / F::from_count(dimensions))
        }
    };

    Ok(r_max)
}

/// Volume of the unit ball in `dimensions` dimensions
///
/// Odd dimensions start from 2 and even ones from pi, each further pair of
/// dimensions multiplying by `2*pi/d`.
pub fn unit_ball_volume<F: Scalar>(dimensions: usize) -> F {
    let pi = F::from_f64(std::f64::consts::PI);
    let (mut c, d_start) = if dimensions % 2 == 1 {
        (F::from_f64(2.0), 3)
    } else {
        (pi, 4)
    };
    for d in (d_start..=dimensions).step_by(2) {
        c = c * F::from_f64(2.0) * pi / F::from_count(d);
    }
    c
}

/// Growth of the weight radius when a progressive pass halves the sample count
pub fn progressive_radius_multiplier<F: Scalar>(dimensions: usize) -> F {
    if dimensions == 2 {
        F::from_f64(2.0).sqrt()
    } else {
        F::from_f64(2.0).powf(F::one() / F::from_count(dimensions))
    }
}

/// Fraction of `d_max` below which the default weight stops growing
///
/// Computed as `(1 - (output/input)^gamma) * beta`.
pub fn weight_limit_fraction<F: Scalar>(
    input_size: usize,
    output_size: usize,
    beta: F,
    gamma: F,
) -> F {
    let ratio = F::from_count(output_size) / F::from_count(input_size);
    (F::one() - ratio.powf(gamma)) * beta
}

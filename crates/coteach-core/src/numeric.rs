//! Zero-mass policy.
//!
//! Every normalisation in the workspace divides through these helpers. A zero
//! (or non-finite) denominator yields exactly zero mass: "no hypothesis is
//! consistent with this combination" propagates as 0.0, never as NaN.

/// Tolerance used when checking that a vector is a probability distribution.
pub const MASS_TOLERANCE: f64 = 1e-9;

/// `numerator / denominator`, or 0.0 when the quotient is undefined.
pub fn zero_mass_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Normalise `values` in place and return the mass they had before.
///
/// An all-zero vector stays all-zero.
pub fn normalize_or_zero(values: &mut [f64]) -> f64 {
    let mass: f64 = values.iter().sum();
    for value in values.iter_mut() {
        *value = zero_mass_ratio(*value, mass);
    }
    mass
}

/// True when `values` sums to 1 within [`MASS_TOLERANCE`] and has no
/// negative or non-finite entries.
pub fn is_distribution(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite() && *v >= 0.0)
        && (values.iter().sum::<f64>() - 1.0).abs() <= MASS_TOLERANCE
}

/// True when `values` is a distribution or exactly the zero vector.
pub fn is_distribution_or_zero(values: &[f64]) -> bool {
    values.iter().all(|v| *v == 0.0) || is_distribution(values)
}

//! Validation for polar coordinates and query radii.

use crate::error::{QuadtreeError, Result};
use hyperquad_types::PolarCoord;
use std::f64::consts::TAU;

/// Validates a polar coordinate against the disk `[0, 2π) × [0, max_radius)`.
///
/// Non-finite components are rejected as [`QuadtreeError::InvalidInput`].
/// A finite coordinate outside the disk breaks the containment precondition
/// of the index and is reported as [`QuadtreeError::InvariantViolated`].
///
/// # Examples
///
/// ```
/// use hyperquad::validation::validate_coord;
/// use hyperquad::PolarCoord;
///
/// assert!(validate_coord(&PolarCoord::new(1.0, 0.5), 0.9).is_ok());
/// assert!(validate_coord(&PolarCoord::new(1.0, 0.95), 0.9).is_err());
/// assert!(validate_coord(&PolarCoord::new(7.0, 0.5), 0.9).is_err());
/// ```
pub fn validate_coord(coord: &PolarCoord, max_radius: f64) -> Result<()> {
    let (angle, r) = (coord.angle, coord.r);

    if !angle.is_finite() {
        return Err(QuadtreeError::InvalidInput(format!(
            "Angle must be finite, got: {}",
            angle
        )));
    }

    if !r.is_finite() {
        return Err(QuadtreeError::InvalidInput(format!(
            "Radius must be finite, got: {}",
            r
        )));
    }

    if !(0.0..TAU).contains(&angle) {
        return Err(QuadtreeError::InvariantViolated(format!(
            "coordinate ({}, {}) has an angle outside [0, 2π)",
            angle, r
        )));
    }

    if !(0.0..max_radius).contains(&r) {
        return Err(QuadtreeError::InvariantViolated(format!(
            "coordinate ({}, {}) has a radius outside [0, {})",
            angle, r, max_radius
        )));
    }

    Ok(())
}

/// Validates a query point for distance queries: it must lie in the open
/// unit disk. Query points may sit outside the tree's root region.
pub fn validate_query_point(coord: &PolarCoord) -> Result<()> {
    validate_coord(coord, 1.0)
}

/// Validates a query distance.
///
/// Ensures the distance is finite and not negative. Zero is accepted and
/// matches nothing under the strict `<` comparison.
///
/// # Examples
///
/// ```
/// use hyperquad::validation::validate_distance;
///
/// assert!(validate_distance(1.5).is_ok());
/// assert!(validate_distance(0.0).is_ok());
/// assert!(validate_distance(-1.0).is_err());
/// assert!(validate_distance(f64::NAN).is_err());
/// ```
pub fn validate_distance(distance: f64) -> Result<()> {
    if !distance.is_finite() {
        return Err(QuadtreeError::InvalidInput(format!(
            "Distance must be finite, got: {}",
            distance
        )));
    }
    if distance < 0.0 {
        return Err(QuadtreeError::InvalidInput(format!(
            "Distance must not be negative, got: {}",
            distance
        )));
    }
    Ok(())
}

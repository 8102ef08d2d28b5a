//! Poincaré disk geometry.
//!
//! All functions are pure. Inputs outside the open unit disk yield infinite or
//! NaN distances rather than panicking; callers that need a hard failure
//! validate before calling.

use geo::{Distance, Euclidean, Point};
use std::f64::consts::TAU;

/// Convert a polar coordinate to its Cartesian position in the disk.
///
/// # Examples
///
/// ```
/// use hyperquad_types::geometry::polar_to_cartesian;
///
/// let p = polar_to_cartesian(0.0, 0.5);
/// assert_eq!(p.x(), 0.5);
/// assert_eq!(p.y(), 0.0);
/// ```
#[inline]
pub fn polar_to_cartesian(angle: f64, r: f64) -> Point<f64> {
    Point::new(r * angle.cos(), r * angle.sin())
}

/// Convert a Cartesian position to `(angle, r)` with `angle` in `[0, 2π)`.
///
/// # Examples
///
/// ```
/// use hyperquad_types::geometry::cartesian_to_polar;
/// use geo::Point;
///
/// let (angle, r) = cartesian_to_polar(&Point::new(0.0, -0.5));
/// assert!((angle - 1.5 * std::f64::consts::PI).abs() < 1e-12);
/// assert!((r - 0.5).abs() < 1e-12);
/// ```
pub fn cartesian_to_polar(point: &Point<f64>) -> (f64, f64) {
    let r = point.x().hypot(point.y());
    let mut angle = point.y().atan2(point.x());
    if angle < 0.0 {
        angle += TAU;
    }
    // -ε + 2π can round up to exactly 2π
    if angle >= TAU {
        angle -= TAU;
    }
    (angle, r)
}

/// Euclidean norm of a position, i.e. its distance from the disk centre.
#[inline]
pub fn norm(point: &Point<f64>) -> f64 {
    point.x().hypot(point.y())
}

/// Flat Euclidean distance between two positions.
#[inline]
pub fn euclidean_distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    Euclidean.distance(*a, *b)
}

/// Squared flat Euclidean distance between two positions.
#[inline]
pub fn squared_euclidean_distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    dx * dx + dy * dy
}

/// Hyperbolic distance between two positions in the Poincaré disk.
///
/// `acosh(1 + 2|a - b|² / ((1 - |a|²)(1 - |b|²)))`
///
/// # Examples
///
/// ```
/// use hyperquad_types::geometry::hyperbolic_distance;
/// use geo::Point;
///
/// let origin = Point::new(0.0, 0.0);
/// let p = Point::new(0.5, 0.0);
/// // d(0, r) = 2 artanh(r)
/// let expected = 2.0 * 0.5_f64.atanh();
/// assert!((hyperbolic_distance(&origin, &p) - expected).abs() < 1e-12);
/// ```
pub fn hyperbolic_distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    let diff_sq = squared_euclidean_distance(a, b);
    let a_sq = a.x() * a.x() + a.y() * a.y();
    let b_sq = b.x() * b.x() + b.y() * b.y();
    let denominator = (1.0 - a_sq) * (1.0 - b_sq);
    (1.0 + 2.0 * diff_sq / denominator).acosh()
}

/// Hyperbolic distance between two polar coordinates.
pub fn hyperbolic_distance_polar(angle_a: f64, r_a: f64, angle_b: f64, r_b: f64) -> f64 {
    let diff_sq = r_a * r_a + r_b * r_b - 2.0 * r_a * r_b * (angle_a - angle_b).cos();
    // cancellation can push tiny separations below zero
    let diff_sq = diff_sq.max(0.0);
    let denominator = (1.0 - r_a * r_a) * (1.0 - r_b * r_b);
    (1.0 + 2.0 * diff_sq / denominator).acosh()
}

/// Native hyperbolic radius to the Euclidean radius in the disk: `tanh(r / 2)`.
#[inline]
pub fn hyperbolic_radius_to_euclidean(hyperbolic_r: f64) -> f64 {
    (hyperbolic_r / 2.0).tanh()
}

/// Euclidean radius in the disk to the native hyperbolic radius: `2 artanh(r)`.
#[inline]
pub fn euclidean_radius_to_hyperbolic(euclidean_r: f64) -> f64 {
    2.0 * euclidean_r.atanh()
}

/// Euclidean image of a hyperbolic circle whose centre sits at distance `r_h`
/// from the origin.
///
/// Returns `(center_r, radius)`: the distance of the Euclidean centre from the
/// origin along the same ray, and the Euclidean radius. Hyperbolic circles in
/// the Poincaré disk are Euclidean circles, but the centres do not coincide.
pub fn euclidean_circle_radial(r_h: f64, hyperbolic_radius: f64) -> (f64, f64) {
    let a = hyperbolic_radius.cosh() - 1.0;
    let b = 1.0 - r_h * r_h;
    let center = (2.0 * r_h) / (b * a + 2.0);
    let radius_sq = center * center - (2.0 * r_h * r_h - b * a) / (b * a + 2.0);
    (center, radius_sq.max(0.0).sqrt())
}

/// Euclidean image of the hyperbolic circle around `center` with the given
/// hyperbolic radius. Returns the Euclidean centre and radius.
///
/// # Examples
///
/// ```
/// use hyperquad_types::geometry::{euclidean_circle, hyperbolic_distance, polar_to_cartesian};
///
/// let center = polar_to_cartesian(1.0, 0.6);
/// let (e_center, e_radius) = euclidean_circle(&center, 0.8);
///
/// // A point on the Euclidean circle lies at hyperbolic distance 0.8.
/// let boundary = geo::Point::new(e_center.x() + e_radius, e_center.y());
/// assert!((hyperbolic_distance(&center, &boundary) - 0.8).abs() < 1e-9);
/// ```
pub fn euclidean_circle(center: &Point<f64>, hyperbolic_radius: f64) -> (Point<f64>, f64) {
    let (angle, r_h) = cartesian_to_polar(center);
    let (r_c, radius) = euclidean_circle_radial(r_h, hyperbolic_radius);
    (polar_to_cartesian(angle, r_c), radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_polar_round_trip() {
        for &(angle, r) in &[(0.0, 0.0), (0.3, 0.2), (PI, 0.9), (1.75 * PI, 0.45)] {
            let p = polar_to_cartesian(angle, r);
            let (back_angle, back_r) = cartesian_to_polar(&p);
            assert!((back_r - r).abs() < EPS);
            if r > 0.0 {
                assert!((back_angle - angle).abs() < EPS, "angle {angle} came back as {back_angle}");
            }
        }
    }

    #[test]
    fn test_cartesian_to_polar_angle_range() {
        let (angle, _) = cartesian_to_polar(&Point::new(1.0, -1e-300));
        assert!((0.0..TAU).contains(&angle));

        let (angle, _) = cartesian_to_polar(&Point::new(-1.0, 0.0));
        assert!((angle - PI).abs() < EPS);
    }

    #[test]
    fn test_hyperbolic_distance_from_origin() {
        let origin = Point::new(0.0, 0.0);
        for &r in &[0.1, 0.5, 0.9, 0.99] {
            let p = polar_to_cartesian(0.7, r);
            let expected = euclidean_radius_to_hyperbolic(r);
            assert!((hyperbolic_distance(&origin, &p) - expected).abs() < 1e-8);
        }
    }

    #[test]
    fn test_hyperbolic_distance_polar_agrees_with_cartesian() {
        let (a_angle, a_r) = (0.4, 0.7);
        let (b_angle, b_r) = (2.9, 0.35);
        let a = polar_to_cartesian(a_angle, a_r);
        let b = polar_to_cartesian(b_angle, b_r);
        let polar = hyperbolic_distance_polar(a_angle, a_r, b_angle, b_r);
        let cartesian = hyperbolic_distance(&a, &b);
        assert!((polar - cartesian).abs() < 1e-9);
    }

    #[test]
    fn test_hyperbolic_distance_dominates_euclidean() {
        let points = [
            polar_to_cartesian(0.0, 0.1),
            polar_to_cartesian(1.0, 0.5),
            polar_to_cartesian(3.0, 0.95),
            polar_to_cartesian(5.5, 0.3),
        ];
        for a in &points {
            for b in &points {
                assert!(hyperbolic_distance(a, b) + EPS >= euclidean_distance(a, b));
            }
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = polar_to_cartesian(2.0, 0.8);
        assert!(hyperbolic_distance(&p, &p).abs() < EPS);
        assert!(hyperbolic_distance_polar(2.0, 0.8, 2.0, 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_radius_conversions_are_inverse() {
        for &r in &[0.0, 0.25, 0.5, 0.99] {
            let back = hyperbolic_radius_to_euclidean(euclidean_radius_to_hyperbolic(r));
            assert!((back - r).abs() < 1e-12);
        }
    }

    #[test]
    fn test_euclidean_circle_at_origin_is_concentric() {
        let (center, radius) = euclidean_circle_radial(0.0, 2.0);
        assert!(center.abs() < EPS);
        assert!((radius - hyperbolic_radius_to_euclidean(2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_euclidean_circle_boundary_points() {
        let center = polar_to_cartesian(4.0, 0.75);
        let hyperbolic_radius = 1.3;
        let (e_center, e_radius) = euclidean_circle(&center, hyperbolic_radius);

        for step in 0..16 {
            let theta = step as f64 * TAU / 16.0;
            let boundary = Point::new(
                e_center.x() + e_radius * theta.cos(),
                e_center.y() + e_radius * theta.sin(),
            );
            let d = hyperbolic_distance(&center, &boundary);
            assert!(
                (d - hyperbolic_radius).abs() < 1e-7,
                "boundary point {step} at distance {d}"
            );
        }
    }
}

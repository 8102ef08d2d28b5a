use crate::geometry::{cartesian_to_polar, hyperbolic_distance_polar, polar_to_cartesian};
use geo::Point;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A polar coordinate inside the Poincaré disk.
///
/// `angle` is measured in radians and expected in `[0, 2π)`; `r` is the
/// Euclidean distance from the disk centre and expected in `[0, 1)`.
///
/// # Examples
///
/// ```
/// use hyperquad_types::point::PolarCoord;
///
/// let coord = PolarCoord::new(std::f64::consts::FRAC_PI_2, 0.5);
/// let position = coord.to_cartesian();
/// assert!(position.x().abs() < 1e-12);
/// assert!((position.y() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarCoord {
    /// Angle in radians
    pub angle: f64,
    /// Euclidean radius in the disk
    pub r: f64,
}

impl PolarCoord {
    /// Create a polar coordinate.
    pub fn new(angle: f64, r: f64) -> Self {
        Self { angle, r }
    }

    /// Create a polar coordinate from a Cartesian position.
    pub fn from_cartesian(point: &Point<f64>) -> Self {
        let (angle, r) = cartesian_to_polar(point);
        Self { angle, r }
    }

    /// The origin of the disk.
    pub fn origin() -> Self {
        Self { angle: 0.0, r: 0.0 }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    /// Cartesian position of this coordinate.
    pub fn to_cartesian(&self) -> Point<f64> {
        polar_to_cartesian(self.angle, self.r)
    }

    /// Whether both components are finite.
    pub fn is_finite(&self) -> bool {
        self.angle.is_finite() && self.r.is_finite()
    }

    /// Whether the coordinate lies inside the open unit disk with a
    /// normalized angle.
    pub fn is_in_disk(&self) -> bool {
        self.is_finite() && (0.0..TAU).contains(&self.angle) && (0.0..1.0).contains(&self.r)
    }

    /// Hyperbolic distance to another coordinate.
    pub fn hyperbolic_distance(&self, other: &PolarCoord) -> f64 {
        hyperbolic_distance_polar(self.angle, self.r, other.angle, other.r)
    }
}

impl From<PolarCoord> for Point<f64> {
    fn from(coord: PolarCoord) -> Self {
        coord.to_cartesian()
    }
}

impl From<(f64, f64)> for PolarCoord {
    fn from((angle, r): (f64, f64)) -> Self {
        Self::new(angle, r)
    }
}

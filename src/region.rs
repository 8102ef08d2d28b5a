//! Polar regions of the disk and the distance bound used for pruning.
//!
//! A [`Region`] is the polar rectangle `[left_angle, right_angle) × [min_r, max_r)`.
//! Its four Cartesian corners are computed once in the constructor; the
//! bounds are private and never change afterwards, so the cached corners
//! always describe the region.

use crate::error::{QuadtreeError, Result};
use geo::Point;
use hyperquad_types::geometry::{
    cartesian_to_polar, euclidean_distance, hyperbolic_distance_polar, polar_to_cartesian,
};
use hyperquad_types::{PolarCoord, PolarWindow};
use std::f64::consts::TAU;
use std::fmt;

/// The polar rectangle owned by one quadtree node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    left_angle: f64,
    right_angle: f64,
    min_r: f64,
    max_r: f64,
    /// `[a, b, c, d]` = `(left, min_r)`, `(right, min_r)`, `(right, max_r)`, `(left, max_r)`
    corners: [Point<f64>; 4],
}

impl Region {
    /// Create a region, checking `0 ≤ left < right ≤ 2π` and `0 ≤ min_r < max_r < 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperquad::Region;
    ///
    /// let region = Region::new(0.0, 0.0, std::f64::consts::PI, 0.5).unwrap();
    /// assert!(region.responsible(1.0, 0.25));
    /// assert!(!region.responsible(std::f64::consts::PI, 0.25));
    ///
    /// assert!(Region::new(1.0, 0.0, 0.5, 0.5).is_err());
    /// ```
    pub fn new(left_angle: f64, min_r: f64, right_angle: f64, max_r: f64) -> Result<Self> {
        let bounds = [left_angle, min_r, right_angle, max_r];
        if !bounds.iter().all(|v| v.is_finite()) {
            return Err(QuadtreeError::InvalidInput(format!(
                "Region bounds must be finite, got {:?}",
                bounds
            )));
        }
        if !(0.0 <= left_angle && left_angle < right_angle && right_angle <= TAU) {
            return Err(QuadtreeError::InvalidInput(format!(
                "Region angles must satisfy 0 <= left < right <= 2π, got [{}, {})",
                left_angle, right_angle
            )));
        }
        if !(0.0 <= min_r && min_r < max_r && max_r < 1.0) {
            return Err(QuadtreeError::InvalidInput(format!(
                "Region radii must satisfy 0 <= min_r < max_r < 1, got [{}, {})",
                min_r, max_r
            )));
        }
        Ok(Self::from_bounds(left_angle, min_r, right_angle, max_r))
    }

    /// Build a region whose bounds are already known to be ordered.
    pub(crate) fn from_bounds(left_angle: f64, min_r: f64, right_angle: f64, max_r: f64) -> Self {
        Self {
            left_angle,
            right_angle,
            min_r,
            max_r,
            corners: [
                polar_to_cartesian(left_angle, min_r),
                polar_to_cartesian(right_angle, min_r),
                polar_to_cartesian(right_angle, max_r),
                polar_to_cartesian(left_angle, max_r),
            ],
        }
    }

    pub fn left_angle(&self) -> f64 {
        self.left_angle
    }

    pub fn right_angle(&self) -> f64 {
        self.right_angle
    }

    pub fn min_r(&self) -> f64 {
        self.min_r
    }

    pub fn max_r(&self) -> f64 {
        self.max_r
    }

    /// Cached Cartesian corners in the order `(left, min_r)`, `(right, min_r)`,
    /// `(right, max_r)`, `(left, max_r)`.
    pub fn corners(&self) -> &[Point<f64>; 4] {
        &self.corners
    }

    /// Half-open containment test. A point on a shared boundary belongs to
    /// the region with the larger lower bound.
    #[inline]
    pub fn responsible(&self, angle: f64, r: f64) -> bool {
        angle >= self.left_angle && angle < self.right_angle && r >= self.min_r && r < self.max_r
    }

    pub fn contains(&self, coord: &PolarCoord) -> bool {
        self.responsible(coord.angle, coord.r)
    }

    /// Hyperbolic distance between the `(left, min_r)` and `(right, max_r)` corners.
    pub fn diagonal(&self) -> f64 {
        hyperbolic_distance_polar(self.left_angle, self.min_r, self.right_angle, self.max_r)
    }

    /// The `(middle_angle, middle_r)` a split would use.
    ///
    /// The angle is halved. The radius is not: area in the disk grows towards
    /// the rim, so the inner half receives more radial span than a midpoint
    /// would give it, which keeps both halves at a comparable point density.
    pub fn split_point(&self) -> (f64, f64) {
        let middle_angle = (self.right_angle - self.left_angle) / 2.0 + self.left_angle;
        let span = self.max_r - self.min_r;
        let denominator =
            ((1.0 - self.max_r * self.max_r) / (1.0 - self.min_r * self.min_r)).sqrt() + 1.0;
        let middle_r = span / denominator + self.min_r;
        (middle_angle, middle_r)
    }

    /// Whether splitting yields four non-empty regions. Fails once the bounds
    /// are so close that the split point rounds onto one of them.
    pub fn can_split(&self) -> bool {
        let (middle_angle, middle_r) = self.split_point();
        self.left_angle < middle_angle
            && middle_angle < self.right_angle
            && self.min_r < middle_r
            && middle_r < self.max_r
    }

    /// The four sub-regions in southwest, southeast, northwest, northeast
    /// order. They partition `self` exactly because neighbours share the
    /// same split values as their boundaries.
    pub fn quadrants(&self) -> [Region; 4] {
        let (middle_angle, middle_r) = self.split_point();
        [
            Self::from_bounds(self.left_angle, self.min_r, middle_angle, middle_r),
            Self::from_bounds(middle_angle, self.min_r, self.right_angle, middle_r),
            Self::from_bounds(self.left_angle, middle_r, middle_angle, self.max_r),
            Self::from_bounds(middle_angle, middle_r, self.right_angle, self.max_r),
        ]
    }

    /// Whether the region can overlap the window. Used only for pruning.
    pub fn intersects_window(&self, window: &PolarWindow) -> bool {
        !(window.min_angle >= self.right_angle
            || window.max_angle <= self.left_angle
            || window.min_r >= self.max_r
            || window.max_r <= self.min_r)
    }

    /// Lower bound on the distance from `query` to any point of the region.
    ///
    /// Zero when the query lies inside. Otherwise the Euclidean distance to
    /// the nearest of the four boundary pieces. Euclidean distance never
    /// exceeds hyperbolic distance in the disk, so the value is safe for
    /// pruning both flat and hyperbolic queries.
    pub fn euclidean_lower_bound(&self, query: &Point<f64>) -> f64 {
        let (phi, r) = cartesian_to_polar(query);
        if self.responsible(phi, r) {
            return 0.0;
        }
        self.boundary_distance(query, phi, r)
    }

    /// [`Self::euclidean_lower_bound`] for a polar query.
    pub fn euclidean_lower_bound_polar(&self, query: &PolarCoord) -> f64 {
        if self.contains(query) {
            return 0.0;
        }
        let position = query.to_cartesian();
        self.boundary_distance(&position, query.angle, query.r)
    }

    fn boundary_distance(&self, query: &Point<f64>, phi: f64, r: f64) -> f64 {
        let [a, b, c, d] = &self.corners;
        let within_span = phi >= self.left_angle && phi <= self.right_angle;

        let outer = if within_span {
            (r - self.max_r).abs()
        } else {
            euclidean_distance(query, c).min(euclidean_distance(query, d))
        };
        let inner = if within_span {
            (r - self.min_r).abs()
        } else {
            euclidean_distance(query, a).min(euclidean_distance(query, b))
        };
        let left = self.edge_distance(query, phi, r, self.left_angle, a, d);
        let right = self.edge_distance(query, phi, r, self.right_angle, b, c);

        outer.min(inner).min(left.min(right))
    }

    /// Distance to the radial edge at `edge_angle`, running from `low` (at
    /// `min_r`) to `high` (at `max_r`).
    fn edge_distance(
        &self,
        query: &Point<f64>,
        phi: f64,
        r: f64,
        edge_angle: f64,
        low: &Point<f64>,
        high: &Point<f64>,
    ) -> f64 {
        let projection = r * (phi - edge_angle).cos();
        if projection > self.min_r && projection < self.max_r {
            euclidean_distance(query, &polar_to_cartesian(edge_angle, projection))
        } else {
            euclidean_distance(query, low).min(euclidean_distance(query, high))
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}) x [{:.6}, {:.6})",
            self.left_angle, self.right_angle, self.min_r, self.max_r
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperquad_types::geometry::hyperbolic_distance;
    use std::f64::consts::PI;

    fn full_disk() -> Region {
        Region::new(0.0, 0.0, TAU, 0.999).unwrap()
    }

    #[test]
    fn test_region_bounds_validation() {
        assert!(Region::new(0.0, 0.0, TAU, 0.5).is_ok());
        assert!(Region::new(0.5, 0.0, 0.5, 0.5).is_err());
        assert!(Region::new(0.0, 0.5, 1.0, 0.5).is_err());
        assert!(Region::new(0.0, 0.0, 1.0, 1.0).is_err());
        assert!(Region::new(-0.1, 0.0, 1.0, 0.5).is_err());
        assert!(Region::new(0.0, 0.0, 7.0, 0.5).is_err());
        assert!(Region::new(0.0, f64::NAN, 1.0, 0.5).is_err());
    }

    #[test]
    fn test_corners_match_bounds() {
        let region = Region::new(0.5, 0.2, 1.5, 0.6).unwrap();
        let [a, b, c, d] = region.corners();
        assert_eq!(*a, polar_to_cartesian(0.5, 0.2));
        assert_eq!(*b, polar_to_cartesian(1.5, 0.2));
        assert_eq!(*c, polar_to_cartesian(1.5, 0.6));
        assert_eq!(*d, polar_to_cartesian(0.5, 0.6));
    }

    #[test]
    fn test_responsible_is_half_open() {
        let region = Region::new(1.0, 0.2, 2.0, 0.4).unwrap();
        assert!(region.responsible(1.0, 0.2));
        assert!(!region.responsible(2.0, 0.3));
        assert!(!region.responsible(1.5, 0.4));
        assert!(!region.responsible(0.999, 0.3));
        assert!(region.responsible(1.999, 0.399));
    }

    #[test]
    fn test_split_point_favours_inner_annulus() {
        let region = full_disk();
        let (middle_angle, middle_r) = region.split_point();
        assert!((middle_angle - PI).abs() < 1e-12);
        // more than the naive midpoint of the radial span
        assert!(middle_r > 0.999 / 2.0);
        assert!(middle_r < 0.999);

        let expected = 0.999 / ((1.0_f64 - 0.999 * 0.999).sqrt() + 1.0);
        assert!((middle_r - expected).abs() < 1e-15);
    }

    #[test]
    fn test_quadrants_partition_region() {
        let region = Region::new(0.3, 0.1, 2.3, 0.8).unwrap();
        let quadrants = region.quadrants();
        let (middle_angle, middle_r) = region.split_point();

        let angles = [0.3, 0.7, middle_angle, 1.9, 2.299_999];
        let radii = [0.1, 0.35, middle_r, 0.6, 0.799_999];
        for &angle in &angles {
            for &r in &radii {
                let owners = quadrants.iter().filter(|q| q.responsible(angle, r)).count();
                assert_eq!(owners, 1, "({angle}, {r}) owned by {owners} quadrants");
            }
        }

        // outside the parent belongs to no quadrant
        assert!(quadrants.iter().all(|q| !q.responsible(2.3, 0.5)));
        assert!(quadrants.iter().all(|q| !q.responsible(1.0, 0.8)));
    }

    #[test]
    fn test_can_split_detects_exhausted_resolution() {
        assert!(full_disk().can_split());

        let tiny = Region::new(1.0, 0.5, 1.0 + f64::EPSILON, 0.5 + f64::EPSILON).unwrap();
        assert!(!tiny.can_split());
    }

    #[test]
    fn test_intersects_window() {
        let region = Region::new(1.0, 0.2, 2.0, 0.4).unwrap();
        assert!(region.intersects_window(&PolarWindow::new(1.5, 3.0, 0.0, 0.3)));
        assert!(region.intersects_window(&PolarWindow::full_disk(0.9)));
        assert!(!region.intersects_window(&PolarWindow::new(2.0, 3.0, 0.0, 0.9)));
        assert!(!region.intersects_window(&PolarWindow::new(0.0, 1.0, 0.0, 0.9)));
        assert!(!region.intersects_window(&PolarWindow::new(0.0, TAU, 0.4, 0.9)));
        assert!(!region.intersects_window(&PolarWindow::new(0.0, TAU, 0.0, 0.2)));
    }

    #[test]
    fn test_lower_bound_zero_inside() {
        let region = Region::new(1.0, 0.2, 2.0, 0.4).unwrap();
        let inside = PolarCoord::new(1.5, 0.3);
        assert_eq!(region.euclidean_lower_bound_polar(&inside), 0.0);
        assert_eq!(region.euclidean_lower_bound(&inside.to_cartesian()), 0.0);
    }

    #[test]
    fn test_lower_bound_radial_gap() {
        let region = Region::new(1.0, 0.2, 2.0, 0.4).unwrap();
        let outside = PolarCoord::new(1.5, 0.7);
        let bound = region.euclidean_lower_bound_polar(&outside);
        assert!((bound - 0.3).abs() < 1e-12, "bound was {bound}");

        let below = PolarCoord::new(1.5, 0.05);
        let bound = region.euclidean_lower_bound_polar(&below);
        assert!((bound - 0.15).abs() < 1e-12, "bound was {bound}");
    }

    #[test]
    fn test_lower_bound_side_projection() {
        // query beside the left edge at angle 0.5 sees the edge at distance r·sin(Δ)
        let region = Region::new(0.5, 0.2, 1.0, 0.9).unwrap();
        let query = PolarCoord::new(0.3, 0.6);
        let expected = 0.6 * (0.2_f64).sin();
        let bound = region.euclidean_lower_bound_polar(&query);
        assert!((bound - expected).abs() < 1e-12, "bound {bound}, expected {expected}");
    }

    #[test]
    fn test_lower_bound_never_exceeds_true_distance() {
        let region = Region::new(1.0, 0.3, 1.6, 0.7).unwrap();
        let samples: Vec<Point<f64>> = (0..8)
            .flat_map(|i| {
                (0..8).map(move |j| {
                    polar_to_cartesian(1.0 + 0.6 * i as f64 / 8.0, 0.3 + 0.4 * j as f64 / 8.0)
                })
            })
            .collect();

        for step in 0..64 {
            let angle = step as f64 * TAU / 64.0;
            for &r in &[0.0, 0.1, 0.5, 0.8, 0.95] {
                let query = polar_to_cartesian(angle, r);
                let bound = region.euclidean_lower_bound(&query);
                for p in &samples {
                    assert!(bound <= euclidean_distance(&query, p) + 1e-12);
                    assert!(bound <= hyperbolic_distance(&query, p) + 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_display() {
        let region = Region::new(0.0, 0.0, 1.0, 0.5).unwrap();
        assert_eq!(region.to_string(), "[0.000000, 1.000000) x [0.000000, 0.500000)");
    }
}

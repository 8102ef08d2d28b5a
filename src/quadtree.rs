//! The owning quadtree: a validated root node plus the queries callers use.

use crate::config::Config;
use crate::error::{QuadtreeError, Result};
use crate::node::QuadNode;
use crate::region::Region;
use crate::stats::TreeStats;
use crate::validation::{validate_coord, validate_distance, validate_query_point};
use geo::Point;
use hyperquad_types::geometry::{cartesian_to_polar, euclidean_circle};
use hyperquad_types::{PolarCoord, PolarWindow};
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// A polar quadtree over the disk of radius `config.max_radius`.
///
/// # Examples
///
/// ```rust
/// use hyperquad::{PolarCoord, Quadtree};
///
/// let mut tree = Quadtree::default();
/// tree.insert("a", PolarCoord::new(0.5, 0.3))?;
/// tree.insert("b", PolarCoord::new(0.6, 0.3))?;
/// tree.insert("c", PolarCoord::new(3.5, 0.9))?;
///
/// let near = tree.close_elements(PolarCoord::new(0.55, 0.3), 0.5)?;
/// assert_eq!(near.len(), 2);
/// # Ok::<(), hyperquad::QuadtreeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Quadtree<T> {
    root: QuadNode<T>,
    config: Config,
}

impl<T> Quadtree<T> {
    /// Create an empty tree after validating `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let region = Region::new(0.0, 0.0, TAU, config.max_radius)?;
        Ok(Self {
            root: QuadNode::new(region, config.capacity, config.min_region_size),
            config,
        })
    }

    /// Create an empty tree with default settings and the given root radius.
    pub fn with_max_radius(max_radius: f64) -> Result<Self> {
        Self::new(Config::default().with_max_radius(max_radius))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn root(&self) -> &QuadNode<T> {
        &self.root
    }

    /// Insert `element` at `coord`.
    ///
    /// Non-finite coordinates are rejected with [`QuadtreeError::InvalidInput`].
    /// An angle outside `[0, 2π)` or a radius outside `[0, max_radius)` lies
    /// outside the root region and fails with
    /// [`QuadtreeError::InvariantViolated`], as it would on [`QuadNode::insert`].
    pub fn insert(&mut self, element: T, coord: PolarCoord) -> Result<()> {
        if let Err(e) = validate_coord(&coord, self.config.max_radius) {
            log::warn!("Rejecting insert: {}", e);
            return Err(e);
        }
        self.root.insert(element, coord.angle, coord.r)
    }

    /// Insert every `(element, coord)` pair, stopping at the first failure.
    pub fn extend<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = (T, PolarCoord)>,
    {
        for (element, coord) in items {
            self.insert(element, coord)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            elements: self.root.len(),
            height: self.root.height(),
            leaf_count: self.root.leaf_count(),
            max_leaf_len: self.root.max_leaf_len(),
        }
    }

    /// Every stored element.
    pub fn elements(&self) -> Vec<&T> {
        self.root.elements()
    }

    /// The leaf responsible for `coord`.
    pub fn appropriate_leaf(&self, coord: PolarCoord) -> Result<&QuadNode<T>> {
        validate_coord(&coord, self.config.max_radius)?;
        self.root.appropriate_leaf(coord.angle, coord.r)
    }

    /// Elements whose hyperbolic distance to `query` is strictly less than
    /// `max_distance`.
    pub fn close_elements(&self, query: PolarCoord, max_distance: f64) -> Result<Vec<&T>> {
        validate_query_point(&query)?;
        validate_distance(max_distance)?;
        self.root.close_elements(&query.to_cartesian(), max_distance)
    }

    /// Elements strictly inside the flat Euclidean circle around `center`,
    /// pruned by `window`. See [`QuadNode::elements_in_euclidean_circle`].
    pub fn elements_in_euclidean_circle(
        &self,
        window: &PolarWindow,
        center: &Point<f64>,
        radius: f64,
    ) -> Result<Vec<&T>> {
        if !window.is_finite() || !center.x().is_finite() || !center.y().is_finite() {
            return Err(QuadtreeError::InvalidInput(format!(
                "Circle query needs finite bounds, got window {:?} and center {:?}",
                window, center
            )));
        }
        validate_distance(radius)?;

        let mut result = Vec::new();
        self.root
            .elements_in_euclidean_circle(window, center, radius, &mut result);
        Ok(result)
    }

    /// Elements within hyperbolic distance `hyperbolic_radius` of `center`.
    ///
    /// A hyperbolic circle in the Poincaré disk is a Euclidean circle with a
    /// shifted centre, so this runs a Euclidean circle query on that image
    /// with a polar window around it. Windows crossing the `0`/`2π` seam are
    /// split in two.
    pub fn elements_in_hyperbolic_circle(
        &self,
        center: PolarCoord,
        hyperbolic_radius: f64,
    ) -> Result<Vec<&T>> {
        validate_query_point(&center)?;
        validate_distance(hyperbolic_radius)?;

        let (euclidean_center, euclidean_radius) =
            euclidean_circle(&center.to_cartesian(), hyperbolic_radius);
        let windows = circle_windows(&euclidean_center, euclidean_radius);

        let mut result = Vec::new();
        self.root.collect_in_euclidean_circle(
            &windows,
            &euclidean_center,
            euclidean_radius,
            &mut result,
        );
        Ok(result)
    }
}

impl<T> Default for Quadtree<T> {
    fn default() -> Self {
        let config = Config::default();
        let region = Region::from_bounds(0.0, 0.0, TAU, config.max_radius);
        Self {
            root: QuadNode::new(region, config.capacity, config.min_region_size),
            config,
        }
    }
}

/// Polar windows covering the Euclidean circle around `center`.
fn circle_windows(center: &Point<f64>, radius: f64) -> SmallVec<[PolarWindow; 2]> {
    let (phi_c, r_c) = cartesian_to_polar(center);
    let min_r = r_c - radius;
    let max_r = (r_c + radius).min(1.0);

    let mut windows = SmallVec::new();
    if min_r <= 0.0 {
        // the circle contains the origin
        windows.push(PolarWindow::new(0.0, TAU, 0.0, max_r));
        return windows;
    }

    let spread = (radius / r_c).asin();
    let min_phi = phi_c - spread;
    let max_phi = phi_c + spread;
    windows.push(PolarWindow::new(min_phi, max_phi, min_r, max_r));
    if min_phi < 0.0 {
        windows.push(PolarWindow::new(TAU + min_phi, TAU, min_r, max_r));
    }
    if max_phi > TAU {
        windows.push(PolarWindow::new(0.0, max_phi - TAU, min_r, max_r));
    }
    windows
}

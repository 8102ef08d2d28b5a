//! Traversals over a [`QuadNode`] subtree.
//!
//! Two notions of "close" live here and are kept apart on purpose:
//!
//! - [`QuadNode::close_elements`] uses the hyperbolic distance of the disk.
//! - [`QuadNode::elements_in_euclidean_circle`] uses flat Euclidean distance
//!   in the disk's plane and additionally prunes with a polar window.
//!
//! Both skip subtrees whose [`euclidean_lower_bound`](QuadNode::euclidean_lower_bound)
//! rules them out.

use crate::error::{QuadtreeError, Result};
use crate::node::{Contents, QuadNode};
use geo::Point;
use hyperquad_types::PolarWindow;
use hyperquad_types::geometry::{hyperbolic_distance, norm, squared_euclidean_distance};

impl<T> QuadNode<T> {
    /// Every element in the subtree, depth first in southwest, southeast,
    /// northwest, northeast child order.
    pub fn elements(&self) -> Vec<&T> {
        let mut result = Vec::with_capacity(self.len());
        self.collect_elements(&mut result);
        result
    }

    fn collect_elements<'a>(&'a self, result: &mut Vec<&'a T>) {
        match &self.contents {
            Contents::Leaf(entries) => result.extend(entries.iter().map(|e| e.element())),
            Contents::Internal(children) => {
                for child in children.iter() {
                    child.collect_elements(result);
                }
            }
        }
    }

    /// The leaf whose region contains `(angle, r)`.
    ///
    /// Fails with [`QuadtreeError::InvariantViolated`] if this node is not
    /// responsible for the coordinate, or if no child claims it on the way
    /// down.
    pub fn appropriate_leaf(&self, angle: f64, r: f64) -> Result<&QuadNode<T>> {
        if !self.responsible(angle, r) {
            return Err(QuadtreeError::InvariantViolated(format!(
                "point location for ({}, {}) outside node region {}",
                angle,
                r,
                self.region()
            )));
        }

        let mut node = self;
        while let Contents::Internal(children) = &node.contents {
            node = Self::responsible_child(children, angle, r)?;
        }
        Ok(node)
    }

    /// Elements whose hyperbolic distance to `query` is strictly less than
    /// `max_distance`.
    ///
    /// `query` must lie inside the unit disk; it does not need to lie inside
    /// this node's region.
    pub fn close_elements(&self, query: &Point<f64>, max_distance: f64) -> Result<Vec<&T>> {
        if !(norm(query) < 1.0) {
            return Err(QuadtreeError::InvariantViolated(format!(
                "query point ({}, {}) lies outside the unit disk",
                query.x(),
                query.y()
            )));
        }
        let mut result = Vec::new();
        self.collect_close(query, max_distance, &mut result);
        Ok(result)
    }

    fn collect_close<'a>(&'a self, query: &Point<f64>, max_distance: f64, result: &mut Vec<&'a T>) {
        match &self.contents {
            Contents::Leaf(entries) => {
                if self.euclidean_lower_bound(query) < max_distance {
                    result.extend(
                        entries
                            .iter()
                            .filter(|e| hyperbolic_distance(query, e.position()) < max_distance)
                            .map(|e| e.element()),
                    );
                }
            }
            Contents::Internal(children) => {
                for child in children.iter() {
                    if child.is_empty() {
                        continue;
                    }
                    if child.euclidean_lower_bound(query) < max_distance {
                        child.collect_close(query, max_distance, result);
                    } else {
                        log::trace!("Pruned {} for radius query", child.region());
                    }
                }
            }
        }
    }

    /// Append to `result` the elements strictly inside the Euclidean circle
    /// around `center`.
    ///
    /// Subtrees whose region misses `window` are skipped before any distance
    /// is computed; the window only prunes and is not applied to individual
    /// elements.
    pub fn elements_in_euclidean_circle<'a>(
        &'a self,
        window: &PolarWindow,
        center: &Point<f64>,
        radius: f64,
        result: &mut Vec<&'a T>,
    ) {
        self.collect_in_euclidean_circle(std::slice::from_ref(window), center, radius, result);
    }

    /// Circle query pruned by the union of several windows. Each element is
    /// reported at most once even when windows overlap the same region.
    pub(crate) fn collect_in_euclidean_circle<'a>(
        &'a self,
        windows: &[PolarWindow],
        center: &Point<f64>,
        radius: f64,
        result: &mut Vec<&'a T>,
    ) {
        if !windows.iter().any(|w| self.region().intersects_window(w)) {
            return;
        }
        if self.euclidean_lower_bound(center) > radius {
            return;
        }

        match &self.contents {
            Contents::Leaf(entries) => {
                let radius_sq = radius * radius;
                result.extend(
                    entries
                        .iter()
                        .filter(|e| squared_euclidean_distance(e.position(), center) < radius_sq)
                        .map(|e| e.element()),
                );
            }
            Contents::Internal(children) => {
                for child in children.iter() {
                    child.collect_in_euclidean_circle(windows, center, radius, result);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::node::QuadNode;
    use crate::region::Region;
    use hyperquad_types::geometry::{euclidean_distance, polar_to_cartesian};
    use hyperquad_types::{PolarCoord, PolarWindow};
    use std::f64::consts::TAU;

    fn grid_tree(capacity: usize) -> (QuadNode<usize>, Vec<PolarCoord>) {
        let region = Region::new(0.0, 0.0, TAU, 0.999).unwrap();
        let mut node = QuadNode::new(region, capacity, 0.0);
        let mut coords = Vec::new();
        for i in 0..24 {
            for j in 0..12 {
                let coord = PolarCoord::new(i as f64 * TAU / 24.0, 0.02 + j as f64 * 0.08);
                node.insert(coords.len(), coord.angle, coord.r).unwrap();
                coords.push(coord);
            }
        }
        (node, coords)
    }

    #[test]
    fn test_elements_returns_everything() {
        let (node, coords) = grid_tree(6);
        let mut elements: Vec<usize> = node.elements().into_iter().copied().collect();
        elements.sort_unstable();
        assert_eq!(elements, (0..coords.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_appropriate_leaf_contains_inserted_element() {
        let (node, coords) = grid_tree(6);
        for (id, coord) in coords.iter().enumerate() {
            let leaf = node.appropriate_leaf(coord.angle, coord.r).unwrap();
            assert!(leaf.is_leaf());
            assert!(leaf.region().contains(coord));
            assert!(leaf.entries().iter().any(|e| *e.element() == id));
        }
    }

    #[test]
    fn test_appropriate_leaf_outside_region() {
        let (node, _) = grid_tree(6);
        let err = node.appropriate_leaf(1.0, 0.9995).unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_close_elements_rejects_point_outside_disk() {
        let (node, _) = grid_tree(6);
        let err = node
            .close_elements(&geo::Point::new(1.0, 0.0), 1.0)
            .unwrap_err();
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_close_elements_zero_distance_matches_nothing() {
        let (node, coords) = grid_tree(6);
        let query = coords[5].to_cartesian();
        assert!(node.close_elements(&query, 0.0).unwrap().is_empty());
    }

    #[test]
    fn test_close_elements_includes_self_for_positive_radius() {
        let (node, coords) = grid_tree(6);
        let query = coords[40].to_cartesian();
        let found = node.close_elements(&query, 1e-6).unwrap();
        assert_eq!(found, vec![&40]);
    }

    #[test]
    fn test_euclidean_circle_matches_scan() {
        let (node, coords) = grid_tree(5);
        let center = polar_to_cartesian(1.0, 0.5);
        let radius = 0.3;

        let mut found: Vec<usize> = Vec::new();
        let mut result = Vec::new();
        node.elements_in_euclidean_circle(&PolarWindow::full_disk(1.0), &center, radius, &mut result);
        found.extend(result.into_iter().copied());
        found.sort_unstable();

        let expected: Vec<usize> = coords
            .iter()
            .enumerate()
            .filter(|(_, c)| euclidean_distance(&c.to_cartesian(), &center) < radius)
            .map(|(id, _)| id)
            .collect();
        assert!(!expected.is_empty());
        assert_eq!(found, expected);
    }

    #[test]
    fn test_euclidean_circle_window_prunes_regions() {
        let (node, _) = grid_tree(5);
        let center = polar_to_cartesian(1.0, 0.5);
        // a window on the opposite side of the disk excludes every leaf near the circle
        let window = PolarWindow::new(4.0, 5.0, 0.9, 0.95);
        let mut result = Vec::new();
        node.elements_in_euclidean_circle(&window, &center, 0.1, &mut result);
        assert!(result.is_empty());
    }

    #[test]
    fn test_overlapping_windows_do_not_duplicate() {
        let (node, coords) = grid_tree(1000);
        assert!(node.is_leaf());
        let center = polar_to_cartesian(0.0, 0.5);
        let windows = [
            PolarWindow::new(-0.5, 0.5, 0.2, 0.8),
            PolarWindow::new(TAU - 0.5, TAU, 0.2, 0.8),
        ];
        let mut result = Vec::new();
        node.collect_in_euclidean_circle(&windows, &center, 0.2, &mut result);

        let expected = coords
            .iter()
            .filter(|c| euclidean_distance(&c.to_cartesian(), &center) < 0.2)
            .count();
        assert_eq!(result.len(), expected);
    }
}

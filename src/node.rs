//! Quadtree nodes: element storage and the split policy.
//!
//! A node starts as a leaf. When a leaf is full it splits into four children
//! that partition its region and hands its entries down to them; it never
//! turns back into a leaf. Children are boxed and exclusively owned by their
//! parent.

use crate::error::{QuadtreeError, Result};
use crate::region::Region;
use geo::Point;
use hyperquad_types::PolarCoord;

/// A stored element with its coordinate and cached Cartesian position.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    element: T,
    coord: PolarCoord,
    position: Point<f64>,
}

impl<T> Entry<T> {
    fn new(element: T, angle: f64, r: f64) -> Self {
        let coord = PolarCoord::new(angle, r);
        Self {
            element,
            coord,
            position: coord.to_cartesian(),
        }
    }

    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn coord(&self) -> PolarCoord {
        self.coord
    }

    pub fn position(&self) -> &Point<f64> {
        &self.position
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Contents<T> {
    Leaf(Vec<Entry<T>>),
    /// Southwest, southeast, northwest, northeast.
    Internal(Box<[QuadNode<T>; 4]>),
}

/// A node of the polar quadtree.
#[derive(Debug, Clone)]
pub struct QuadNode<T> {
    region: Region,
    capacity: usize,
    min_region_size: f64,
    element_count: usize,
    pub(crate) contents: Contents<T>,
}

impl<T> QuadNode<T> {
    /// Create an empty leaf covering `region`.
    ///
    /// `capacity` is the split threshold: a leaf holding `capacity - 1`
    /// entries splits on the next insertion. Leaves whose hyperbolic diagonal
    /// is below `min_region_size` never split.
    pub fn new(region: Region, capacity: usize, min_region_size: f64) -> Self {
        Self {
            region,
            capacity,
            min_region_size,
            element_count: 0,
            contents: Contents::Leaf(Vec::new()),
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn min_region_size(&self) -> f64 {
        self.min_region_size
    }

    /// Number of elements stored in this subtree.
    pub fn len(&self) -> usize {
        self.element_count
    }

    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.contents, Contents::Leaf(_))
    }

    /// The four children of an internal node, `None` for a leaf.
    pub fn children(&self) -> Option<&[QuadNode<T>; 4]> {
        match &self.contents {
            Contents::Leaf(_) => None,
            Contents::Internal(children) => Some(children),
        }
    }

    /// Entries stored directly in this node. Always empty for internal nodes.
    pub fn entries(&self) -> &[Entry<T>] {
        match &self.contents {
            Contents::Leaf(entries) => entries,
            Contents::Internal(_) => &[],
        }
    }

    /// Whether this node's region owns `(angle, r)`.
    #[inline]
    pub fn responsible(&self, angle: f64, r: f64) -> bool {
        self.region.responsible(angle, r)
    }

    /// Lower bound on the distance from `query` to anything this subtree can hold.
    #[inline]
    pub fn euclidean_lower_bound(&self, query: &Point<f64>) -> f64 {
        self.region.euclidean_lower_bound(query)
    }

    /// Polar variant of [`Self::euclidean_lower_bound`].
    #[inline]
    pub fn euclidean_lower_bound_polar(&self, query: &PolarCoord) -> f64 {
        self.region.euclidean_lower_bound_polar(query)
    }

    /// Insert `element` at `(angle, r)`.
    ///
    /// The coordinate must lie in this node's region; otherwise the call
    /// fails with [`QuadtreeError::InvariantViolated`] and nothing is stored.
    pub fn insert(&mut self, element: T, angle: f64, r: f64) -> Result<()> {
        if !self.responsible(angle, r) {
            return Err(QuadtreeError::InvariantViolated(format!(
                "coordinate ({}, {}) lies outside node region {}",
                angle, r, self.region
            )));
        }
        self.insert_entry(Entry::new(element, angle, r))
    }

    fn insert_entry(&mut self, entry: Entry<T>) -> Result<()> {
        debug_assert!(self.region.contains(&entry.coord));

        if self.is_full() {
            self.split()?;
        }

        match &mut self.contents {
            Contents::Leaf(entries) => entries.push(entry),
            Contents::Internal(children) => {
                let (angle, r) = (entry.coord.angle, entry.coord.r);
                Self::responsible_child_mut(children, angle, r)?.insert_entry(entry)?;
            }
        }

        self.element_count += 1;
        Ok(())
    }

    /// Whether the next insertion has to split this leaf first.
    fn is_full(&self) -> bool {
        match &self.contents {
            Contents::Leaf(entries) => {
                entries.len() + 1 >= self.capacity
                    && self.region.diagonal() >= self.min_region_size
                    && self.region.can_split()
            }
            Contents::Internal(_) => false,
        }
    }

    /// Turn this leaf into an internal node with four children and hand the
    /// stored entries down to them.
    ///
    /// Every entry's target quadrant is resolved before any entry moves, so
    /// on error the leaf and its count are left as they were.
    fn split(&mut self) -> Result<()> {
        let regions = self.region.quadrants();
        let Contents::Leaf(entries) = &mut self.contents else {
            return Ok(());
        };

        let slots = entries
            .iter()
            .map(|entry| {
                let (angle, r) = (entry.coord.angle, entry.coord.r);
                regions
                    .iter()
                    .position(|region| region.responsible(angle, r))
                    .ok_or_else(|| missing_child(&regions, angle, r))
            })
            .collect::<Result<Vec<usize>>>()?;

        let (middle_angle, middle_r) = self.region.split_point();
        log::debug!(
            "Splitting {} at angle {:.6}, radius {:.6} with {} entries",
            self.region,
            middle_angle,
            middle_r,
            entries.len()
        );

        // at most `capacity - 1` entries move, so no child exceeds its own limit
        let mut buckets: [Vec<Entry<T>>; 4] = Default::default();
        for (entry, slot) in std::mem::take(entries).into_iter().zip(slots) {
            buckets[slot].push(entry);
        }
        let mut buckets = buckets.into_iter();
        let children = regions.map(|region| {
            let entries = buckets.next().unwrap_or_default();
            QuadNode {
                region,
                capacity: self.capacity,
                min_region_size: self.min_region_size,
                element_count: entries.len(),
                contents: Contents::Leaf(entries),
            }
        });
        self.contents = Contents::Internal(Box::new(children));
        Ok(())
    }

    pub(crate) fn responsible_child(
        children: &[QuadNode<T>; 4],
        angle: f64,
        r: f64,
    ) -> Result<&QuadNode<T>> {
        debug_assert!(children.iter().filter(|c| c.responsible(angle, r)).count() <= 1);
        children
            .iter()
            .find(|child| child.responsible(angle, r))
            .ok_or_else(|| missing_child(children.iter().map(QuadNode::region), angle, r))
    }

    fn responsible_child_mut(
        children: &mut [QuadNode<T>; 4],
        angle: f64,
        r: f64,
    ) -> Result<&mut QuadNode<T>> {
        if let Some(index) = children.iter().position(|child| child.responsible(angle, r)) {
            Ok(&mut children[index])
        } else {
            Err(missing_child(children.iter().map(QuadNode::region), angle, r))
        }
    }

    /// Depth of the subtree; a lone leaf has height 1.
    pub fn height(&self) -> usize {
        match &self.contents {
            Contents::Leaf(_) => 1,
            Contents::Internal(children) => {
                1 + children.iter().map(QuadNode::height).max().unwrap_or(0)
            }
        }
    }

    /// Number of leaves in the subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.contents {
            Contents::Leaf(_) => 1,
            Contents::Internal(children) => children.iter().map(QuadNode::leaf_count).sum(),
        }
    }

    /// Largest number of entries held by any single leaf.
    pub fn max_leaf_len(&self) -> usize {
        match &self.contents {
            Contents::Leaf(entries) => entries.len(),
            Contents::Internal(children) => children
                .iter()
                .map(QuadNode::max_leaf_len)
                .max()
                .unwrap_or(0),
        }
    }
}

fn missing_child<'a>(
    regions: impl IntoIterator<Item = &'a Region>,
    angle: f64,
    r: f64,
) -> QuadtreeError {
    let regions: Vec<String> = regions.into_iter().map(Region::to_string).collect();
    log::error!(
        "No child claims ({}, {}); child regions: {}",
        angle,
        r,
        regions.join(", ")
    );
    QuadtreeError::InvariantViolated(format!(
        "no child region contains ({}, {}) although the parent does",
        angle, r
    ))
}

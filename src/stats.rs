use serde::{Deserialize, Serialize};

/// Shape statistics of a quadtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Number of stored elements
    pub elements: usize,
    /// Longest root-to-leaf path, counting both ends
    pub height: usize,
    /// Number of leaves
    pub leaf_count: usize,
    /// Largest number of elements held by a single leaf
    pub max_leaf_len: usize,
}

impl TreeStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mean number of elements per leaf.
    pub fn mean_leaf_len(&self) -> f64 {
        if self.leaf_count == 0 {
            0.0
        } else {
            self.elements as f64 / self.leaf_count as f64
        }
    }
}

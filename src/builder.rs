//! Quadtree builder for flexible configuration
//!
//! Collects configuration step by step and validates it once in
//! [`QuadtreeBuilder::build`].

use crate::config::Config;
use crate::error::Result;
use crate::quadtree::Quadtree;

/// Builder for [`Quadtree`] instances.
///
/// ```rust
/// use hyperquad::QuadtreeBuilder;
///
/// let tree = QuadtreeBuilder::new()
///     .capacity(64)
///     .hyperbolic_radius(12.0)
///     .build::<u64>()?;
/// assert_eq!(tree.config().capacity, 64);
/// # Ok::<(), hyperquad::QuadtreeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuadtreeBuilder {
    config: Config,
}

impl QuadtreeBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leaf size at which nodes split.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Hyperbolic diagonal below which regions stop splitting.
    pub fn min_region_size(mut self, min_region_size: f64) -> Self {
        self.config.min_region_size = min_region_size;
        self
    }

    /// Euclidean radius of the root region.
    pub fn max_radius(mut self, max_radius: f64) -> Self {
        self.config.max_radius = max_radius;
        self
    }

    /// Cover a hyperbolic disk of native radius `hyperbolic_radius`.
    pub fn hyperbolic_radius(mut self, hyperbolic_radius: f64) -> Self {
        self.config = self.config.with_hyperbolic_radius(hyperbolic_radius);
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and build an empty tree.
    pub fn build<T>(self) -> Result<Quadtree<T>> {
        Quadtree::new(self.config)
    }
}

//! Polar quadtree over the Poincaré disk with hyperbolic neighbourhood queries.
//!
//! Points are inserted by polar coordinate `(angle, r)` inside the unit disk.
//! Leaves split into four children when full; the radial split point is
//! shifted inwards so both halves see a similar share of points under the
//! usual hyperbolic point distributions. Queries prune subtrees with a cheap
//! Euclidean lower bound before computing any hyperbolic distance.
//!
//! ```rust
//! use hyperquad::{PolarCoord, Quadtree};
//!
//! let mut tree = Quadtree::default();
//! for i in 0..100u32 {
//!     let angle = i as f64 * 0.0628;
//!     tree.insert(i, PolarCoord::new(angle, 0.5))?;
//! }
//!
//! // hyperbolic radius query
//! let near = tree.close_elements(PolarCoord::new(0.0, 0.5), 0.3)?;
//! assert!(near.contains(&&0));
//!
//! // the same neighbourhood through the Euclidean image of the circle
//! let mut circle = tree.elements_in_hyperbolic_circle(PolarCoord::new(0.0, 0.5), 0.3)?;
//! circle.sort();
//! let mut near = near;
//! near.sort();
//! assert_eq!(circle, near);
//! # Ok::<(), hyperquad::QuadtreeError>(())
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod node;
pub mod query;
pub mod quadtree;
pub mod region;
pub mod stats;
pub mod validation;

pub use builder::QuadtreeBuilder;
pub use config::Config;
pub use error::{QuadtreeError, Result};
pub use node::{Entry, QuadNode};
pub use quadtree::Quadtree;
pub use region::Region;
pub use stats::TreeStats;

pub use hyperquad_types::geometry;
pub use hyperquad_types::{PolarCoord, PolarWindow};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, QuadNode, Quadtree, QuadtreeBuilder, QuadtreeError, Result};

    pub use crate::{PolarCoord, PolarWindow, Region, TreeStats};

    pub use crate::geometry::{hyperbolic_distance, polar_to_cartesian};

    pub use geo::Point;
}

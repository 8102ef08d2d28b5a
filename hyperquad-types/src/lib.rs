//! # hyperquad-types
//!
//! Coordinate types and Poincaré disk geometry used by the hyperquad index.
//!
//! - **Coordinates**: [`PolarCoord`], an `(angle, r)` pair inside the unit disk
//! - **Windows**: [`PolarWindow`], an angular/radial bounding window
//! - **Geometry**: conversions between polar and Cartesian form, Euclidean and
//!   hyperbolic distances, and the mapping of hyperbolic circles to their
//!   Euclidean image
//!
//! Cartesian positions are `geo::Point<f64>` values so the flat distances can
//! reuse the `geo` crate's metric spaces.
//!
//! ## Examples
//!
//! ```rust
//! use hyperquad_types::point::PolarCoord;
//!
//! let a = PolarCoord::new(0.0, 0.5);
//! let b = PolarCoord::new(std::f64::consts::PI, 0.5);
//!
//! // Two points on opposite sides of the origin are further apart in the
//! // hyperbolic metric than their Euclidean separation of 1.0 suggests.
//! assert!(a.hyperbolic_distance(&b) > 1.0);
//! ```

pub mod geometry;
pub mod point;
pub mod window;

pub use point::PolarCoord;
pub use window::PolarWindow;

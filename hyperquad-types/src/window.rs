use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// An angular/radial bounding window used to prune circle queries.
///
/// The window is the polar rectangle `[min_angle, max_angle] × [min_r, max_r]`.
/// It is a pruning aid, not a membership test: a region is skipped only when
/// it lies entirely outside the window.
///
/// # Examples
///
/// ```
/// use hyperquad_types::window::PolarWindow;
///
/// let window = PolarWindow::new(0.5, 1.0, 0.2, 0.4);
/// assert!(!window.is_full_circle());
/// assert!(PolarWindow::full_disk(0.9).is_full_circle());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarWindow {
    pub min_angle: f64,
    pub max_angle: f64,
    pub min_r: f64,
    pub max_r: f64,
}

impl PolarWindow {
    pub fn new(min_angle: f64, max_angle: f64, min_r: f64, max_r: f64) -> Self {
        Self {
            min_angle,
            max_angle,
            min_r,
            max_r,
        }
    }

    /// A window covering every angle and the radii `[0, max_r]`.
    pub fn full_disk(max_r: f64) -> Self {
        Self::new(0.0, TAU, 0.0, max_r)
    }

    /// Whether the window spans the whole angular range `[0, 2π]`.
    pub fn is_full_circle(&self) -> bool {
        self.min_angle <= 0.0 && self.max_angle >= TAU
    }

    /// Whether any bound is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.min_angle.is_finite()
            && self.max_angle.is_finite()
            && self.min_r.is_finite()
            && self.max_r.is_finite()
    }
}

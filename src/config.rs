//! Quadtree configuration.
//!
//! The configuration surface is small: when a leaf splits, how small a
//! region may get, and how far out in the disk the root reaches.

use crate::error::{QuadtreeError, Result};
use hyperquad_types::geometry::hyperbolic_radius_to_euclidean;
use serde::{Deserialize, Serialize};

/// Quadtree configuration.
///
/// # Example
///
/// ```rust
/// use hyperquad::Config;
///
/// let config = Config::default();
/// assert_eq!(config.capacity, 20);
///
/// let json = r#"{ "capacity": 64, "min_region_size": 0.01 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.capacity, 64);
/// assert_eq!(config.max_radius, Config::default().max_radius);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// A leaf holding `capacity - 1` elements splits on the next insertion.
    #[serde(default = "Config::default_capacity")]
    pub capacity: usize,

    /// Hyperbolic diagonal below which a leaf keeps growing instead of
    /// splitting.
    #[serde(default = "Config::default_min_region_size")]
    pub min_region_size: f64,

    /// Euclidean radius of the root region, in `(0, 1)`.
    ///
    /// Points with `r >= max_radius` are refused on insert, so the default of
    /// `0.999` rejects the outermost band `[0.999, 1)` of the disk. Raise it
    /// with [`Config::with_max_radius`], or size it from a hyperbolic radius
    /// `R` with [`Config::with_hyperbolic_radius`] (`tanh(R / 2)`). It cannot
    /// reach `1.0`: the radial split point of a region touching the rim is
    /// the rim itself, so such a region would never split.
    #[serde(default = "Config::default_max_radius")]
    pub max_radius: f64,
}

impl Config {
    const fn default_capacity() -> usize {
        20
    }

    const fn default_min_region_size() -> f64 {
        0.0
    }

    const fn default_max_radius() -> f64 {
        0.999
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_min_region_size(mut self, min_region_size: f64) -> Self {
        self.min_region_size = min_region_size;
        self
    }

    pub fn with_max_radius(mut self, max_radius: f64) -> Self {
        self.max_radius = max_radius;
        self
    }

    /// Size the root to cover a hyperbolic disk of native radius
    /// `hyperbolic_radius`, i.e. `max_radius = tanh(R / 2)`.
    pub fn with_hyperbolic_radius(mut self, hyperbolic_radius: f64) -> Self {
        self.max_radius = hyperbolic_radius_to_euclidean(hyperbolic_radius);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 2 {
            // a leaf with capacity 1 would split before storing anything
            return Err(QuadtreeError::InvalidConfig(format!(
                "capacity must be at least 2, got {}",
                self.capacity
            )));
        }

        if !self.min_region_size.is_finite() || self.min_region_size < 0.0 {
            return Err(QuadtreeError::InvalidConfig(format!(
                "min_region_size must be finite and non-negative, got {}",
                self.min_region_size
            )));
        }

        if !(self.max_radius > 0.0 && self.max_radius < 1.0) {
            return Err(QuadtreeError::InvalidConfig(format!(
                "max_radius must lie in (0, 1), got {}",
                self.max_radius
            )));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: Self::default_capacity(),
            min_region_size: Self::default_min_region_size(),
            max_radius: Self::default_max_radius(),
        }
    }
}

//! Error types for the quadtree.

use thiserror::Error;

/// Errors raised by the spatial index.
///
/// `InvariantViolated` marks a caller or internal-consistency defect: a
/// coordinate handed to a node that does not own it, a coordinate that no
/// child claims, or a query point outside the disk. It is not a transient
/// condition and retrying the same call will fail the same way.
#[derive(Debug, Error)]
pub enum QuadtreeError {
    /// A spatial-index invariant was breached.
    #[error("spatial index invariant violated: {0}")]
    InvariantViolated(String),

    /// Input rejected before reaching the tree.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl QuadtreeError {
    /// Whether this error reports a breached invariant.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolated(_))
    }
}

pub type Result<T> = std::result::Result<T, QuadtreeError>;

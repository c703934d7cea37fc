//! Error taxonomy for the simulation core
//!
//! Construction problems surface as `InvalidConfiguration`. Geometric failures
//! (`NoRealSolution`, `NegativeTime`) are propagated by the boundary and the
//! formulae, and the engine downgrades them to "skip this contact for one tick".

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Bad boundary dimensions or an unusable ensemble setup
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Vector/matrix operation on incompatible shapes
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// Quadratic with a negative discriminant (or no quadratic at all)
    #[error("no real solution (discriminant {discriminant})")]
    NoRealSolution { discriminant: f64 },

    /// Contact time resolved to a point in the future
    #[error("rewind time computed as negative ({0})")]
    NegativeTime(f64),

    /// Geometry that exists only as a drawable stub
    #[error("{0} is not supported")]
    Unsupported(&'static str),

    /// Operation needs another piece of ensemble state set first
    #[error("{0} must be set first")]
    Uninitialized(&'static str),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn config(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }

    pub fn dims(expected: impl ToString, found: impl ToString) -> Self {
        SimError::DimensionMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Whether this failure means "no contact to resolve right now"
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            SimError::NoRealSolution { .. } | SimError::NegativeTime(_)
        )
    }
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;

//! Error taxonomy for gaze construction.

use thiserror::Error;

/// Errors raised while building gaze components.
///
/// Ticking never fails; every per-frame outcome is a deterministic branch.
/// Only construction can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GazeError {
    /// A timing parameter is zero, negative or not a finite number.
    #[error("invalid gaze configuration: {field} {reason}")]
    InvalidConfig {
        /// Name of the offending parameter.
        field: &'static str,
        /// Human-readable explanation.
        reason: String,
    },
}

impl GazeError {
    /// Build an [`GazeError::InvalidConfig`] for a value that must be finite and positive.
    pub fn non_positive(field: &'static str, value: f32) -> Self {
        Self::InvalidConfig {
            field,
            reason: format!("must be finite and greater than zero (got {value})"),
        }
    }
}

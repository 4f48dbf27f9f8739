#![warn(missing_docs)]
//! Core primitives shared across the gaze workspace.

pub mod activatable;
pub mod error;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use activatable::{
    any_conditions_met, dispatch_activate, dispatch_deactivate, shared, Activatable,
    ActivatableHandle, ActivatableSet,
};
pub use error::GazeError;

/// Discrete frame counter driven by the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Opaque handle to whatever the gaze ray hit.
///
/// Only equality matters: the controller uses it to tell whether gaze is
/// still resting on the same object between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "target#{}", self.0)
    }
}

/// Helper to derive a reproducible RNG seeded by run seed + target + tick domains.
pub fn scoped_rng(seed: u64, target: TargetId, tick: SimTick) -> StdRng {
    let seed = seed ^ target.0.rotate_left(32) ^ tick.0;
    StdRng::seed_from_u64(seed)
}

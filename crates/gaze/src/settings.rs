use serde::{Deserialize, Serialize};

/// Construction-time gaze configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GazeSettings {
    /// Require a dwell before activating. When false, activation is immediate.
    pub gaze_timer_enabled: bool,
    /// Keep firing `activate` every tick while an activated target stays gazed at.
    pub rapid_activation: bool,
    /// Seconds of sustained gaze before the dwell completes.
    pub dwell_duration_seconds: f32,
}

impl Default for GazeSettings {
    fn default() -> Self {
        Self {
            gaze_timer_enabled: true,
            rapid_activation: false,
            dwell_duration_seconds: 2.0,
        }
    }
}

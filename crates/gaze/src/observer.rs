//! Optional listeners for gaze state transitions.

use gazekit_core::TargetId;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// A state transition reported by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GazeEvent {
    /// The object under the ray changed (including to nothing).
    TargetChanged {
        /// New target, `None` when the ray hits nothing.
        target: Option<TargetId>,
        /// Display name of the new target.
        name: Option<String>,
        /// Whether the new target carries any activatables.
        interactive: bool,
    },
    /// The aggregate condition check on the current target flipped.
    ConditionsChanged {
        /// Result of the OR over all activatables.
        met: bool,
    },
    /// The dwell timer started running.
    DwellStarted {
        /// Target being dwelt on.
        target: TargetId,
    },
    /// A running dwell was cancelled before completion.
    DwellInterrupted {
        /// Target the dwell was running on.
        target: TargetId,
    },
    /// Activation was dispatched.
    Activated {
        /// Activated target.
        target: TargetId,
        /// Number of activatables whose `activate` ran.
        dispatched: usize,
    },
    /// Deactivation was dispatched after gaze left an activated target.
    Deactivated {
        /// Previously activated target.
        target: TargetId,
        /// Number of activatables notified.
        dispatched: usize,
    },
}

/// Receives [`GazeEvent`]s. The controller works the same with or without observers.
pub trait GazeObserver {
    /// Called synchronously from inside `tick`.
    fn notify(&mut self, event: &GazeEvent);
}

impl<O: GazeObserver + ?Sized> GazeObserver for Rc<RefCell<O>> {
    fn notify(&mut self, event: &GazeEvent) {
        self.borrow_mut().notify(event);
    }
}

/// Keeps every event it sees, in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<GazeEvent>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    pub fn events(&self) -> &[GazeEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<GazeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of activation dispatches recorded.
    pub fn activations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GazeEvent::Activated { .. }))
            .count()
    }

    /// Number of deactivation dispatches recorded.
    pub fn deactivations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GazeEvent::Deactivated { .. }))
            .count()
    }
}

impl GazeObserver for EventLog {
    fn notify(&mut self, event: &GazeEvent) {
        self.events.push(event.clone());
    }
}

/// Three-line status readout for a debug overlay.
#[derive(Debug, Default, Clone)]
pub struct GazeDebugText {
    looking_at: Option<String>,
    interactive: bool,
    conditions: bool,
}

impl GazeDebugText {
    /// Create a readout showing "Nothing".
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the overlay text.
    pub fn text(&self) -> String {
        let (object, gazeable, conditions) = match &self.looking_at {
            None => ("Nothing", "N/A", "N/A".to_string()),
            Some(name) if self.interactive => (name.as_str(), "Yes", self.conditions.to_string()),
            Some(name) => (name.as_str(), "No", "N/A".to_string()),
        };
        format!("Looking At: {object}\nIs Gazeable: {gazeable}\nGaze Conditions: {conditions}")
    }
}

impl GazeObserver for GazeDebugText {
    fn notify(&mut self, event: &GazeEvent) {
        match event {
            GazeEvent::TargetChanged {
                name, interactive, ..
            } => {
                self.looking_at = name.clone();
                self.interactive = *interactive;
                self.conditions = false;
            }
            GazeEvent::ConditionsChanged { met } => self.conditions = *met,
            _ => {}
        }
    }
}

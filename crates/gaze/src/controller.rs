//! Per-frame gaze state machine.

use crate::observer::{GazeEvent, GazeObserver};
use crate::settings::GazeSettings;
use gazekit_core::{
    any_conditions_met, dispatch_activate, dispatch_deactivate, ActivatableSet, GazeError,
    TargetId,
};
use gazekit_physics::{Ray, RaycastHit, RaycastQuery};
use gazekit_timer::{Animation, ClipPlayer, DwellTimer};
use tracing::{debug, info, trace};

/// What a single tick resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The ray hit nothing.
    Idle,
    /// The ray hit an object without activatables.
    NotInteractive,
    /// The target is interactive but none of its conditions are met.
    Blocked,
    /// The dwell timer is running.
    Dwelling {
        /// Normalized timer progress before this tick's advance.
        progress: f32,
    },
    /// Activation was dispatched this tick.
    Activated {
        /// Number of activatables whose `activate` ran.
        dispatched: usize,
    },
    /// The target is already activated and waits for gaze to leave.
    Holding,
}

/// Drives dwell-time activation from a forward gaze ray.
///
/// `cursor_activated` and `object_activated` are independent flags: under
/// rapid activation the controller keeps re-entering activation without
/// leaving the activated state. Losing conditions while still gazing only
/// stops the cursor and any rapid re-firing; `deactivate` is reserved for
/// gaze leaving the target.
pub struct GazeController<A = ClipPlayer> {
    settings: GazeSettings,
    timer: DwellTimer<A>,
    cursor_activated: bool,
    object_activated: bool,
    /// Set by activation, cleared when conditions drop or gaze leaves. While
    /// set, no new dwell starts and rapid activation keeps firing.
    engaged: bool,
    /// Interactive target whose activatables are retained below.
    target: Option<TargetId>,
    /// Last-known activatables, kept across ticks so deactivation still
    /// reaches them after the ray has moved on.
    activatables: ActivatableSet,
    /// Whatever the ray hit last tick, interactive or not, for observers.
    looked_at: Option<(TargetId, bool)>,
    conditions_met: Option<bool>,
    observers: Vec<Box<dyn GazeObserver>>,
}

impl<A: Animation> GazeController<A> {
    /// Build a controller that exclusively owns `animation` as its dwell cursor.
    ///
    /// Fails with [`GazeError::InvalidConfig`] on a non-positive dwell duration
    /// or animation length, even when the gaze timer is disabled.
    pub fn new(settings: GazeSettings, animation: A) -> Result<Self, GazeError> {
        let timer = DwellTimer::configure(animation, settings.dwell_duration_seconds)?;
        debug!(
            timer_enabled = settings.gaze_timer_enabled,
            rapid = settings.rapid_activation,
            duration = settings.dwell_duration_seconds,
            speed = timer.speed(),
            "gaze controller configured"
        );
        Ok(Self {
            settings,
            timer,
            cursor_activated: false,
            object_activated: false,
            engaged: false,
            target: None,
            activatables: Vec::new(),
            looked_at: None,
            conditions_met: None,
            observers: Vec::new(),
        })
    }

    /// Register an observer for state transitions.
    pub fn add_observer(&mut self, observer: impl GazeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Run one frame: raycast, evaluate conditions, drive the timer, dispatch.
    ///
    /// The owned animation is advanced by `dt` after dispatch, so progress
    /// read during a tick reflects playback up to the previous frame.
    pub fn tick<Q>(&mut self, ray: &Ray, query: &Q, dt: f32) -> TickOutcome
    where
        Q: RaycastQuery + ?Sized,
    {
        let hit = if ray.is_degenerate() {
            None
        } else {
            query.cast_ray(ray)
        };
        self.observe_hit(hit.as_ref());

        let outcome = match hit {
            Some(hit) if hit.is_interactive() => self.gaze_at(hit),
            Some(_) => {
                self.release();
                TickOutcome::NotInteractive
            }
            None => {
                self.release();
                TickOutcome::Idle
            }
        };

        self.timer.advance(dt);
        trace!(?outcome, progress = self.timer.progress(), "gaze tick");
        outcome
    }

    fn gaze_at(&mut self, hit: RaycastHit) -> TickOutcome {
        if self.target != Some(hit.target) {
            self.release();
            self.target = Some(hit.target);
        }
        self.activatables = hit.activatables;

        let met = any_conditions_met(&self.activatables);
        self.observe_conditions(met);

        let mut fire = false;
        if !met {
            self.interrupt();
        } else if !self.cursor_activated {
            if self.settings.gaze_timer_enabled {
                if !self.engaged {
                    self.start_dwell(hit.target);
                }
            } else if !self.engaged {
                fire = true;
            }
        }

        if self.timer.is_complete() || (self.engaged && self.settings.rapid_activation) {
            fire = true;
        }

        if fire {
            let dispatched = self.activate_target(hit.target);
            TickOutcome::Activated { dispatched }
        } else if !met {
            TickOutcome::Blocked
        } else if self.cursor_activated {
            TickOutcome::Dwelling {
                progress: self.timer.progress(),
            }
        } else {
            TickOutcome::Holding
        }
    }

    fn start_dwell(&mut self, target: TargetId) {
        self.timer.start();
        self.cursor_activated = true;
        debug!(%target, "dwell started");
        self.emit(GazeEvent::DwellStarted { target });
    }

    /// Conditions dropped while gazing: cancel the dwell and stop rapid re-firing.
    /// An activated target stays activated until gaze leaves it.
    fn interrupt(&mut self) {
        self.timer.stop_and_rewind(false);
        self.engaged = false;
        if self.cursor_activated {
            self.cursor_activated = false;
            if let Some(target) = self.target {
                debug!(%target, "dwell interrupted");
                self.emit(GazeEvent::DwellInterrupted { target });
            }
        }
    }

    /// Gaze left the retained target: deactivate it if needed and return to idle.
    fn release(&mut self) {
        self.interrupt();
        if self.object_activated {
            self.deactivate_target();
        }
        self.target = None;
        self.activatables.clear();
    }

    fn activate_target(&mut self, target: TargetId) -> usize {
        self.timer.stop_and_rewind(true);
        let repeat = self.object_activated;
        self.cursor_activated = false;
        self.object_activated = true;
        self.engaged = true;

        let dispatched = dispatch_activate(&self.activatables);
        if repeat {
            debug!(%target, dispatched, "gaze target re-activated");
        } else {
            info!(%target, dispatched, "gaze target activated");
        }
        self.emit(GazeEvent::Activated { target, dispatched });
        dispatched
    }

    fn deactivate_target(&mut self) {
        self.object_activated = false;
        let dispatched = dispatch_deactivate(&self.activatables);
        if let Some(target) = self.target {
            info!(%target, dispatched, "gaze target deactivated");
            self.emit(GazeEvent::Deactivated { target, dispatched });
        }
    }

    fn observe_hit(&mut self, hit: Option<&RaycastHit>) {
        let looked_at = hit.map(|h| (h.target, h.is_interactive()));
        if looked_at == self.looked_at {
            return;
        }
        self.looked_at = looked_at;
        self.conditions_met = None;
        debug!(target = ?looked_at.map(|(t, _)| t), "gaze target changed");
        self.emit(GazeEvent::TargetChanged {
            target: hit.map(|h| h.target),
            name: hit.map(|h| h.name.clone()),
            interactive: hit.is_some_and(RaycastHit::is_interactive),
        });
    }

    fn observe_conditions(&mut self, met: bool) {
        if self.conditions_met != Some(met) {
            self.conditions_met = Some(met);
            self.emit(GazeEvent::ConditionsChanged { met });
        }
    }

    fn emit(&mut self, event: GazeEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }

    /// Whether the dwell timer is currently running.
    pub fn cursor_activated(&self) -> bool {
        self.cursor_activated
    }

    /// Whether the current target has been activated and not yet deactivated.
    pub fn object_activated(&self) -> bool {
        self.object_activated
    }

    /// Target whose activatables are currently retained.
    pub fn current_target(&self) -> Option<TargetId> {
        self.target
    }

    /// Normalized dwell progress.
    pub fn progress(&self) -> f32 {
        self.timer.progress()
    }

    /// Playback speed derived from the dwell duration and animation length.
    pub fn timer_speed(&self) -> f32 {
        self.timer.speed()
    }
}

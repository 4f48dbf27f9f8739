//! Dwell timer built on top of an [`Animation`].

use crate::Animation;
use gazekit_core::GazeError;
use tracing::trace;

/// Progress past which a dwell counts as finished.
///
/// Strictly greater-than, and short of 1.0, so a run is not missed when the
/// last frame of the animation lands between two polls.
pub const COMPLETION_THRESHOLD: f32 = 0.95;

/// Why the timer was stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStop {
    /// The dwell ran to completion.
    Completed,
    /// Gaze or conditions changed before completion.
    Interrupted,
}

/// Countdown that fills over `duration_seconds` by playing an animation at a derived speed.
#[derive(Debug, Clone)]
pub struct DwellTimer<A> {
    animation: A,
    duration: f32,
    speed: f32,
    running: bool,
}

impl<A: Animation> DwellTimer<A> {
    /// Take ownership of `animation` and derive the playback speed for `duration_seconds`.
    ///
    /// The timer starts halted at progress 0.
    pub fn configure(mut animation: A, duration_seconds: f32) -> Result<Self, GazeError> {
        let speed = playback_speed(duration_seconds, animation.native_length())?;
        animation.play_from_start();
        animation.set_speed(0.0);
        Ok(Self {
            animation,
            duration: duration_seconds,
            speed,
            running: false,
        })
    }

    /// Start (or resume) accruing progress.
    pub fn start(&mut self) {
        self.animation.set_speed(self.speed);
        self.running = true;
    }

    /// Rewind to 0 and halt. `completed` only labels the returned value.
    pub fn stop_and_rewind(&mut self, completed: bool) -> TimerStop {
        self.animation.play_from_start();
        self.animation.set_speed(0.0);
        self.running = false;
        let stop = if completed {
            TimerStop::Completed
        } else {
            TimerStop::Interrupted
        };
        trace!(?stop, "dwell timer rewound");
        stop
    }

    /// Normalized elapsed fraction of the current run, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.animation.normalized_progress().clamp(0.0, 1.0)
    }

    /// Whether the current run has crossed [`COMPLETION_THRESHOLD`].
    pub fn is_complete(&self) -> bool {
        self.progress() > COMPLETION_THRESHOLD
    }

    /// Whether the timer is currently accruing progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Step the underlying animation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.animation.advance(dt);
    }

    /// Playback speed applied while running.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Configured dwell duration in seconds.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Borrow the wrapped animation.
    pub fn animation(&self) -> &A {
        &self.animation
    }
}

/// `native_length / duration`: the rate at which one run of the clip takes `duration` seconds.
pub(crate) fn playback_speed(duration_seconds: f32, native_length: f32) -> Result<f32, GazeError> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(GazeError::non_positive(
            "dwell_duration_seconds",
            duration_seconds,
        ));
    }
    if !native_length.is_finite() || native_length <= 0.0 {
        return Err(GazeError::non_positive("native_length", native_length));
    }
    Ok(native_length / duration_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClipPlayer;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn speed_is_native_length_over_duration() {
        let timer = DwellTimer::configure(ClipPlayer::new(1.0), 2.0).expect("valid");
        assert!((timer.speed() - 0.5).abs() < 1e-6);
        assert_eq!(timer.duration(), 2.0);

        let timer = DwellTimer::configure(ClipPlayer::new(0.5), 0.25).expect("valid");
        assert!((timer.speed() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_non_positive_duration_and_length() {
        assert!(matches!(
            DwellTimer::configure(ClipPlayer::new(1.0), 0.0),
            Err(GazeError::InvalidConfig {
                field: "dwell_duration_seconds",
                ..
            })
        ));
        assert!(DwellTimer::configure(ClipPlayer::new(1.0), -1.0).is_err());
        assert!(DwellTimer::configure(ClipPlayer::new(1.0), f32::NAN).is_err());
        assert!(matches!(
            DwellTimer::configure(ClipPlayer::new(0.0), 2.0),
            Err(GazeError::InvalidConfig {
                field: "native_length",
                ..
            })
        ));
    }

    #[test]
    fn timer_is_halted_until_started() {
        let mut timer = DwellTimer::configure(ClipPlayer::new(1.0), 2.0).expect("valid");
        timer.advance(1.0);
        assert_eq!(timer.progress(), 0.0);
        assert!(!timer.is_running());

        timer.start();
        timer.advance(1.0);
        assert!((timer.progress() - 0.5).abs() < 1e-5);
        assert!(timer.is_running());
    }

    #[test]
    fn progress_tracks_wall_time_over_duration() {
        let mut timer = DwellTimer::configure(ClipPlayer::new(1.0), 2.0).expect("valid");
        timer.start();
        for _ in 0..40 {
            timer.advance(FRAME);
        }
        assert!((timer.progress() - 1.0 / 3.0).abs() < 1e-3);
        assert!(!timer.is_complete());

        for _ in 40..120 {
            timer.advance(FRAME);
        }
        assert!(timer.is_complete());
    }

    #[test]
    fn completion_requires_strictly_more_than_threshold() {
        let mut timer = DwellTimer::configure(ClipPlayer::new(1.0), 1.0).expect("valid");
        timer.start();
        timer.advance(0.9);
        assert!(!timer.is_complete());
        timer.advance(0.1);
        assert!(timer.is_complete());
    }

    #[test]
    fn stop_always_rewinds_and_halts() {
        for completed in [true, false] {
            let mut timer = DwellTimer::configure(ClipPlayer::new(1.0), 2.0).expect("valid");
            timer.start();
            timer.advance(1.5);
            let stop = timer.stop_and_rewind(completed);
            assert_eq!(
                stop,
                if completed {
                    TimerStop::Completed
                } else {
                    TimerStop::Interrupted
                }
            );
            assert_eq!(timer.progress(), 0.0);
            assert_eq!(timer.animation().speed(), 0.0);

            timer.advance(1.0);
            assert_eq!(timer.progress(), 0.0);
        }
    }
}

//! Playback contract for the cursor animation.

/// The slice of an animation player the dwell timer drives.
pub trait Animation {
    /// Length of one run at speed 1.0, in seconds.
    fn native_length(&self) -> f32;

    /// Set the playback rate. Zero halts progress.
    fn set_speed(&mut self, speed: f32);

    /// Jump the playhead back to the first frame.
    fn play_from_start(&mut self);

    /// Elapsed fraction of the current run (0 at the start, 1 at the end).
    fn normalized_progress(&self) -> f32;

    /// Step playback by `dt` seconds of wall time.
    fn advance(&mut self, dt: f32);
}

/// Non-looping clip that holds on its last frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlayer {
    length: f32,
    speed: f32,
    playhead: f32,
}

impl ClipPlayer {
    /// Create a halted clip of the given native length in seconds.
    pub fn new(length: f32) -> Self {
        Self {
            length,
            speed: 0.0,
            playhead: 0.0,
        }
    }

    /// Current playback rate.
    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Animation for ClipPlayer {
    fn native_length(&self) -> f32 {
        self.length
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn play_from_start(&mut self) {
        self.playhead = 0.0;
    }

    fn normalized_progress(&self) -> f32 {
        if self.length <= 0.0 {
            return 0.0;
        }
        (self.playhead / self.length).clamp(0.0, 1.0)
    }

    fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 || self.speed == 0.0 {
            return;
        }
        self.playhead = (self.playhead + dt * self.speed).clamp(0.0, self.length.max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halted_clip_does_not_move() {
        let mut clip = ClipPlayer::new(1.0);
        clip.advance(0.5);
        assert_eq!(clip.normalized_progress(), 0.0);
    }

    #[test]
    fn clip_advances_at_speed_and_holds_at_end() {
        let mut clip = ClipPlayer::new(2.0);
        clip.set_speed(0.5);
        clip.advance(1.0);
        assert!((clip.normalized_progress() - 0.25).abs() < 1e-6);

        clip.advance(100.0);
        assert_eq!(clip.normalized_progress(), 1.0);

        clip.play_from_start();
        assert_eq!(clip.normalized_progress(), 0.0);
        assert_eq!(clip.speed(), 0.5);
    }

    #[test]
    fn non_finite_step_leaves_playhead_alone() {
        let mut clip = ClipPlayer::new(1.0);
        clip.set_speed(1.0);
        clip.advance(0.5);
        clip.advance(f32::NAN);
        clip.advance(f32::INFINITY);
        assert!((clip.normalized_progress() - 0.5).abs() < 1e-6);

        clip.advance(0.5);
        assert_eq!(clip.normalized_progress(), 1.0);
    }

    #[test]
    fn zero_length_clip_reports_no_progress() {
        let mut clip = ClipPlayer::new(0.0);
        clip.set_speed(1.0);
        clip.advance(1.0);
        assert_eq!(clip.normalized_progress(), 0.0);
    }
}

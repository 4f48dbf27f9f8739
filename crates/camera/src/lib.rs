#![warn(missing_docs)]
//! First-person viewpoint that supplies the forward gaze ray.

use gazekit_physics::Ray;
use glam::Vec3;

/// Keeps pitch away from the poles where yaw becomes meaningless.
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// First-person camera with position and yaw/pitch orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Get the right direction vector (camera's local X axis).
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos()).normalize()
    }

    /// Rotate the camera (add to yaw and pitch).
    ///
    /// # Arguments
    /// * `delta_yaw` - Horizontal rotation delta in radians
    /// * `delta_pitch` - Vertical rotation delta in radians
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        // Normalize yaw to [0, 2π]
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Turn the camera so it faces `point`. Does nothing if `point` is the camera position.
    pub fn look_at(&mut self, point: Vec3) {
        let Some(dir) = (point - self.position).try_normalize() else {
            return;
        };
        self.pitch = dir.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = dir.z.atan2(dir.x).rem_euclid(std::f32::consts::TAU);
    }

    /// The ray the gaze controller casts this frame.
    pub fn gaze_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_default_initialization() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::ZERO);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn camera_forward_direction() {
        let camera = Camera::default();
        let forward = camera.forward();
        // Default yaw=0, pitch=0 should point in +X direction
        assert!((forward.x - 1.0).abs() < 0.01);
        assert!(forward.y.abs() < 0.01);
        assert!(forward.z.abs() < 0.01);
        assert!(camera.right().dot(forward).abs() < 0.001);
    }

    #[test]
    fn camera_rotation_clamps_pitch() {
        let mut camera = Camera::default();

        // Try to rotate way beyond vertical limit
        camera.rotate(0.0, 10.0);

        // Pitch should be clamped below 90 degrees
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        let target = Vec3::new(-4.0, 5.0, -6.0);
        camera.look_at(target);

        let expected = (target - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 0.001);
    }

    #[test]
    fn look_at_own_position_keeps_orientation() {
        let mut camera = Camera::new(Vec3::ONE);
        camera.rotate(0.5, 0.25);
        camera.look_at(Vec3::ONE);
        assert!((camera.yaw - 0.5).abs() < 1e-6);
        assert!((camera.pitch - 0.25).abs() < 1e-6);
    }

    #[test]
    fn gaze_ray_starts_at_camera() {
        let camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
        let ray = camera.gaze_ray();
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - camera.forward()).length() < 1e-6);
    }
}

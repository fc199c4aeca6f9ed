//! Orbit camera with damping.

use glam::{Mat4, Vec3};

const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;
const PITCH_LIMIT: f32 = 1.5;

/// Orbit camera for viewing the galaxy.
///
/// Input moves the *goal* angles and distance; [`Camera::update`] eases the
/// actual values toward them each frame, so the view keeps gliding briefly
/// after a drag ends.
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Fraction of the remaining gap closed per 1/60 s. 1.0 disables damping.
    pub damping: f32,
    goal_yaw: f32,
    goal_pitch: f32,
    goal_distance: f32,
}

impl Camera {
    pub fn new() -> Self {
        let yaw = 0.0;
        let pitch = 0.6;
        let distance = 6.0;
        Self {
            yaw,
            pitch,
            distance,
            target: Vec3::ZERO,
            fov_y: 75.0_f32.to_radians(),
            damping: 0.1,
            goal_yaw: yaw,
            goal_pitch: pitch,
            goal_distance: distance,
        }
    }

    /// Rotate by a mouse drag of `(dx, dy)` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.goal_yaw -= dx * 0.005;
        self.goal_pitch = (self.goal_pitch + dy * 0.005).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by scroll `lines`; positive moves closer.
    pub fn zoom(&mut self, lines: f32) {
        self.goal_distance = (self.goal_distance * 0.9_f32.powf(lines)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Ease toward the goal. `delta` is the frame time in seconds.
    pub fn update(&mut self, delta: f32) {
        let t = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(delta * 60.0);
        self.yaw += (self.goal_yaw - self.yaw) * t;
        self.pitch += (self.goal_pitch - self.pitch) * t;
        self.distance += (self.goal_distance - self.distance) * t;
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, 0.1, 100.0)
    }

    /// World units per unit of attenuated sprite size.
    pub fn point_scale(&self) -> f32 {
        (self.fov_y * 0.5).tan()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

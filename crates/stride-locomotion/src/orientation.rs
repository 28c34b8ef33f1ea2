//! Yaw-only orientation updates driven by the look axis.

use std::f32::consts::TAU;

use glam::Quat;

/// Character orientation as Euler angles in radians.
///
/// Only `yaw` is changed by look input; `pitch` and `roll` are held.
/// Positive yaw turns right: forward (+Z) rotates toward +X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    /// Rotation about +Y, kept in `[0, 2π)`.
    pub yaw: f32,
    /// Rotation about the local X axis.
    pub pitch: f32,
    /// Rotation about the local Z axis.
    pub roll: f32,
}

impl Orientation {
    /// Turns by `look_axis * turn_speed * dt`, where `turn_speed` is in degrees per second.
    pub fn apply_look(&mut self, look_axis: f32, turn_speed: f32, dt: f32) {
        let delta = (look_axis * turn_speed * dt).to_radians();
        self.yaw = (self.yaw + delta).rem_euclid(TAU);
    }

    /// Yaw-only rotation used as the movement frame.
    #[must_use]
    pub fn facing(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

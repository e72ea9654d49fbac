//! First-person camera rig.
//!
//! The camera keeps its own pitch and yaw in degrees and rebuilds its
//! rotation from them, so roll never accumulates. Rate input (arrow keys) is
//! scaled by the frame delta, mouse deltas are not.

use bevy_ecs::prelude::{Component, Entity};

use crate::math::{self, Quat, Vec2};

/// Tuning values for a first-person camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraSettings {
    /// Degrees per second at full rate input.
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    /// Degrees per pixel of mouse movement.
    pub mouse_sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Eye height above the target's origin.
    pub eye_height: f32,
    /// How far the eye drops while crouching.
    pub crouch_offset: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            horizontal_speed: 120.0,
            vertical_speed: 90.0,
            mouse_sensitivity: 0.1,
            min_pitch: -90.0,
            max_pitch: 90.0,
            fov: 70.0,
            eye_height: 0.7,
            crouch_offset: 0.4,
        }
    }
}

impl CameraSettings {
    /// Swap inverted pitch limits and keep them within straight up/down.
    pub fn sanitized(mut self) -> Self {
        if self.min_pitch > self.max_pitch {
            std::mem::swap(&mut self.min_pitch, &mut self.max_pitch);
        }
        self.min_pitch = self.min_pitch.max(-90.0);
        self.max_pitch = self.max_pitch.min(90.0);
        self.fov = self.fov.clamp(10.0, 170.0);
        self
    }
}

#[derive(Component, Clone, Debug)]
pub struct FirstPersonCamera {
    /// Degrees, positive looks up.
    pub pitch: f32,
    /// Degrees in `[0, 360)`, positive turns left.
    pub yaw: f32,
    pub settings: CameraSettings,
    /// Entity the camera sits on.
    pub target: Option<Entity>,
}

impl FirstPersonCamera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            pitch: 0.0,
            yaw: 0.0,
            settings: settings.sanitized(),
            target: None,
        }
    }

    pub fn with_target(mut self, target: Entity) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.yaw = yaw.rem_euclid(360.0);
        self
    }

    /// Replace the settings and re-clamp the current pitch to the new limits.
    pub fn apply_settings(&mut self, settings: CameraSettings) {
        self.settings = settings.sanitized();
        self.pitch = self.pitch.clamp(self.settings.min_pitch, self.settings.max_pitch);
    }

    /// Feed one frame of look input.
    ///
    /// `mouse` is a pixel delta and `rate` an analog rate in `[-1, 1]`, both with
    /// x to the right and y up.
    pub fn apply_look(&mut self, mouse: &Vec2, rate: &Vec2, dt: f32) {
        let s = &self.settings;
        let dx = mouse.x * s.mouse_sensitivity + rate.x * s.horizontal_speed * dt;
        let dy = mouse.y * s.mouse_sensitivity + rate.y * s.vertical_speed * dt;

        self.yaw = (self.yaw - dx).rem_euclid(360.0);
        self.pitch = (self.pitch + dy).clamp(s.min_pitch, s.max_pitch);
    }

    pub fn rotation(&self) -> Quat {
        math::look_rotation(self.pitch, self.yaw)
    }

    /// Rotation about world up only.
    pub fn heading(&self) -> Quat {
        math::yaw_rotation(self.yaw)
    }

    /// Eye height for the current stance.
    pub fn eye_height(&self, crouching: bool) -> f32 {
        if crouching {
            self.settings.eye_height - self.settings.crouch_offset
        } else {
            self.settings.eye_height
        }
    }
}

//! Camera look and follow systems.
//!
//! Run once per frame after input is polled:
//! 1. [`rotate_camera`] applies look input to pitch/yaw.
//! 2. [`follow_target`] places the camera at its target's eye and writes the
//!    look rotation into the camera's [`Transform3D`].
//! 3. [`sync_raylib_camera`] copies the result into [`Camera3DRes`].
use bevy_ecs::prelude::*;

use crate::components::charactercontroller::CharacterController;
use crate::components::firstpersoncamera::FirstPersonCamera;
use crate::components::transform3d::Transform3D;
use crate::math::{self, to_raylib};
use crate::resources::camera3d::Camera3DRes;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

pub fn rotate_camera(
    time: Res<WorldTime>,
    input: Res<InputState>,
    mut cameras: Query<&mut FirstPersonCamera>,
) {
    let (mouse, rate) = input.effective_look();
    if mouse == math::Vec2::zeros() && rate == math::Vec2::zeros() {
        return;
    }
    for mut camera in cameras.iter_mut() {
        camera.apply_look(&mouse, &rate, time.delta);
    }
}

/// Keep every camera on its target's eye point.
///
/// A camera without a target (or whose target is gone) only updates its
/// rotation. Crouching controllers lower the eye.
pub fn follow_target(
    mut cameras: Query<(&FirstPersonCamera, &mut Transform3D)>,
    targets: Query<(&Transform3D, Option<&CharacterController>), Without<FirstPersonCamera>>,
) {
    for (camera, mut transform) in cameras.iter_mut() {
        transform.rotation = camera.rotation();

        let Some((target, controller)) = camera.target.and_then(|e| targets.get(e).ok()) else {
            continue;
        };
        let crouching = controller.is_some_and(|c| c.crouch_held);
        transform.translation = target.translation + math::up() * camera.eye_height(crouching);
    }
}

/// Copy the first camera's view into the raylib camera used for drawing.
pub fn sync_raylib_camera(
    cameras: Query<(&FirstPersonCamera, &Transform3D)>,
    mut raylib_camera: ResMut<Camera3DRes>,
) {
    let Some((camera, transform)) = cameras.iter().next() else {
        return;
    };
    let position = transform.translation;
    let cam = &mut raylib_camera.0;
    cam.position = to_raylib(&position);
    cam.target = to_raylib(&(position + transform.forward()));
    cam.up = to_raylib(&(transform.rotation * math::up()));
    cam.fovy = camera.settings.fov;
}

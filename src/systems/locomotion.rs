//! Grounded and airborne movement.
//!
//! Fixed-step systems, run in this order after the probes:
//! 1. [`match_camera_rotation`] turns the body to the camera heading and
//!    computes the camera-relative input direction.
//! 2. [`process_jump`] launches grounded controllers that requested a jump.
//! 3. [`process_move`] projects the direction onto the ground (and walls
//!    while airborne) and pushes the body toward the smoothed target speed.
//!
//! Nothing here moves a body directly: velocities are changed on the physics
//! world and integrated by the physics step that follows.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::charactercontroller::{self, CharacterController};
use crate::components::firstpersoncamera::FirstPersonCamera;
use crate::components::physicsbody::PhysicsBody;
use crate::components::suspended::Suspended;
use crate::math::{self, Vec3};
use crate::resources::input::InputState;
use crate::resources::physicsworld::PhysicsWorld;

/// Align bodies with their camera's heading and derive the input direction.
///
/// A controller without a live camera keeps its body rotation and reads the
/// input relative to it.
pub fn match_camera_rotation(
    mut physics: ResMut<PhysicsWorld>,
    input: Res<InputState>,
    cameras: Query<&FirstPersonCamera>,
    mut controllers: Query<(&mut CharacterController, &PhysicsBody), Without<Suspended>>,
) {
    for (mut controller, body) in controllers.iter_mut() {
        let camera = controller.camera.and_then(|e| cameras.get(e).ok());
        let view = match camera {
            Some(camera) => {
                physics.set_yaw_rotation(body.body, camera.heading());
                camera.rotation()
            }
            None => match physics.pose(body.body) {
                Some((_, rotation)) => rotation,
                None => continue,
            },
        };
        controller.camera_direction = charactercontroller::camera_direction(&input.move_vector, &view);
    }
}

/// Vertical-ish launch for grounded controllers with a pending jump request.
///
/// The jump leans toward the input direction and consumes the request.
pub fn process_jump(
    mut physics: ResMut<PhysicsWorld>,
    mut controllers: Query<(Entity, &mut CharacterController, &PhysicsBody), Without<Suspended>>,
) {
    let gravity_y = physics.gravity.y;
    for (entity, mut controller, body) in controllers.iter_mut() {
        if !controller.jump_request || !controller.grounded {
            continue;
        }
        let direction = math::normalize_or_zero(&(controller.camera_direction + math::up()));
        let speed = controller.jump_speed(gravity_y);
        physics.add_velocity_change(body.body, direction * speed);
        controller.jump_request = false;
        debug!("{:?} jumped at {:.2} m/s", entity, speed);
    }
}

/// Direction of travel for this step.
///
/// On the ground the camera direction follows the surface; in the air it is
/// additionally slid along any wall it would push into.
pub fn move_direction(controller: &CharacterController) -> Vec3 {
    let mut direction = math::normalize_or_zero(&math::project_on_plane(
        &controller.camera_direction,
        &controller.ground_normal,
    ));
    if !controller.grounded {
        for wall in &controller.walls.all {
            if direction.dot(&wall.normal) < 0.0 {
                direction = math::project_on_plane(&direction, &wall.normal);
            }
        }
        direction = math::normalize_or_zero(&direction);
    }
    direction
}

pub fn process_move(
    mut physics: ResMut<PhysicsWorld>,
    mut controllers: Query<(&mut CharacterController, &PhysicsBody), Without<Suspended>>,
) {
    let dt = physics.timestep();
    for (mut controller, body) in controllers.iter_mut() {
        let (Some(velocity), Some((_, rotation))) =
            (physics.linear_velocity(body.body), physics.pose(body.body))
        else {
            continue;
        };
        let facing = math::normalize_or_zero(&math::project_on_plane(
            &math::forward(&rotation),
            &math::up(),
        ));

        let direction = move_direction(&controller);
        controller.move_direction = direction;
        let target_speed = controller.target_speed_for(&controller.camera_direction, &facing);
        let acceleration =
            controller.update_acceleration(math::horizontal_length(&velocity), target_speed, dt);

        if acceleration > 0.0 && direction != Vec3::zeros() {
            physics.add_acceleration(body.body, direction * acceleration);
        }
    }
}

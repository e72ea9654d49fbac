//! Wall detection.
//!
//! Overlaps a sphere a little wider than the capsule at the body center and
//! sorts every touching collider into front/back/left/right relative to the
//! body's horizontal facing. Colliders whose closest point is straight above
//! or below the center (floor, ceiling) are not walls.
use bevy_ecs::prelude::*;

use crate::components::capsule::CapsuleShape;
use crate::components::charactercontroller::CharacterController;
use crate::components::physicsbody::PhysicsBody;
use crate::components::suspended::Suspended;
use crate::math::{self, Vec3};
use crate::resources::physicsworld::PhysicsWorld;

fn flat(v: Vec3) -> Vec3 {
    math::normalize_or_zero(&Vec3::new(v.x, 0.0, v.z))
}

pub fn wall_check(
    physics: Res<PhysicsWorld>,
    mut controllers: Query<(&mut CharacterController, &PhysicsBody, &CapsuleShape), Without<Suspended>>,
) {
    for (mut controller, body, capsule) in controllers.iter_mut() {
        let Some((center, rotation)) = physics.pose(body.body) else {
            continue;
        };
        let forward = flat(math::forward(&rotation));
        let right = flat(math::right(&rotation));
        let radius = controller.wall_probe_radius(capsule);
        let sector = controller.settings.wall_sector;

        controller.walls.clear();
        for collider in physics.overlap_sphere(&center, radius, Some(body.body)) {
            let Some(closest) = physics.closest_point(collider, &center) else {
                continue;
            };
            let to_wall = flat(closest - center);
            if to_wall == Vec3::zeros() {
                continue;
            }
            controller
                .walls
                .classify(collider, &to_wall, &forward, &right, sector);
        }
    }
}

//! Ground detection.
//!
//! Sweeps a sphere slightly smaller than the capsule's bottom hemisphere
//! straight down from the hemisphere center. A hit within the probe distance
//! grounds the controller and provides the surface normal movement is
//! projected onto.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::capsule::CapsuleShape;
use crate::components::charactercontroller::{CharacterController, GroundTransition};
use crate::components::physicsbody::PhysicsBody;
use crate::components::suspended::Suspended;
use crate::math;
use crate::resources::physicsworld::PhysicsWorld;

pub fn ground_check(
    physics: Res<PhysicsWorld>,
    mut controllers: Query<
        (Entity, &mut CharacterController, &PhysicsBody, &CapsuleShape),
        Without<Suspended>,
    >,
) {
    for (entity, mut controller, body, capsule) in controllers.iter_mut() {
        let Some((center, _)) = physics.pose(body.body) else {
            continue;
        };
        let probe = controller.ground_probe(capsule, &center);
        let hit = physics.sphere_cast(
            &probe.origin,
            probe.radius,
            &-math::up(),
            probe.max_distance,
            Some(body.body),
        );

        match controller.set_ground(hit.map(|h| h.normal)) {
            GroundTransition::Landed => {
                if let Some(hit) = hit {
                    debug!(
                        "{:?} landed on {:?} at ({:.2}, {:.2}, {:.2}), gap {:.3}, normal ({:.2}, {:.2}, {:.2})",
                        entity,
                        hit.entity,
                        hit.point.x,
                        hit.point.y,
                        hit.point.z,
                        hit.distance,
                        hit.normal.x,
                        hit.normal.y,
                        hit.normal.z
                    );
                }
            }
            GroundTransition::Left => debug!("{:?} left the ground", entity),
            GroundTransition::Unchanged => {}
        }
    }
}

//! Physics step and pose sync.
use bevy_ecs::prelude::*;

use crate::components::physicsbody::PhysicsBody;
use crate::components::transform3d::Transform3D;
use crate::resources::physicsworld::PhysicsWorld;

pub fn physics_step(mut physics: ResMut<PhysicsWorld>) {
    physics.step();
}

/// Copy body poses into [`Transform3D`]. Stale handles leave the transform as is.
pub fn sync_transforms(physics: Res<PhysicsWorld>, mut query: Query<(&PhysicsBody, &mut Transform3D)>) {
    for (body, mut transform) in query.iter_mut() {
        if let Some((translation, rotation)) = physics.pose(body.body) {
            transform.translation = translation;
            transform.rotation = rotation;
        }
    }
}

//! Link between an entity and its body in the physics world.

use bevy_ecs::prelude::Component;
use rapier3d::prelude::{ColliderHandle, RigidBodyHandle};

/// Handles into [`PhysicsWorld`](crate::resources::physicsworld::PhysicsWorld).
///
/// Created by `PhysicsWorld::spawn_body`; stale handles are tolerated by every
/// system that reads them.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

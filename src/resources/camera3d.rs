//! Shared 3D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera3D`] so the render system draws
//! from the same view the first-person camera rig computes each frame.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

/// ECS resource that holds the active 3D camera parameters.
///
/// Written by [`sync_raylib_camera`](crate::systems::camera::sync_raylib_camera),
/// read by render systems.
#[derive(Resource)]
pub struct Camera3DRes(pub Camera3D);

impl Camera3DRes {
    pub fn perspective(fov: f32) -> Self {
        Self(Camera3D::perspective(
            Vector3::new(0.0, 2.0, 4.0),
            Vector3::new(0.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            fov,
        ))
    }
}

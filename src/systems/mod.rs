//! Controller systems.
//!
//! This module groups all ECS systems that advance input, the fixed-step
//! simulation and rendering.
//!
//! Submodules overview
//! - [`camera`] – apply look input, follow the target, feed the raylib camera
//! - [`gameconfig`] – push [`crate::resources::gameconfig::GameConfig`] changes into the world
//! - [`groundcheck`] – sphere-cast ground probe and grounded transitions
//! - [`hud`] – drive HUD widgets from controller state
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`locomotion`] – body rotation, jump and move accelerations
//! - [`physics`] – step the physics world and copy poses back
//! - [`render`] – draw the 3D scene, HUD and debug overlays using Raylib
//! - [`time`] – update frame time and run owed fixed steps
//! - [`wallcheck`] – overlap-sphere wall probe and side classification

pub mod camera;
pub mod gameconfig;
pub mod groundcheck;
pub mod hud;
pub mod input;
pub mod locomotion;
pub mod physics;
pub mod render;
pub mod time;
pub mod wallcheck;

use bevy_ecs::prelude::*;

/// One physics tick: probes, locomotion, step, then pose sync.
///
/// The order matters: probes read the poses of the previous step and the
/// velocity changes written by locomotion are integrated by the step.
pub fn fixed_schedule() -> Schedule {
    let mut fixed = Schedule::default();
    fixed.add_systems(
        (
            locomotion::match_camera_rotation,
            groundcheck::ground_check,
            wallcheck::wall_check,
            locomotion::process_jump,
            locomotion::process_move,
            physics::physics_step,
            physics::sync_transforms,
        )
            .chain(),
    );
    fixed
}

//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities in
//! the world: the character controller and its camera rig, the link to the
//! physics world, shapes used for probing and drawing, and HUD widgets.
//!
//! Submodules overview:
//! - [`block`] – drawable box matching a static or dynamic cuboid collider
//! - [`capsule`] – upright capsule dimensions of a character
//! - [`charactercontroller`] – settings and per-step state of a first-person controller
//! - [`firstpersoncamera`] – pitch/yaw camera rig following a target
//! - [`physicsbody`] – rigid-body and collider handles in the physics world
//! - [`progressbar`] – clamped HUD bar and the speed bar binding
//! - [`suspended`] – marker that switches a controller off
//! - [`transform3d`] – world-space translation and rotation

pub mod block;
pub mod capsule;
pub mod charactercontroller;
pub mod firstpersoncamera;
pub mod physicsbody;
pub mod progressbar;
pub mod suspended;
pub mod transform3d;

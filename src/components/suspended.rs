//! Suspended marker component.
//!
//! A suspended character keeps its body in the physics world but stops
//! listening to input and is skipped by the probe and locomotion systems.
//! Remove the marker to resume it.

use bevy_ecs::prelude::Component;

/// Tag component: the entity's controller is switched off.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Suspended;

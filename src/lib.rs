//! First-person controller library.
//!
//! This module exposes the controller's ECS components, resources, systems,
//! and events for use in integration tests and by the `firstperson` binary.

pub mod components;
pub mod events;
pub mod game;
pub mod math;
pub mod resources;
pub mod systems;

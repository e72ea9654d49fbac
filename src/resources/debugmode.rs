//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that debug overlays should be
//! drawn: probe spheres, wall contacts, velocity and the controller readout.
//! Remove it to disable debug behavior.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may draw overlays or log extra state.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct DebugMode {}

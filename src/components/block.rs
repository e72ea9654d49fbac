use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

use crate::math::Vec3;

/// Drawable box matching a cuboid collider.
#[derive(Component, Clone, Copy, Debug)]
pub struct BlockShape {
    pub half_extents: Vec3,
    pub color: Color,
}

impl BlockShape {
    pub fn new(half_extents: Vec3, color: Color) -> Self {
        Self {
            half_extents,
            color,
        }
    }

    /// Full edge lengths (width, height, length).
    pub fn size(&self) -> Vec3 {
        self.half_extents * 2.0
    }
}

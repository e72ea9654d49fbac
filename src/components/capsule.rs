//! Upright capsule shape used by characters.

use bevy_ecs::prelude::Component;

use crate::math::{self, Vec3};

/// Y-aligned capsule centered on the entity origin.
///
/// `half_height` is half the length of the cylindrical section, so the total
/// height is `2 * (half_height + radius)`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CapsuleShape {
    pub radius: f32,
    pub half_height: f32,
}

impl CapsuleShape {
    pub fn new(radius: f32, half_height: f32) -> Self {
        Self {
            radius,
            half_height,
        }
    }

    /// Build a capsule from its total height, clamping the cylinder to zero
    /// when the height is smaller than the diameter.
    pub fn from_height(radius: f32, height: f32) -> Self {
        Self {
            radius,
            half_height: ((height - 2.0 * radius) * 0.5).max(0.0),
        }
    }

    pub fn height(&self) -> f32 {
        2.0 * (self.half_height + self.radius)
    }

    /// Center of the bottom hemisphere for a capsule centered at `center`.
    pub fn bottom_sphere_center(&self, center: &Vec3) -> Vec3 {
        center - math::up() * self.half_height
    }

    /// Lowest point of the capsule.
    pub fn foot(&self, center: &Vec3) -> Vec3 {
        center - math::up() * (self.half_height + self.radius)
    }
}

//! World-space pose of an entity.
//!
//! Physics-driven entities get their [`Transform3D`] rewritten after every
//! physics step; the camera rig writes its own.

use bevy_ecs::prelude::Component;

use crate::math::{self, Quat, Vec3};

/// Translation and rotation in world space.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform3D {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Transform3D {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        math::forward(&self.rotation)
    }

    pub fn right(&self) -> Vec3 {
        math::right(&self.rotation)
    }
}

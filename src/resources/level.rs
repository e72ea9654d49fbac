//! Level description loaded from JSON.
//!
//! A level is a list of static blocks (optionally tilted to form ramps), an
//! optional field of dynamic props scattered with a seeded RNG, and the
//! player spawn point. [`setup_scene`](crate::game::setup_scene) turns it into
//! bodies and entities.

use bevy_ecs::prelude::Resource;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::math::Vec3;

fn default_color() -> [u8; 4] {
    [130, 130, 140, 255]
}

/// A static box.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlockSpec {
    pub center: [f32; 3],
    /// Full edge lengths.
    pub size: [f32; 3],
    /// Rotation about X in degrees, applied before `tilt_z`.
    #[serde(default)]
    pub tilt_x: f32,
    /// Rotation about Z in degrees.
    #[serde(default)]
    pub tilt_z: f32,
    #[serde(default = "default_color")]
    pub color: [u8; 4],
}

/// Dynamic boxes dropped at random positions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PropSpec {
    pub count: u32,
    pub seed: u64,
    /// Half extents of the XZ area props are scattered over, centered on the origin.
    pub area: [f32; 2],
    /// Height props are dropped from.
    pub drop_height: f32,
    pub min_size: f32,
    pub max_size: f32,
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Level {
    pub name: String,
    pub spawn: [f32; 3],
    /// Initial heading of the player in degrees.
    #[serde(default)]
    pub spawn_yaw: f32,
    pub blocks: Vec<BlockSpec>,
    #[serde(default)]
    pub props: Option<PropSpec>,
}

impl Level {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read level {:?}: {}", path, e))?;
        Self::from_json(&text).map_err(|e| format!("Failed to parse level {:?}: {}", path, e))
    }

    pub fn from_json(text: &str) -> Result<Self, String> {
        let level: Level = serde_json::from_str(text).map_err(|e| e.to_string())?;
        level.validate()?;
        Ok(level)
    }

    /// Load `path`, falling back to [`Level::builtin`] on any error.
    pub fn load_or_builtin(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(&path) {
            Ok(level) => {
                info!("Loaded level '{}' ({} blocks)", level.name, level.blocks.len());
                level
            }
            Err(e) => {
                warn!("{}; using built-in level", e);
                Self::builtin()
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        for (i, block) in self.blocks.iter().enumerate() {
            if block.size.iter().any(|s| !(*s > 0.0)) {
                return Err(format!("block {} has a non-positive size {:?}", i, block.size));
            }
        }
        if let Some(props) = &self.props {
            if !(props.min_size > 0.0) || props.max_size < props.min_size {
                return Err(format!(
                    "prop sizes must satisfy 0 < min_size <= max_size, got {}..{}",
                    props.min_size, props.max_size
                ));
            }
        }
        Ok(())
    }

    pub fn spawn_point(&self) -> Vec3 {
        Vec3::from(self.spawn)
    }

    /// Flat floor, a ramp, a step and a wall.
    pub fn builtin() -> Self {
        Self {
            name: "builtin".to_string(),
            spawn: [0.0, 2.0, 6.0],
            spawn_yaw: 0.0,
            blocks: vec![
                BlockSpec {
                    center: [0.0, -0.5, 0.0],
                    size: [60.0, 1.0, 60.0],
                    tilt_x: 0.0,
                    tilt_z: 0.0,
                    color: [90, 110, 90, 255],
                },
                BlockSpec {
                    center: [6.0, 0.9, -4.0],
                    size: [4.0, 0.4, 8.0],
                    tilt_x: 20.0,
                    tilt_z: 0.0,
                    color: [160, 120, 80, 255],
                },
                BlockSpec {
                    center: [-5.0, 0.5, -3.0],
                    size: [3.0, 1.0, 3.0],
                    tilt_x: 0.0,
                    tilt_z: 0.0,
                    color: default_color(),
                },
                BlockSpec {
                    center: [0.0, 1.5, -12.0],
                    size: [20.0, 3.0, 0.5],
                    tilt_x: 0.0,
                    tilt_z: 0.0,
                    color: [180, 180, 190, 255],
                },
            ],
            props: Some(PropSpec {
                count: 12,
                seed: 7,
                area: [10.0, 10.0],
                drop_height: 4.0,
                min_size: 0.4,
                max_size: 1.0,
            }),
        }
    }
}

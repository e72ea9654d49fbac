//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, the physics
//! world, configuration and rendering handles. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `camera3d` – shared 3D camera the renderer draws from
//! - `debugmode` – presence toggles optional debug overlays and logs
//! - `gameconfig` – INI-backed window, physics, controller and camera settings
//! - `input` – per-frame keyboard and mouse state relevant to the controller
//! - `level` – JSON level description used to build the scene
//! - `physicsworld` – rapier pipeline, body sets and scene queries
//! - `worldtime` – frame time, delta and the fixed-step accumulator
pub mod camera3d;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod level;
pub mod physicsworld;
pub mod worldtime;

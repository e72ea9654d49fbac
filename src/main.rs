//! First-person controller playground.
//!
//! A small 3D scene to walk, run, crouch and jump around in, written in Rust
//! using:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for entity-component-system architecture
//! - **rapier3d** for rigid-body physics and scene queries
//!
//! # Main Loop
//!
//! 1. Parse the CLI, load `config.ini` and the level JSON
//! 2. Initialize the raylib window, ECS world and physics world
//! 3. Spawn the scene, register observers and build the schedules
//! 4. Each frame:
//!    - `pre_update`: poll input, dispatch input events, apply config changes
//!    - `fixed` (zero or more times): probes, locomotion, physics step
//!    - `update`: camera look/follow, HUD, render
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --debug
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};
use std::path::PathBuf;

use firstperson::events::input::{controller_input_observer, suspend_controller_observer};
use firstperson::events::reloadconfig::reload_config_observer;
use firstperson::events::switchdebug::switch_debug_observer;
use firstperson::game;
use firstperson::resources::camera3d::Camera3DRes;
use firstperson::resources::debugmode::DebugMode;
use firstperson::resources::gameconfig::GameConfig;
use firstperson::resources::input::InputState;
use firstperson::resources::level::Level;
use firstperson::resources::physicsworld::PhysicsWorld;
use firstperson::resources::worldtime::WorldTime;
use firstperson::systems;
use firstperson::systems::camera::{follow_target, rotate_camera, sync_raylib_camera};
use firstperson::systems::gameconfig::{apply_gameplay_settings, apply_window_settings};
use firstperson::systems::hud::update_speed_bar;
use firstperson::systems::input::{dispatch_input_events, update_input_state};
use firstperson::systems::render::render_system;
use firstperson::systems::time::{run_fixed_steps, update_world_time};

/// First-person controller playground
#[derive(Parser)]
#[command(version, about = "Walk, run and jump around a physics playground in first person.")]
struct Cli {
    /// Configuration file to read (and write with --write-config).
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Start with debug overlays enabled (toggle with F11).
    #[arg(long)]
    debug: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long)]
    write_config: bool,

    /// Level description to load.
    #[arg(long, value_name = "PATH", default_value = "assets/levels/playground.json")]
    level: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // Early-exit: dump the config and quit (no window needed)
    if cli.write_config {
        if let Err(e) = config.save_to_file() {
            error!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let level = Level::load_or_builtin(&cli.level);

    // --------------- Raylib window ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("First Person")
        .build();
    rl.set_target_fps(config.target_fps);
    // ESC releases the cursor instead of closing the window
    rl.set_exit_key(None);
    rl.disable_cursor();

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_fixed_hz(config.fixed_hz));
    world.insert_resource(PhysicsWorld::new(
        config.gravity_vector(),
        1.0 / config.fixed_hz,
    ));
    world.insert_resource(InputState::default());
    world.insert_resource(Camera3DRes::perspective(config.camera.fov));
    if cli.debug {
        world.insert_resource(DebugMode {});
    }

    game::setup_scene(&mut world, &level, &config);
    world.insert_resource(level);
    world.insert_resource(config);

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.spawn(Observer::new(controller_input_observer));
    world.spawn(Observer::new(suspend_controller_observer));
    world.spawn(Observer::new(reload_config_observer));
    // Ensure the observers are registered before we run any systems that may trigger events.
    world.flush();

    let mut pre_update = Schedule::default();
    pre_update.add_systems(
        (
            update_input_state,
            dispatch_input_events,
            apply_window_settings,
            apply_gameplay_settings,
        )
            .chain(),
    );

    let mut fixed = systems::fixed_schedule();

    let mut update = Schedule::default();
    update.add_systems(
        (
            rotate_camera,
            follow_target,
            sync_raylib_camera,
            update_speed_bar,
            render_system,
        )
            .chain(),
    );

    pre_update
        .initialize(&mut world)
        .expect("Failed to initialize pre_update schedule");
    fixed
        .initialize(&mut world)
        .expect("Failed to initialize fixed schedule");
    update
        .initialize(&mut world)
        .expect("Failed to initialize update schedule");

    info!("Entering main loop");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        pre_update.run(&mut world);
        run_fixed_steps(&mut world, &mut fixed);
        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
}
